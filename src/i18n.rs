//! Interface languages and user-visible strings.

use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

/// Text direction of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl Language {
    /// Value of the document `lang` attribute
    pub fn tag(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            Language::En => Direction::Ltr,
        }
    }

    /// Locale handed to the speech recognizer
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::Ar => "ar-SA",
            Language::En => "en-US",
        }
    }
}

/// A fixed user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    EmptyQuery,
    VoiceDisabled,
    VoiceUnsupported,
    VoiceFailed,
    VoiceStartFailed,
    NavigationFailed,
    HistoryCleared,
    ConfirmClearHistory,
    SettingsSaved,
    FavoriteAdded,
    FavoriteRemoved,
    FavoriteInvalidUrl,
    FavoriteDuplicate,
    EmptyHistory,
    EmptyFavorites,
    Delete,
}

impl Message {
    pub fn text(self, language: Language) -> &'static str {
        match language {
            Language::Ar => self.arabic(),
            Language::En => self.english(),
        }
    }

    fn arabic(self) -> &'static str {
        match self {
            Message::EmptyQuery => "الرجاء إدخال كلمة بحث",
            Message::VoiceDisabled => "البحث الصوتي معطل في الإعدادات",
            Message::VoiceUnsupported => "البحث الصوتي غير مدعوم في هذا المتصفح",
            Message::VoiceFailed => "حدث خطأ في البحث الصوتي",
            Message::VoiceStartFailed => "تعذر بدء البحث الصوتي",
            Message::NavigationFailed => "تعذر فتح صفحة البحث",
            Message::HistoryCleared => "تم مسح سجل البحث",
            Message::ConfirmClearHistory => "هل تريد مسح سجل البحث بالكامل؟",
            Message::SettingsSaved => "تم حفظ الإعدادات",
            Message::FavoriteAdded => "تمت إضافة المفضلة",
            Message::FavoriteRemoved => "تم حذف المفضلة",
            Message::FavoriteInvalidUrl => "الرابط غير صالح",
            Message::FavoriteDuplicate => "الرابط موجود في المفضلة",
            Message::EmptyHistory => "لا يوجد سجل بحث",
            Message::EmptyFavorites => "لا توجد مفضلة",
            Message::Delete => "حذف",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Message::EmptyQuery => "Please enter a search term",
            Message::VoiceDisabled => "Voice search is disabled in settings",
            Message::VoiceUnsupported => "Voice search is not supported here",
            Message::VoiceFailed => "Voice search failed",
            Message::VoiceStartFailed => "Could not start voice search",
            Message::NavigationFailed => "Could not open the search page",
            Message::HistoryCleared => "Search history cleared",
            Message::ConfirmClearHistory => "Clear the whole search history?",
            Message::SettingsSaved => "Settings saved",
            Message::FavoriteAdded => "Favorite added",
            Message::FavoriteRemoved => "Favorite removed",
            Message::FavoriteInvalidUrl => "Invalid link",
            Message::FavoriteDuplicate => "Already in favorites",
            Message::EmptyHistory => "No search history",
            Message::EmptyFavorites => "No favorites",
            Message::Delete => "Delete",
        }
    }
}
