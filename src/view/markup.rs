//! HTML fragments for the history list, favorites grid and engine selector.
//!
//! All user-supplied text goes through [`escape_html`].

use crate::engine::Engine;
use crate::favorites::Favorite;
use crate::history::{time_ago, HistoryEntry};
use crate::i18n::{Language, Message};
use chrono::{DateTime, Utc};

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn empty_state(icon: &str, message: Message, language: Language) -> String {
    format!(
        r#"<div class="empty-state"><div class="empty-icon">{}</div><div class="empty-text">{}</div></div>"#,
        icon,
        message.text(language)
    )
}

/// Render the history list, newest first.
#[must_use]
pub fn render_history(entries: &[HistoryEntry], language: Language, now: DateTime<Utc>) -> String {
    if entries.is_empty() {
        return empty_state("🔍", Message::EmptyHistory, language);
    }

    let mut html = String::new();
    for entry in entries {
        let query = escape_html(&entry.query);
        html.push_str(&format!(
            r#"<div class="history-item" data-query="{}">"#,
            query
        ));
        html.push_str(r#"<div class="history-icon">🔍</div>"#);
        html.push_str(&format!(
            r#"<div class="history-content"><div class="history-query">{}</div><div class="history-time">{} • {}</div></div>"#,
            query,
            time_ago(entry.timestamp, now, language),
            entry.engine.name()
        ));
        html.push_str(&format!(
            r#"<button class="history-delete" data-id="{}" aria-label="{}">🗑️</button>"#,
            entry.id,
            Message::Delete.text(language)
        ));
        html.push_str("</div>");
    }
    html
}

/// Render the favorites grid as external links.
#[must_use]
pub fn render_favorites(favorites: &[Favorite], language: Language) -> String {
    if favorites.is_empty() {
        return empty_state("⭐", Message::EmptyFavorites, language);
    }

    favorites
        .iter()
        .map(|favorite| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="favorite-item"><div class="favorite-icon">{}</div><div class="favorite-title">{}</div></a>"#,
                escape_html(&favorite.url),
                escape_html(&favorite.icon),
                escape_html(&favorite.title)
            )
        })
        .collect()
}

/// Render the engine selector with `active` marked.
#[must_use]
pub fn render_engine_selector(active: Engine) -> String {
    Engine::ALL
        .iter()
        .map(|engine| {
            let class = if *engine == active {
                "engine-btn active"
            } else {
                "engine-btn"
            };
            format!(
                r#"<button class="{}" data-engine="{}">{}</button>"#,
                class,
                engine.key(),
                engine.name()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_escape_special_chars() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"q\" 'x'"), "&quot;q&quot; &#x27;x&#x27;");
        assert_eq!(escape_html("قطط"), "قطط");
    }

    #[test]
    fn test_history_empty() {
        let html = render_history(&[], Language::En, now());
        assert!(html.contains("empty-state"));
        assert!(html.contains("No search history"));
    }

    #[test]
    fn test_history_escapes_queries() {
        let entries = vec![HistoryEntry {
            id: 7,
            query: "<img src=x onerror=alert(1)>".to_string(),
            engine: Engine::Bing,
            timestamp: now() - Duration::minutes(5),
        }];
        let html = render_history(&entries, Language::En, now());

        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains(r#"data-id="7""#));
        assert!(html.contains("5 minutes ago • Bing"));
        assert!(html.contains(r#"aria-label="Delete""#));
    }

    #[test]
    fn test_history_in_arabic() {
        let entries = vec![HistoryEntry {
            id: 1,
            query: "طقس".to_string(),
            engine: Engine::Google,
            timestamp: now(),
        }];
        let html = render_history(&entries, Language::Ar, now());
        assert!(html.contains("الآن • Google"));
        assert!(html.contains(r#"aria-label="حذف""#));
    }

    #[test]
    fn test_favorites_escape_title_and_url() {
        let favorites = vec![Favorite {
            title: "<b>Bold</b>".to_string(),
            url: "https://example.com/?a=1&b=\"2\"".to_string(),
            icon: "⭐".to_string(),
        }];
        let html = render_favorites(&favorites, Language::En);

        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=&quot;2&quot;""#));
        assert!(html.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_favorites_empty() {
        let html = render_favorites(&[], Language::Ar);
        assert!(html.contains("لا توجد مفضلة"));
    }

    #[test]
    fn test_engine_selector_marks_active() {
        let html = render_engine_selector(Engine::Yahoo);
        assert!(html.contains(r#"<button class="engine-btn active" data-engine="yahoo">"#));
        assert_eq!(html.matches("active").count(), 1);
    }
}
