//! Human-readable relative times for history entries.

use crate::config::{DAY_SECS, HOUR_SECS, MINUTE_SECS, WEEK_SECS};
use crate::i18n::Language;
use chrono::{DateTime, NaiveDate, Utc};

/// How long ago something happened, bucketed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAgo {
    Now,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    /// A week or more ago: shown as the calendar date
    Date(NaiveDate),
}

impl TimeAgo {
    /// Bucket the time elapsed between `timestamp` and `now`.
    /// Timestamps in the future count as now.
    pub fn between(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let seconds = (now - timestamp).num_seconds();

        if seconds < MINUTE_SECS {
            TimeAgo::Now
        } else if seconds < HOUR_SECS {
            TimeAgo::Minutes(seconds / MINUTE_SECS)
        } else if seconds < DAY_SECS {
            TimeAgo::Hours(seconds / HOUR_SECS)
        } else if seconds < WEEK_SECS {
            TimeAgo::Days(seconds / DAY_SECS)
        } else {
            TimeAgo::Date(timestamp.date_naive())
        }
    }

    pub fn localized(&self, language: Language) -> String {
        match (language, self) {
            (Language::Ar, TimeAgo::Now) => "الآن".to_string(),
            (Language::Ar, TimeAgo::Minutes(n)) => format!("منذ {} دقيقة", n),
            (Language::Ar, TimeAgo::Hours(n)) => format!("منذ {} ساعة", n),
            (Language::Ar, TimeAgo::Days(n)) => format!("منذ {} يوم", n),
            (Language::Ar, TimeAgo::Date(date)) => date.format("%-d/%-m/%Y").to_string(),
            (Language::En, TimeAgo::Now) => "now".to_string(),
            (Language::En, TimeAgo::Minutes(n)) => plural(*n, "minute"),
            (Language::En, TimeAgo::Hours(n)) => plural(*n, "hour"),
            (Language::En, TimeAgo::Days(n)) => plural(*n, "day"),
            (Language::En, TimeAgo::Date(date)) => date.format("%-m/%-d/%Y").to_string(),
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Relative time string for `timestamp` as seen at `now`
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>, language: Language) -> String {
    TimeAgo::between(timestamp, now).localized(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn ago(seconds: i64) -> TimeAgo {
        TimeAgo::between(now() - Duration::seconds(seconds), now())
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(ago(0), TimeAgo::Now);
        assert_eq!(ago(59), TimeAgo::Now);
        assert_eq!(ago(60), TimeAgo::Minutes(1));
        assert_eq!(ago(3599), TimeAgo::Minutes(59));
        assert_eq!(ago(3600), TimeAgo::Hours(1));
        assert_eq!(ago(86399), TimeAgo::Hours(23));
        assert_eq!(ago(86400), TimeAgo::Days(1));
        assert_eq!(ago(604799), TimeAgo::Days(6));
        assert_eq!(
            ago(604800),
            TimeAgo::Date(NaiveDate::from_ymd_opt(2026, 10, 9).unwrap())
        );
    }

    #[test]
    fn test_future_timestamp_is_now() {
        assert_eq!(ago(-300), TimeAgo::Now);
    }

    #[test]
    fn test_arabic_strings() {
        assert_eq!(ago(10).localized(Language::Ar), "الآن");
        assert_eq!(ago(120).localized(Language::Ar), "منذ 2 دقيقة");
        assert_eq!(ago(7200).localized(Language::Ar), "منذ 2 ساعة");
        assert_eq!(ago(3 * 86400).localized(Language::Ar), "منذ 3 يوم");
        assert_eq!(ago(604800).localized(Language::Ar), "9/10/2026");
    }

    #[test]
    fn test_english_strings() {
        assert_eq!(ago(10).localized(Language::En), "now");
        assert_eq!(ago(60).localized(Language::En), "1 minute ago");
        assert_eq!(ago(5 * 3600).localized(Language::En), "5 hours ago");
        assert_eq!(ago(604800).localized(Language::En), "10/9/2026");
        assert_eq!(
            time_ago(now() - Duration::days(2), now(), Language::En),
            "2 days ago"
        );
    }
}
