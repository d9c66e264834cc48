//! Duration token parsing and countdown rendering.
//!
//! Durations are written the way players type them in chat: `45min`,
//! `1d30min`, `2w`. Tokens may appear anywhere in the string and in any
//! order; everything else is ignored.

use regex::Regex;
use std::sync::LazyLock;

/// Fallback total when no duration token matches: 30 minutes.
pub const DEFAULT_DURATION_SECS: i64 = 1800;

/// Seconds per supported unit. A month is a fixed 30 days and a year a
/// fixed 365 days; nothing here is calendar-relative.
const MINUTE: i64 = 60;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_536_000;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(y|mo|w|d|min)").unwrap()
});

/// Parse a free-form duration string into total seconds.
///
/// Recognized tokens are `<digits><unit>` with unit one of `y`, `mo`, `w`,
/// `d`, `min` (case-sensitive). All matches are summed; order and
/// duplicates don't matter. This never fails: input with no recognized
/// token degrades to [`DEFAULT_DURATION_SECS`] by contract, not by
/// accident.
pub fn parse_duration_secs(text: &str) -> i64 {
    let mut total: i64 = 0;

    for cap in TOKEN_RE.captures_iter(text) {
        // Magnitudes beyond i64 range are treated as unrecognized.
        let Ok(magnitude) = cap[1].parse::<i64>() else {
            continue;
        };
        let unit_secs = match &cap[2] {
            "min" => MINUTE,
            "d" => DAY,
            "w" => WEEK,
            "mo" => MONTH,
            "y" => YEAR,
            _ => unreachable!("pattern only admits known units"),
        };
        total = total.saturating_add(magnitude.saturating_mul(unit_secs));
    }

    if total > 0 {
        total
    } else {
        DEFAULT_DURATION_SECS
    }
}

/// Render a second count as a compact countdown, e.g. `1d 4h 3m 20s`.
///
/// Zero components are omitted; all-zero input renders as `"0s"`.
/// Negative input clamps to zero, so an expired countdown always reads
/// `"0s"` rather than a negative remainder.
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);

    let (minutes, s) = (seconds / 60, seconds % 60);
    let (hours, m) = (minutes / 60, minutes % 60);
    let (d, h) = (hours / 24, hours % 24);

    let mut parts = Vec::new();
    if d > 0 {
        parts.push(format!("{}d", d));
    }
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 {
        parts.push(format!("{}s", s));
    }

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_duration_secs("45min"), 2700);
    }

    #[test]
    fn test_parse_combined() {
        assert_eq!(parse_duration_secs("1d30min"), 86_400 + 1800);
    }

    #[test]
    fn test_parse_each_unit() {
        assert_eq!(parse_duration_secs("1min"), 60);
        assert_eq!(parse_duration_secs("1d"), 86_400);
        assert_eq!(parse_duration_secs("1w"), 604_800);
        assert_eq!(parse_duration_secs("1mo"), 2_592_000);
        assert_eq!(parse_duration_secs("1y"), 31_536_000);
    }

    #[test]
    fn test_parse_empty_falls_back() {
        assert_eq!(parse_duration_secs(""), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_parse_garbage_falls_back() {
        assert_eq!(parse_duration_secs("xyz"), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_parse_tokens_embedded_in_noise() {
        assert_eq!(parse_duration_secs("start in 2d please, 30min grace"), 2 * 86_400 + 1800);
    }

    #[test]
    fn test_parse_order_independent() {
        assert_eq!(parse_duration_secs("30min1d"), parse_duration_secs("1d30min"));
        assert_eq!(parse_duration_secs("1y1mo1w"), parse_duration_secs("1w1mo1y"));
    }

    #[test]
    fn test_parse_duplicate_units_sum() {
        assert_eq!(parse_duration_secs("10min10min"), 1200);
    }

    #[test]
    fn test_parse_case_sensitive() {
        // Uppercase units are not tokens.
        assert_eq!(parse_duration_secs("45MIN"), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_parse_huge_magnitude_saturates() {
        // Larger than i64::MAX seconds once multiplied out; must not panic.
        assert_eq!(parse_duration_secs("9223372036854775807y"), i64::MAX);
    }

    #[test]
    fn test_parse_overlong_digits_ignored() {
        // 20 digits overflows i64 parsing; the token is skipped entirely.
        assert_eq!(parse_duration_secs("99999999999999999999min"), DEFAULT_DURATION_SECS);
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_countdown(0), "0s");
    }

    #[test]
    fn test_format_seconds_only() {
        assert_eq!(format_countdown(59), "59s");
    }

    #[test]
    fn test_format_exact_minute() {
        assert_eq!(format_countdown(60), "1m");
    }

    #[test]
    fn test_format_all_components() {
        // 86400 + 3600 + 60 + 1
        assert_eq!(format_countdown(90_061), "1d 1h 1m 1s");
    }

    #[test]
    fn test_format_skips_zero_components() {
        assert_eq!(format_countdown(86_400 + 5), "1d 5s");
        assert_eq!(format_countdown(3600), "1h");
    }

    #[test]
    fn test_format_negative_clamps_to_zero() {
        assert_eq!(format_countdown(-55), "0s");
        assert_eq!(format_countdown(i64::MIN), "0s");
    }

    #[test]
    fn test_format_pure() {
        assert_eq!(format_countdown(12_345), format_countdown(12_345));
    }

    #[test]
    fn test_format_days_not_calendar_relative() {
        // Exactly 365 fixed days, no month/year folding on output.
        assert_eq!(format_countdown(31_536_000), "365d");
    }

    #[test]
    fn test_round_trip_token_sum() {
        let total = parse_duration_secs("2w3d45min");
        let rebuilt = format!("{}w{}d{}min", 2, 3, 45);
        assert_eq!(parse_duration_secs(&rebuilt), total);
    }
}
