//! Display formatting for amounts, timestamps and stream links.
//!
//! All wall-clock values are shown in Vietnam time (UTC+7).

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

const VIETNAM_OFFSET_SECS: i32 = 7 * 3600;

pub fn vietnam_offset() -> FixedOffset {
    FixedOffset::east_opt(VIETNAM_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `1234567` → `1.234.567 ₫`. Fractions are rounded away.
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// `dd/MM/yyyy HH:mm:ss` in Vietnam time.
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.with_timezone(&vietnam_offset())
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}

/// Parses backend ISO-8601 timestamps.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Formats a backend timestamp, or returns it untouched when it does not parse.
pub fn format_datetime_str(raw: &str) -> String {
    parse_datetime(raw).map_or_else(|| raw.to_owned(), format_datetime)
}

/// A wall-clock time typed in Vietnam time, as UTC.
pub fn vietnam_local_to_utc(local: NaiveDateTime) -> Option<DateTime<Utc>> {
    vietnam_offset()
        .from_local_datetime(&local)
        .single()
        .map(|at| at.with_timezone(&Utc))
}

/// Parses `YYYY-MM-DD HH:MM` (or with a `T` separator, optional seconds) as Vietnam time.
pub fn parse_vietnam_local(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim().replace('T', " ");
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .and_then(vietnam_local_to_utc)
}

/// Whole minutes between two instants as `Xh Ym`, or `Ym` under an hour.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let minutes = (end - start).num_minutes();
    let hours = minutes.div_euclid(60);
    let rest = minutes.rem_euclid(60);
    if hours > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn format_duration_str(start: &str, end: &str) -> String {
    match (parse_datetime(start), parse_datetime(end)) {
        (Some(start), Some(end)) => format_duration(start, end),
        _ => "-".to_owned(),
    }
}

/// Video id from `youtube.com/watch?v=`, `youtu.be/` or `youtube.com/embed/` links.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    const MARKERS: [&str; 3] = ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

    MARKERS.iter().find_map(|marker| {
        let start = url.find(marker)? + marker.len();
        let rest = &url[start..];
        let end = rest
            .find(|c| matches!(c, '&' | '\n' | '?' | '#'))
            .unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })
}

pub fn is_youtube_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}

/// `pending` → `Pending`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn vnd_grouping() {
        assert_eq!(format_vnd(0.0), "0 ₫");
        assert_eq!(format_vnd(999.0), "999 ₫");
        assert_eq!(format_vnd(1_000.0), "1.000 ₫");
        assert_eq!(format_vnd(1_234_567.4), "1.234.567 ₫");
        assert_eq!(format_vnd(-50_000.0), "-50.000 ₫");
    }

    #[test]
    fn datetime_in_vietnam_time() {
        assert_eq!(format_datetime(utc(2024, 1, 15, 20, 30)), "16/01/2024 03:30:00");
        assert_eq!(
            format_datetime_str("2024-01-15T03:04:05.000Z"),
            "15/01/2024 10:04:05"
        );
        assert_eq!(format_datetime_str("not a date"), "not a date");
    }

    #[test]
    fn local_input_converts_to_utc() {
        let local = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        assert_eq!(vietnam_local_to_utc(local), Some(utc(2024, 5, 1, 0, 0)));
        assert_eq!(
            parse_vietnam_local("2024-05-01T19:30"),
            Some(utc(2024, 5, 1, 12, 30))
        );
        assert_eq!(parse_vietnam_local("yesterday"), None);
    }

    #[test]
    fn durations() {
        let start = utc(2024, 1, 1, 10, 0);
        assert_eq!(format_duration(start, utc(2024, 1, 1, 10, 45)), "45m");
        assert_eq!(format_duration(start, utc(2024, 1, 1, 12, 5)), "2h 5m");
        assert_eq!(format_duration_str("bad", "2024-01-01T00:00:00Z"), "-");
    }

    #[test]
    fn youtube_ids() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_video_id("https://youtu.be/abc123?si=x"), Some("abc123"));
        assert_eq!(
            youtube_video_id("https://youtube.com/embed/xyz#start"),
            Some("xyz")
        );
        assert_eq!(youtube_video_id("https://vimeo.com/123"), None);
    }

    #[test]
    fn truncation() {
        let link = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        assert_eq!(truncate(link, 30), "https://www.youtube.com/watch?...");
        assert_eq!(truncate("short", 30), "short");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
    }
}
