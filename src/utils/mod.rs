//! Date helpers for the Spanish-language pages and report.

use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime, TimeZone, Utc};

const LONG_DATE: &str = "%d de %B de %Y a las %H:%M";

/// Parses the API timestamps: RFC 3339, or a naive date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}

/// `05 de marzo de 2025 a las 14:07`; the raw value when unparseable.
pub fn format_long_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format_localized(LONG_DATE, Locale::es_MX).to_string(),
        None => {
            tracing::warn!("unparseable date {:?}", raw);
            raw.to_string()
        }
    }
}

/// Relative wording in the style of "hace 5 minutos".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;

    let distance = if seconds < 30 {
        "menos de un minuto".to_string()
    } else if minutes < 2 {
        "1 minuto".to_string()
    } else if minutes < 45 {
        format!("{} minutos", minutes)
    } else if minutes < 90 {
        "alrededor de 1 hora".to_string()
    } else if minutes < 1440 {
        format!("alrededor de {} horas", (minutes as f64 / 60.0).round() as i64)
    } else if minutes < 2520 {
        "1 día".to_string()
    } else if minutes < 43200 {
        format!("{} días", (minutes as f64 / 1440.0).round() as i64)
    } else if minutes < 86400 {
        "alrededor de 1 mes".to_string()
    } else if minutes < 525600 {
        format!("{} meses", (minutes as f64 / 43200.0).round() as i64)
    } else {
        let years = minutes / 525600;
        if years == 1 {
            "alrededor de 1 año".to_string()
        } else {
            format!("más de {} años", years)
        }
    };

    format!("hace {}", distance)
}
