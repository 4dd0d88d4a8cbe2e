// src/utils/validation.rs

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Academic years are written as consecutive years, e.g. "2024-2025".
pub static ACADEMIC_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{4}$").expect("valid academic year regex"));

/// 24-hour clock time, e.g. "09:30".
pub static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid clock time regex"));

/// Optional leading '+', then 7 to 15 digits with spaces or dashes between groups.
pub static CONTACT_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d[\d\s-]{5,18}\d$").expect("valid contact number regex"));

/// Checks that the second year directly follows the first.
pub fn validate_academic_year(year: &str) -> Result<(), ValidationError> {
    if !ACADEMIC_YEAR.is_match(year) {
        return Err(ValidationError::new("invalid_academic_year"));
    }
    let (start, end) = year.split_at(4);
    let start: u32 = start.parse().map_err(|_| ValidationError::new("invalid_academic_year"))?;
    let end: u32 = end[1..]
        .parse()
        .map_err(|_| ValidationError::new("invalid_academic_year"))?;
    if end != start + 1 {
        return Err(ValidationError::new("invalid_academic_year"));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_year() {
        assert!(validate_academic_year("2024-2025").is_ok());
        assert!(validate_academic_year("2024-2026").is_err());
        assert!(validate_academic_year("24-25").is_err());
        assert!(validate_academic_year("2024/2025").is_err());
    }

    #[test]
    fn test_clock_time() {
        assert!(CLOCK_TIME.is_match("09:30"));
        assert!(CLOCK_TIME.is_match("23:59"));
        assert!(!CLOCK_TIME.is_match("24:00"));
        assert!(!CLOCK_TIME.is_match("9:30"));
    }

    #[test]
    fn test_contact_no() {
        assert!(CONTACT_NO.is_match("+91 98765-43210"));
        assert!(CONTACT_NO.is_match("0112345678"));
        assert!(!CONTACT_NO.is_match("call me"));
        assert!(!CONTACT_NO.is_match("12"));
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank(" Mathematics ").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
