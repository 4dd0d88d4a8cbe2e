// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Section assigned when a class or student is created without one.
pub const DEFAULT_SECTION: &str = "A";

/// Class teacher recorded until one is assigned.
pub const DEFAULT_CLASS_TEACHER: &str = "Not Assigned";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub port: u16,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Academic year used when a request does not name one, e.g. "2024-2025".
    pub default_academic_year: String,
    /// Sections reported for a class that has none on record.
    pub default_sections: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        let default_academic_year = env::var("DEFAULT_ACADEMIC_YEAR")
            .unwrap_or_else(|_| "2024-2025".to_string());

        let default_sections = env::var("DEFAULT_SECTIONS")
            .map(|v| parse_sections(&v))
            .unwrap_or_default();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            port,
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            default_academic_year,
            default_sections: if default_sections.is_empty() {
                vec!["A".to_string(), "B".to_string()]
            } else {
                default_sections
            },
        }
    }
}

/// Splits a comma-separated list, dropping blanks.
fn parse_sections(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        assert_eq!(parse_sections("A, B ,C"), vec!["A", "B", "C"]);
        assert_eq!(parse_sections(" , "), Vec::<String>::new());
    }
}
