// src/models/feedback.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

pub const FEEDBACK_COLUMNS: &str = "id, parent_name, student_name, email, class_name, \
    category, rating, feedback, suggestions, submitted_at";

/// Represents the 'feedback' table: a parent's submission.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub parent_name: String,
    pub student_name: String,
    /// Stored lower-cased.
    pub email: String,
    pub class_name: String,
    pub category: String,
    /// 1 to 5.
    pub rating: i32,
    pub feedback: String,
    pub suggestions: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    #[validate(length(min = 1, max = 100))]
    pub parent_name: String,
    #[validate(length(min = 1, max = 100))]
    pub student_name: String,
    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    #[validate(custom(function = validate_category))]
    pub category: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: i32,
    #[validate(length(min = 1, max = 5000))]
    pub feedback: String,
    #[validate(length(max = 5000))]
    pub suggestions: Option<String>,
}

/// Filters and pagination for the admin listing.
#[derive(Debug, Deserialize)]
pub struct FeedbackListParams {
    pub category: Option<String>,
    /// Both bounds must be given for the date filter to apply.
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub min_rating: Option<i32>,
    /// 1-based page number (default: 1).
    pub page: Option<i64>,
    /// Items per page (default: 10, max: 100).
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self { total, page, pages }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackPage {
    pub feedback: Vec<Feedback>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct FeedbackStats {
    /// Rounded to two decimals.
    pub average_rating: f64,
    pub total_feedback: i64,
    pub category_distribution: BTreeMap<String, i64>,
}

fn validate_category(category: &str) -> Result<(), validator::ValidationError> {
    match category {
        "academics" | "infrastructure" | "teaching" | "administration" | "other" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_category")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_rounds_up() {
        assert_eq!(Pagination::new(21, 1, 10).pages, 3);
        assert_eq!(Pagination::new(20, 2, 10).pages, 2);
        assert_eq!(Pagination::new(0, 1, 10).pages, 0);
    }

    #[test]
    fn test_rating_and_category_validation() {
        let req: CreateFeedbackRequest = serde_json::from_value(serde_json::json!({
            "parent_name": "Meena Rao",
            "student_name": "Kiran Rao",
            "email": "meena@example.com",
            "class_name": "5",
            "category": "teaching",
            "rating": 6,
            "feedback": "Great teachers."
        }))
        .unwrap();
        assert!(req.validate().is_err());

        let req = CreateFeedbackRequest {
            rating: 5,
            category: "canteen".to_string(),
            ..req
        };
        assert!(req.validate().is_err());
    }
}
