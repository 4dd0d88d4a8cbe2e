// src/models/exam.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::utils::validation::{CLOCK_TIME, validate_academic_year};

pub const EXAM_COLUMNS: &str = "id, exam_type, class_name, section, subject, exam_date, \
    start_time, end_time, max_marks, session, created_at";

/// Represents the 'exams' table: one scheduled paper.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,

    /// 'Term-I', 'Term-II', 'Half Yearly' or 'Annual'.
    pub exam_type: String,

    pub class_name: String,
    pub section: String,
    pub subject: String,
    pub exam_date: NaiveDate,

    /// "HH:MM", 24-hour clock.
    pub start_time: String,
    pub end_time: String,

    pub max_marks: i32,
    pub session: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(custom(function = validate_exam_type))]
    pub exam_type: String,
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    #[validate(length(min = 1, max = 10))]
    pub section: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    pub exam_date: NaiveDate,
    #[validate(regex(path = *CLOCK_TIME, message = "Time must be HH:MM."))]
    pub start_time: String,
    #[validate(regex(path = *CLOCK_TIME, message = "Time must be HH:MM."))]
    pub end_time: String,
    #[validate(range(min = 1, max = 1000))]
    pub max_marks: i32,
    #[validate(custom(function = validate_academic_year))]
    pub session: String,
}

impl CreateExamRequest {
    pub fn check(&self) -> Result<(), crate::error::AppError> {
        self.validate()?;
        // Zero-padded HH:MM compares correctly as text.
        if self.end_time <= self.start_time {
            return Err(crate::error::AppError::BadRequest(
                "End time must be after start time.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Filters for listing the schedule.
#[derive(Debug, Deserialize)]
pub struct ExamListParams {
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub session: Option<String>,
}

fn validate_exam_type(exam_type: &str) -> Result<(), validator::ValidationError> {
    match exam_type {
        "Term-I" | "Term-II" | "Half Yearly" | "Annual" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_exam_type")),
    }
}
