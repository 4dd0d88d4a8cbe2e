// src/models/class_details.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::{error::AppError, utils::validation::validate_academic_year};

/// Represents the 'class_details' table in the database.
/// One row per (class_name, section, academic_year).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ClassDetails {
    pub id: i64,
    pub class_name: String,
    pub section: String,
    pub academic_year: String,
    pub class_teacher: String,

    /// Subjects taught in this class, stored as a JSON array.
    pub subjects: Json<Vec<SubjectTeacher>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A class row together with the number of enrolled students.
#[derive(Debug, Serialize, FromRow)]
pub struct ClassWithCount {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub class: ClassDetails,
    pub student_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubjectTeacher {
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    pub teacher: String,
}

impl SubjectTeacher {
    /// Trims every entry and rejects entries with a blank name or teacher.
    pub fn normalize_all(subjects: Vec<SubjectTeacher>) -> Result<Vec<SubjectTeacher>, AppError> {
        subjects
            .into_iter()
            .map(|s| {
                let name = s.name.trim().to_string();
                let teacher = s.teacher.trim().to_string();
                if name.is_empty() || teacher.is_empty() {
                    return Err(AppError::BadRequest(
                        "Each subject must have a name and teacher".to_string(),
                    ));
                }
                Ok(SubjectTeacher { name, teacher })
            })
            .collect()
    }
}

/// DTO for creating a class. Subjects are added afterwards.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(custom(function = validate_academic_year))]
    pub academic_year: String,
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    #[validate(length(min = 1, max = 10))]
    pub section: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub class_teacher: Option<String>,
}

/// DTO for replacing a class, subjects included.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateClassRequest {
    #[validate(custom(function = validate_academic_year))]
    pub academic_year: String,
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    #[validate(length(min = 1, max = 10))]
    pub section: String,
    #[validate(length(min = 1, max = 100))]
    pub class_teacher: Option<String>,
    #[validate(
        length(min = 1, message = "At least one subject is required"),
        nested
    )]
    pub subjects: Vec<SubjectTeacher>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubjectsRequest {
    #[validate(nested)]
    pub subjects: Vec<SubjectTeacher>,
}

/// DTO for the academic upsert keyed by (class_name, section, academic_year).
#[derive(Debug, Deserialize, Validate)]
pub struct SaveClassDetailsRequest {
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    #[validate(length(min = 1, max = 10))]
    pub section: String,
    #[validate(custom(function = validate_academic_year))]
    pub academic_year: String,
    #[validate(nested)]
    pub subjects: Vec<SubjectTeacher>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, teacher: &str) -> SubjectTeacher {
        SubjectTeacher {
            name: name.to_string(),
            teacher: teacher.to_string(),
        }
    }

    #[test]
    fn test_normalize_trims() {
        let subjects = SubjectTeacher::normalize_all(vec![subject("  Mathematics ", " R. Iyer")]).unwrap();
        assert_eq!(subjects, vec![subject("Mathematics", "R. Iyer")]);
    }

    #[test]
    fn test_normalize_rejects_blank_teacher() {
        let result = SubjectTeacher::normalize_all(vec![subject("Science", "   ")]);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_update_requires_a_subject() {
        let req: UpdateClassRequest = serde_json::from_value(serde_json::json!({
            "academic_year": "2024-2025",
            "class_name": "7",
            "section": "B",
            "subjects": []
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
