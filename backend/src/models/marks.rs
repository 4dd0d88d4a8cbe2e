// src/models/marks.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::{
    grading::{ExamType, ResultSummary, SubjectMarks, overall_result},
    utils::validation::validate_academic_year,
};

pub const MARKS_COLUMNS: &str =
    "id, student_id, academic_year, class_name, section, marks, created_at, updated_at";

/// Represents the 'marks' table in the database.
/// Holds the raw per-subject marks of one student for one academic year.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MarksRecord {
    pub id: i64,
    pub student_id: i64,
    pub academic_year: String,

    /// Class and section the marks were entered under.
    pub class_name: String,
    pub section: String,

    pub marks: Json<Vec<SubjectMarks>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl MarksRecord {
    pub fn subjects(&self) -> &[SubjectMarks] {
        &self.marks.0
    }

    pub fn summary(&self) -> ResultSummary {
        overall_result(self.subjects())
    }
}

/// Marks row joined with the student it belongs to.
#[derive(Debug, Serialize, FromRow)]
pub struct StudentMarks {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: MarksRecord,
    pub student_name: String,
    pub admission_no: String,
    pub father_name: String,
}

/// A mark record as posted for evaluation, without persisting it.
#[derive(Debug, Deserialize, Validate)]
pub struct MarkSheet {
    #[validate(nested)]
    pub marks: Vec<SubjectMarks>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMarksRequest {
    pub student_id: i64,
    /// Defaults to the configured academic year.
    #[validate(custom(function = validate_academic_year))]
    pub academic_year: Option<String>,
    #[validate(nested)]
    pub marks: Vec<SubjectMarks>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMarksRequest {
    /// Defaults to the configured academic year.
    #[validate(custom(function = validate_academic_year))]
    pub academic_year: Option<String>,
    #[validate(nested)]
    pub marks: Vec<SubjectMarks>,
}

/// Query parameters naming an academic year.
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub academic_year: Option<String>,
}

/// Query parameters selecting one class in one year.
#[derive(Debug, Deserialize)]
pub struct ClassSelection {
    pub class_name: String,
    pub section: String,
    pub academic_year: Option<String>,
    /// When absent, statistics use each student's overall percentage.
    pub exam_type: Option<ExamType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_sheet_rejects_out_of_range_marks() {
        let sheet: MarkSheet = serde_json::from_value(serde_json::json!({
            "marks": [{ "subject": "Mathematics", "pt1": { "written": 95, "oral": 5 } }]
        }))
        .unwrap();
        assert!(sheet.validate().is_err());
    }

    #[test]
    fn test_class_selection_parses_exam_type() {
        let params: ClassSelection = serde_json::from_value(serde_json::json!({
            "class_name": "8",
            "section": "A",
            "exam_type": "hy"
        }))
        .unwrap();
        assert_eq!(params.exam_type, Some(ExamType::Hy));
        assert!(params.academic_year.is_none());
    }
}
