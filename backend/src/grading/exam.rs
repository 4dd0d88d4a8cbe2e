// src/grading/exam.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum marks a subject can carry in one exam (80 written + 20 oral).
pub const SUBJECT_MAX_MARKS: f64 = 100.0;

/// The four periodic assessments of an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    /// First periodic test.
    Pt1,
    /// Half-yearly.
    Hy,
    /// Second periodic test.
    Pt2,
    Final,
}

impl ExamType {
    /// Evaluation order used when summarizing a year.
    pub const ALL: [ExamType; 4] = [ExamType::Pt1, ExamType::Hy, ExamType::Pt2, ExamType::Final];

    pub fn as_str(self) -> &'static str {
        match self {
            ExamType::Pt1 => "pt1",
            ExamType::Hy => "hy",
            ExamType::Pt2 => "pt2",
            ExamType::Final => "final",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks scored by one student in one subject for one exam.
/// A missing component counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ExamMarks {
    #[validate(range(min = 0.0, max = 80.0, message = "Written marks must be between 0 and 80."))]
    pub written: Option<f64>,
    #[validate(range(min = 0.0, max = 20.0, message = "Oral marks must be between 0 and 20."))]
    pub oral: Option<f64>,
}

impl ExamMarks {
    pub fn total(&self) -> f64 {
        self.written.unwrap_or(0.0) + self.oral.unwrap_or(0.0)
    }
}

/// One subject row of a student's yearly mark record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SubjectMarks {
    #[validate(length(min = 1, max = 100, message = "Subject name must be between 1 and 100 characters."))]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub pt1: Option<ExamMarks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub hy: Option<ExamMarks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub pt2: Option<ExamMarks>,
    #[serde(rename = "final", default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub final_exam: Option<ExamMarks>,
}

impl SubjectMarks {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Sets the marks for one exam, builder style.
    pub fn with(mut self, exam: ExamType, written: f64, oral: f64) -> Self {
        let marks = Some(ExamMarks {
            written: Some(written),
            oral: Some(oral),
        });
        match exam {
            ExamType::Pt1 => self.pt1 = marks,
            ExamType::Hy => self.hy = marks,
            ExamType::Pt2 => self.pt2 = marks,
            ExamType::Final => self.final_exam = marks,
        }
        self
    }

    pub fn exam(&self, exam: ExamType) -> Option<&ExamMarks> {
        match exam {
            ExamType::Pt1 => self.pt1.as_ref(),
            ExamType::Hy => self.hy.as_ref(),
            ExamType::Pt2 => self.pt2.as_ref(),
            ExamType::Final => self.final_exam.as_ref(),
        }
    }
}

/// Sum of written + oral over every subject that has an entry for `exam`.
pub fn exam_total(marks: &[SubjectMarks], exam: ExamType) -> f64 {
    marks
        .iter()
        .filter_map(|subject| subject.exam(exam))
        .map(ExamMarks::total)
        .sum()
}

/// Exam total as a share of the maximum over *all* subjects in the record.
///
/// A subject with no entry for `exam` still counts toward the maximum, so
/// incomplete data entry pulls the percentage down. An empty record yields 0.
pub fn exam_percentage(marks: &[SubjectMarks], exam: ExamType) -> f64 {
    let max_marks = marks.len() as f64 * SUBJECT_MAX_MARKS;
    if max_marks == 0.0 {
        return 0.0;
    }
    exam_total(marks, exam) / max_marks * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_subjects_pt1() -> Vec<SubjectMarks> {
        vec![
            SubjectMarks::new("Mathematics").with(ExamType::Pt1, 70.0, 15.0),
            SubjectMarks::new("English").with(ExamType::Pt1, 60.0, 10.0),
        ]
    }

    #[test]
    fn test_exam_total_sums_written_and_oral() {
        let marks = two_subjects_pt1();
        assert_eq!(exam_total(&marks, ExamType::Pt1), 155.0);
        assert_eq!(exam_total(&marks, ExamType::Hy), 0.0);
    }

    #[test]
    fn test_exam_percentage() {
        let marks = two_subjects_pt1();
        assert_eq!(exam_percentage(&marks, ExamType::Pt1), 77.5);
        assert_eq!(exam_percentage(&marks, ExamType::Final), 0.0);
    }

    #[test]
    fn test_empty_record_has_zero_percentage() {
        for exam in ExamType::ALL {
            assert_eq!(exam_percentage(&[], exam), 0.0);
            assert_eq!(exam_total(&[], exam), 0.0);
        }
    }

    #[test]
    fn test_missing_subject_entry_drags_percentage_down() {
        let marks = vec![
            SubjectMarks::new("Mathematics").with(ExamType::Hy, 80.0, 20.0),
            SubjectMarks::new("Science"),
        ];
        assert_eq!(exam_total(&marks, ExamType::Hy), 100.0);
        assert_eq!(exam_percentage(&marks, ExamType::Hy), 50.0);
    }

    #[test]
    fn test_missing_components_count_as_zero() {
        let subject = SubjectMarks {
            subject: "Hindi".to_string(),
            pt2: Some(ExamMarks {
                written: Some(42.0),
                oral: None,
            }),
            ..SubjectMarks::default()
        };
        assert_eq!(exam_total(&[subject], ExamType::Pt2), 42.0);
    }

    #[test]
    fn test_parses_record_shape() {
        let raw = serde_json::json!([
            { "subject": "Mathematics", "pt1": { "written": 70, "oral": 15 }, "final": { "written": 75 } }
        ]);
        let marks: Vec<SubjectMarks> = serde_json::from_value(raw).unwrap();
        assert_eq!(marks[0].exam(ExamType::Pt1).unwrap().total(), 85.0);
        assert_eq!(marks[0].exam(ExamType::Final).unwrap().total(), 75.0);
        assert!(marks[0].exam(ExamType::Hy).is_none());
    }

    #[test]
    fn test_rejects_unknown_exam_key() {
        let raw = serde_json::json!({ "subject": "Mathematics", "pt3": { "written": 10 } });
        assert!(serde_json::from_value::<SubjectMarks>(raw).is_err());
    }

    #[test]
    fn test_validation_ranges() {
        let ok = SubjectMarks::new("Science").with(ExamType::Pt1, 80.0, 20.0);
        assert!(ok.validate().is_ok());

        let written_too_high = SubjectMarks::new("Science").with(ExamType::Pt1, 81.0, 0.0);
        assert!(written_too_high.validate().is_err());

        let negative_oral = SubjectMarks::new("Science").with(ExamType::Final, 10.0, -1.0);
        assert!(negative_oral.validate().is_err());

        let unnamed = SubjectMarks::new("").with(ExamType::Pt1, 10.0, 5.0);
        assert!(unnamed.validate().is_err());
    }
}
