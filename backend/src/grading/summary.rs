// src/grading/summary.rs

use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    exam::{ExamType, SubjectMarks, exam_percentage, exam_total},
    grade::{Grade, grade_of},
};

/// Minimum overall percentage for a PASS verdict.
pub const PASS_PERCENTAGE: f64 = 33.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "NEEDS IMPROVEMENT")]
    NeedsImprovement,
}

impl Verdict {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= PASS_PERCENTAGE {
            Verdict::Pass
        } else {
            Verdict::NeedsImprovement
        }
    }
}

/// Result of a single exam, derived from the raw marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamResult {
    pub total: f64,
    pub percentage: f64,
    pub grade: Grade,
}

impl ExamResult {
    pub fn compute(marks: &[SubjectMarks], exam: ExamType) -> Self {
        let percentage = exam_percentage(marks, exam);
        Self {
            total: exam_total(marks, exam),
            percentage,
            grade: grade_of(percentage),
        }
    }
}

/// Year-level figures averaged over the exams that have marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallResult {
    pub percentage: f64,
    pub grade: Grade,
    pub result: Verdict,
}

impl Default for OverallResult {
    fn default() -> Self {
        Self {
            percentage: 0.0,
            grade: Grade::E,
            result: Verdict::NeedsImprovement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    /// Only exams with a percentage above zero appear here.
    pub exam_wise: BTreeMap<ExamType, ExamResult>,
    pub overall: OverallResult,
}

/// Summarizes a student's year.
///
/// An exam counts as valid when its percentage is strictly above zero. The
/// overall percentage is the mean over valid exams only, so a student with
/// marks for pt1 alone is judged on pt1 alone. A genuine score of zero is
/// indistinguishable from "not entered" and is left out as well.
pub fn overall_result(marks: &[SubjectMarks]) -> ResultSummary {
    let exam_wise: BTreeMap<ExamType, ExamResult> = ExamType::ALL
        .into_iter()
        .map(|exam| (exam, ExamResult::compute(marks, exam)))
        .filter(|(_, result)| result.percentage > 0.0)
        .collect();

    if exam_wise.is_empty() {
        return ResultSummary {
            exam_wise,
            overall: OverallResult::default(),
        };
    }

    let percentage =
        exam_wise.values().map(|r| r.percentage).sum::<f64>() / exam_wise.len() as f64;

    ResultSummary {
        overall: OverallResult {
            percentage,
            grade: grade_of(percentage),
            result: Verdict::from_percentage(percentage),
        },
        exam_wise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_exam_is_not_divided_by_four() {
        let marks = vec![
            SubjectMarks::new("Mathematics").with(ExamType::Pt1, 70.0, 15.0),
            SubjectMarks::new("English").with(ExamType::Pt1, 60.0, 10.0),
        ];
        let summary = overall_result(&marks);

        assert_eq!(summary.exam_wise.len(), 1);
        assert_eq!(
            summary.exam_wise[&ExamType::Pt1],
            ExamResult {
                total: 155.0,
                percentage: 77.5,
                grade: Grade::B1
            }
        );
        assert_eq!(
            summary.overall,
            OverallResult {
                percentage: 77.5,
                grade: Grade::B1,
                result: Verdict::Pass
            }
        );
    }

    #[test]
    fn test_no_marks_entered() {
        let marks = vec![SubjectMarks::new("Mathematics"), SubjectMarks::new("Science")];
        let summary = overall_result(&marks);
        assert!(summary.exam_wise.is_empty());
        assert_eq!(summary.overall, OverallResult::default());
        assert_eq!(summary.overall.grade, Grade::E);
        assert_eq!(summary.overall.result, Verdict::NeedsImprovement);
    }

    #[test]
    fn test_empty_record() {
        let summary = overall_result(&[]);
        assert!(summary.exam_wise.is_empty());
        assert_eq!(summary.overall.percentage, 0.0);
    }

    #[test]
    fn test_averages_only_valid_exams() {
        let marks = vec![
            SubjectMarks::new("Mathematics")
                .with(ExamType::Pt1, 80.0, 20.0)
                .with(ExamType::Final, 40.0, 10.0),
        ];
        let summary = overall_result(&marks);
        assert_eq!(summary.exam_wise.len(), 2);
        assert!(!summary.exam_wise.contains_key(&ExamType::Hy));
        assert!(!summary.exam_wise.contains_key(&ExamType::Pt2));
        assert_eq!(summary.overall.percentage, 75.0);
        assert_eq!(summary.overall.grade, Grade::B1);
    }

    #[test]
    fn test_zero_scored_exam_is_excluded() {
        let marks = vec![
            SubjectMarks::new("Science")
                .with(ExamType::Hy, 0.0, 0.0)
                .with(ExamType::Pt2, 30.0, 10.0),
        ];
        let summary = overall_result(&marks);
        assert_eq!(summary.exam_wise.keys().copied().collect::<Vec<_>>(), vec![ExamType::Pt2]);
        assert_eq!(summary.overall.percentage, 40.0);
        assert_eq!(summary.overall.grade, Grade::D);
        assert_eq!(summary.overall.result, Verdict::Pass);
    }

    #[test]
    fn test_verdict_threshold() {
        assert_eq!(Verdict::from_percentage(33.0), Verdict::Pass);
        assert_eq!(Verdict::from_percentage(32.99), Verdict::NeedsImprovement);

        let marks = vec![SubjectMarks::new("Art").with(ExamType::Pt1, 20.0, 5.0)];
        let summary = overall_result(&marks);
        assert_eq!(summary.overall.grade, Grade::E);
        assert_eq!(summary.overall.result, Verdict::NeedsImprovement);
    }

    #[test]
    fn test_serialized_shape() {
        let marks = vec![SubjectMarks::new("Mathematics").with(ExamType::Hy, 75.0, 20.0)];
        let value = serde_json::to_value(overall_result(&marks)).unwrap();
        assert_eq!(value["examWise"]["hy"]["total"], 95.0);
        assert_eq!(value["examWise"]["hy"]["grade"], "A1");
        assert_eq!(value["overall"]["result"], "PASS");

        let empty = serde_json::to_value(overall_result(&[])).unwrap();
        assert_eq!(empty["examWise"], serde_json::json!({}));
        assert_eq!(empty["overall"]["result"], "NEEDS IMPROVEMENT");
    }
}
