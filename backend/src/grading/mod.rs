// src/grading/mod.rs

//! Marks and result computation.
//!
//! Everything here is pure: results are derived from raw marks on every call
//! and nothing is cached or persisted.

pub mod exam;
pub mod grade;
pub mod ranking;
pub mod statistics;
pub mod summary;

pub use exam::{ExamMarks, ExamType, SubjectMarks, exam_percentage, exam_total};
pub use grade::{Grade, grade_of};
pub use ranking::{Ranked, rank_by_percentage};
pub use statistics::{ClassStatistics, GradeDistribution, Graded, class_statistics};
pub use summary::{ExamResult, OverallResult, ResultSummary, Verdict, overall_result};
