// src/grading/statistics.rs

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::{
    grade::Grade,
    summary::{ExamResult, OverallResult},
};

/// Anything that carries a percentage and the grade derived from it.
pub trait Graded {
    fn percentage(&self) -> f64;
    fn grade(&self) -> Grade;
}

impl Graded for ExamResult {
    fn percentage(&self) -> f64 {
        self.percentage
    }

    fn grade(&self) -> Grade {
        self.grade
    }
}

impl Graded for OverallResult {
    fn percentage(&self) -> f64 {
        self.percentage
    }

    fn grade(&self) -> Grade {
        self.grade
    }
}

impl<T: Graded + ?Sized> Graded for &T {
    fn percentage(&self) -> f64 {
        (**self).percentage()
    }

    fn grade(&self) -> Grade {
        (**self).grade()
    }
}

/// Student count per grade band. Serializes as `{"A1": n, ..., "E": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeDistribution([u32; 8]);

impl GradeDistribution {
    pub fn record(&mut self, grade: Grade) {
        self.0[grade.index()] += 1;
    }

    pub fn count(&self, grade: Grade) -> u32 {
        self.0[grade.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Grade, u32)> + '_ {
        Grade::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Serialize for GradeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Grade::ALL.len()))?;
        for (grade, count) in self.iter() {
            map.serialize_entry(grade.as_str(), &count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStatistics {
    pub total_students: usize,
    pub average_percentage: f64,
    pub highest_percentage: f64,
    /// Stays at 100 when there are no students.
    pub lowest_percentage: f64,
    pub grade_distribution: GradeDistribution,
}

/// Reduces a class's results in a single pass.
///
/// Highest starts at 0 and lowest at 100; both seeds survive an empty input.
pub fn class_statistics<I>(results: I) -> ClassStatistics
where
    I: IntoIterator,
    I::Item: Graded,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut highest: f64 = 0.0;
    let mut lowest: f64 = 100.0;
    let mut distribution = GradeDistribution::default();

    for result in results {
        let percentage = result.percentage();
        count += 1;
        sum += percentage;
        highest = highest.max(percentage);
        lowest = lowest.min(percentage);
        distribution.record(result.grade());
    }

    let average = if count == 0 { 0.0 } else { sum / count as f64 };

    ClassStatistics {
        total_students: count,
        average_percentage: average,
        highest_percentage: highest,
        lowest_percentage: lowest,
        grade_distribution: distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::grade::grade_of;

    fn result(percentage: f64) -> ExamResult {
        ExamResult {
            total: percentage * 5.0,
            percentage,
            grade: grade_of(percentage),
        }
    }

    #[test]
    fn test_empty_class() {
        let stats = class_statistics(Vec::<ExamResult>::new());
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_percentage, 0.0);
        assert_eq!(stats.highest_percentage, 0.0);
        assert_eq!(stats.lowest_percentage, 100.0);
        assert_eq!(stats.grade_distribution, GradeDistribution::default());
        assert!(stats.grade_distribution.iter().all(|(_, n)| n == 0));
    }

    #[test]
    fn test_three_students() {
        let results = vec![result(90.0), result(50.0), result(33.0)];
        let stats = class_statistics(&results);

        assert_eq!(stats.total_students, 3);
        assert!((stats.average_percentage - 57.666_666).abs() < 1e-4);
        assert_eq!(stats.highest_percentage, 90.0);
        assert_eq!(stats.lowest_percentage, 33.0);

        assert_eq!(stats.grade_distribution.count(Grade::A2), 1);
        assert_eq!(stats.grade_distribution.count(Grade::C2), 1);
        assert_eq!(stats.grade_distribution.count(Grade::D), 1);
        assert_eq!(stats.grade_distribution.iter().map(|(_, n)| n).sum::<u32>(), 3);
    }

    #[test]
    fn test_works_over_overall_results() {
        let overall = [
            OverallResult {
                percentage: 95.0,
                grade: Grade::A1,
                result: crate::grading::Verdict::Pass,
            },
            OverallResult::default(),
        ];
        let stats = class_statistics(overall.iter());
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.average_percentage, 47.5);
        assert_eq!(stats.lowest_percentage, 0.0);
        assert_eq!(stats.grade_distribution.count(Grade::E), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let stats = class_statistics(vec![result(72.0)]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalStudents"], 1);
        assert_eq!(value["gradeDistribution"]["B1"], 1);
        assert_eq!(value["gradeDistribution"]["E"], 0);
        assert_eq!(value["gradeDistribution"].as_object().unwrap().len(), 8);
    }
}
