// src/grading/grade.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Letter grade bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    D,
    E,
}

impl Grade {
    /// All bands in order, A1 first.
    pub const ALL: [Grade; 8] = [
        Grade::A1,
        Grade::A2,
        Grade::B1,
        Grade::B2,
        Grade::C1,
        Grade::C2,
        Grade::D,
        Grade::E,
    ];

    /// Position of the band inside `Grade::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A1 => "A1",
            Grade::A2 => "A2",
            Grade::B1 => "B1",
            Grade::B2 => "B2",
            Grade::C1 => "C1",
            Grade::C2 => "C2",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a percentage to its grade band.
///
/// | percentage >= | grade |
/// |---------------|-------|
/// | 91            | A1    |
/// | 81            | A2    |
/// | 71            | B1    |
/// | 61            | B2    |
/// | 51            | C1    |
/// | 41            | C2    |
/// | 33            | D     |
/// | (else)        | E     |
///
/// Every comparison against NaN is false, so NaN falls through to E.
pub fn grade_of(percentage: f64) -> Grade {
    match percentage {
        p if p >= 91.0 => Grade::A1,
        p if p >= 81.0 => Grade::A2,
        p if p >= 71.0 => Grade::B1,
        p if p >= 61.0 => Grade::B2,
        p if p >= 51.0 => Grade::C1,
        p if p >= 41.0 => Grade::C2,
        p if p >= 33.0 => Grade::D,
        _ => Grade::E,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade_of(100.0), Grade::A1);
        assert_eq!(grade_of(91.0), Grade::A1);
        assert_eq!(grade_of(90.999), Grade::A2);
        assert_eq!(grade_of(81.0), Grade::A2);
        assert_eq!(grade_of(80.999), Grade::B1);
        assert_eq!(grade_of(71.0), Grade::B1);
        assert_eq!(grade_of(70.999), Grade::B2);
        assert_eq!(grade_of(61.0), Grade::B2);
        assert_eq!(grade_of(60.999), Grade::C1);
        assert_eq!(grade_of(51.0), Grade::C1);
        assert_eq!(grade_of(50.999), Grade::C2);
        assert_eq!(grade_of(41.0), Grade::C2);
        assert_eq!(grade_of(40.999), Grade::D);
        assert_eq!(grade_of(33.0), Grade::D);
        assert_eq!(grade_of(32.999), Grade::E);
        assert_eq!(grade_of(0.0), Grade::E);
    }

    #[test]
    fn test_out_of_range_and_nan() {
        assert_eq!(grade_of(f64::NAN), Grade::E);
        assert_eq!(grade_of(-5.0), Grade::E);
        assert_eq!(grade_of(f64::NEG_INFINITY), Grade::E);
        assert_eq!(grade_of(250.0), Grade::A1);
        assert_eq!(grade_of(f64::INFINITY), Grade::A1);
    }

    #[test]
    fn test_grade_never_improves_as_percentage_drops() {
        let mut previous = grade_of(100.0);
        let mut p = 100.0;
        while p >= -1.0 {
            let current = grade_of(p);
            assert!(current >= previous, "grade improved at {p}");
            previous = current;
            p -= 0.25;
        }
        assert_eq!(previous, Grade::E);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, grade) in Grade::ALL.iter().enumerate() {
            assert_eq!(grade.index(), i);
        }
    }

    #[test]
    fn test_grade_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Grade::B1).unwrap(), "\"B1\"");
        assert_eq!(Grade::C2.to_string(), "C2");
    }
}
