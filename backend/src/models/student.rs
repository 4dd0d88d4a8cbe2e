// src/models/student.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::utils::validation::{CONTACT_NO, validate_academic_year, validate_not_blank};

/// Columns selected whenever a full `Student` row is loaded.
pub const STUDENT_COLUMNS: &str = "id, admission_no, name, father_name, dob, gender, \
    admission_date, class_name, section, address, contact_no, session, transport, \
    created_at, updated_at";

/// Represents the 'students' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,

    /// School-issued admission number. Unique.
    pub admission_no: String,

    pub name: String,
    pub father_name: String,
    pub dob: NaiveDate,

    /// 'Male', 'Female' or 'Other'.
    pub gender: String,

    pub admission_date: NaiveDate,
    pub class_name: String,
    pub section: String,
    pub address: Option<String>,
    pub contact_no: Option<String>,

    /// Academic session the student was admitted in, e.g. "2024-2025".
    pub session: String,

    /// Present only for students using school transport.
    pub transport: Option<Json<Transport>>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// School transport details. Every field is required once transport is opted into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Transport {
    #[validate(range(min = 0.0))]
    pub fees: f64,
    pub start_date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub pickup_point: String,
    #[validate(length(min = 1, max = 100))]
    pub route: String,
    #[validate(length(min = 1, max = 20))]
    pub bus_number: String,
}

/// DTO for creating or replacing a student.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 50), custom(function = validate_not_blank))]
    pub admission_no: String,
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    pub father_name: String,
    pub dob: NaiveDate,
    #[validate(custom(function = validate_gender))]
    pub gender: String,
    pub admission_date: NaiveDate,
    #[validate(length(min = 1, max = 20))]
    pub class_name: String,
    /// Defaults to section "A".
    #[validate(length(min = 1, max = 10))]
    pub section: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(regex(path = *CONTACT_NO, message = "Contact number is not valid."))]
    pub contact_no: Option<String>,
    /// Defaults to the configured academic year.
    #[validate(custom(function = validate_academic_year))]
    pub session: Option<String>,
    #[validate(nested)]
    pub transport: Option<Transport>,
}

impl CreateStudentRequest {
    /// Field-level checks plus the admission date not preceding the date of birth.
    pub fn check(&self) -> Result<(), crate::error::AppError> {
        self.validate()?;
        if self.admission_date < self.dob {
            return Err(crate::error::AppError::BadRequest(
                "Admission date cannot be before date of birth.".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    match gender {
        "Male" | "Female" | "Other" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_gender")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        serde_json::from_value(serde_json::json!({
            "admission_no": "ADM-001",
            "name": "Asha Verma",
            "father_name": "Rakesh Verma",
            "dob": "2012-04-09",
            "gender": "Female",
            "admission_date": "2018-04-01",
            "class_name": "6",
            "contact_no": "+91 98765-43210"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        assert!(request().check().is_ok());
    }

    #[test]
    fn test_rejects_unknown_gender() {
        let mut req = request();
        req.gender = "male".to_string();
        assert!(req.check().is_err());
    }

    #[test]
    fn test_rejects_admission_before_birth() {
        let mut req = request();
        req.admission_date = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        assert!(req.check().is_err());
    }

    #[test]
    fn test_transport_fields_are_required() {
        let raw = serde_json::json!({ "fees": 1200.0, "start_date": "2024-04-01" });
        assert!(serde_json::from_value::<Transport>(raw).is_err());

        let mut req = request();
        req.transport = Some(Transport {
            fees: 1200.0,
            start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            pickup_point: "".to_string(),
            route: "North".to_string(),
            bus_number: "DL-1".to_string(),
        });
        assert!(req.check().is_err());
    }
}
