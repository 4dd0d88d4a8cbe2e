// src/handlers/students.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, types::Json as SqlJson};

use crate::{
    config::{Config, DEFAULT_SECTION},
    error::{AppError, conflict_or_internal},
    models::student::{CreateStudentRequest, STUDENT_COLUMNS, Student},
};

/// Lists every student, sorted by name.
pub async fn list_students(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students ORDER BY name"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list students: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(students))
}

/// Lists the students of one class section, sorted by name.
pub async fn list_students_by_class(
    State(pool): State<PgPool>,
    Path((class_name, section)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE class_name = $1 AND section = $2 ORDER BY name"
    ))
    .bind(&class_name)
    .bind(&section)
    .fetch_all(&pool)
    .await?;

    tracing::debug!(
        "Fetched {} students for class {} section {}",
        students.len(),
        class_name,
        section
    );

    Ok(Json(students))
}

pub async fn get_student(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = fetch_student(&pool, id).await?;
    Ok(Json(student))
}

/// Creates a student.
///
/// Section falls back to "A" and session to the configured academic year.
/// A duplicate admission number is a 409.
pub async fn create_student(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.check()?;

    let section = payload.section.clone().unwrap_or_else(|| DEFAULT_SECTION.to_string());
    let session = payload
        .session
        .clone()
        .unwrap_or_else(|| config.default_academic_year.clone());

    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students
            (admission_no, name, father_name, dob, gender, admission_date,
             class_name, section, address, contact_no, session, transport)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(payload.admission_no.trim())
    .bind(payload.name.trim())
    .bind(payload.father_name.trim())
    .bind(payload.dob)
    .bind(&payload.gender)
    .bind(payload.admission_date)
    .bind(&payload.class_name)
    .bind(&section)
    .bind(&payload.address)
    .bind(&payload.contact_no)
    .bind(&session)
    .bind(payload.transport.clone().map(SqlJson))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        conflict_or_internal(
            e,
            format!("Admission number '{}' already exists", payload.admission_no.trim()),
        )
    })?;

    tracing::info!("Created student {} ({})", student.name, student.admission_no);

    Ok((StatusCode::CREATED, Json(student)))
}

/// Replaces a student's details.
pub async fn update_student(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.check()?;

    let section = payload.section.clone().unwrap_or_else(|| DEFAULT_SECTION.to_string());
    let session = payload
        .session
        .clone()
        .unwrap_or_else(|| config.default_academic_year.clone());

    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        UPDATE students SET
            admission_no = $1, name = $2, father_name = $3, dob = $4, gender = $5,
            admission_date = $6, class_name = $7, section = $8, address = $9,
            contact_no = $10, session = $11, transport = $12, updated_at = NOW()
        WHERE id = $13
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(payload.admission_no.trim())
    .bind(payload.name.trim())
    .bind(payload.father_name.trim())
    .bind(payload.dob)
    .bind(&payload.gender)
    .bind(payload.admission_date)
    .bind(&payload.class_name)
    .bind(&section)
    .bind(&payload.address)
    .bind(&payload.contact_no)
    .bind(&session)
    .bind(payload.transport.clone().map(SqlJson))
    .bind(id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        conflict_or_internal(
            e,
            format!("Admission number '{}' already exists", payload.admission_no.trim()),
        )
    })?
    .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Deletes a student. Their marks go with them.
pub async fn delete_student(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete student: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn fetch_student(pool: &PgPool, id: i64) -> Result<Student, AppError> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))
}
