// src/handlers/marks.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, conflict_or_internal},
    handlers::students::fetch_student,
    models::marks::{
        CreateMarksRequest, MARKS_COLUMNS, MarksRecord, StudentMarks, UpdateMarksRequest,
        YearParams,
    },
};

/// Marks of one student. Without `academic_year`, the latest year on record.
pub async fn get_marks(
    State(pool): State<PgPool>,
    Path(student_id): Path<i64>,
    Query(params): Query<YearParams>,
) -> Result<impl IntoResponse, AppError> {
    let record = fetch_marks(&pool, student_id, params.academic_year.as_deref())
        .await?
        .ok_or(AppError::NotFound("Marks not found".to_string()))?;

    Ok(Json(record))
}

/// Marks records of one class section, joined with student names.
pub async fn list_class_marks(
    State(pool): State<PgPool>,
    Path((class_name, section)): Path<(String, String)>,
    Query(params): Query<YearParams>,
) -> Result<impl IntoResponse, AppError> {
    let records = fetch_class_marks(&pool, &class_name, &section, params.academic_year.as_deref())
        .await?;

    tracing::debug!(
        "Found {} marks records for class {} section {}",
        records.len(),
        class_name,
        section
    );

    Ok(Json(records))
}

/// Creates the marks record for a student and year.
///
/// Class and section are copied from the student. One record per
/// (student, academic_year); a second insert is a 409.
pub async fn create_marks(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<CreateMarksRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let student = fetch_student(&pool, payload.student_id).await?;
    let academic_year = payload
        .academic_year
        .unwrap_or_else(|| config.default_academic_year.clone());

    let record = sqlx::query_as::<_, MarksRecord>(&format!(
        r#"
        INSERT INTO marks (student_id, academic_year, class_name, section, marks)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {MARKS_COLUMNS}
        "#
    ))
    .bind(student.id)
    .bind(&academic_year)
    .bind(&student.class_name)
    .bind(&student.section)
    .bind(SqlJson(&payload.marks))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        conflict_or_internal(
            e,
            format!("Marks for {} in {} already exist", student.admission_no, academic_year),
        )
    })?;

    tracing::info!("Created marks for student {} ({})", student.name, academic_year);

    Ok((StatusCode::CREATED, Json(record)))
}

/// Replaces the marks of a student for one year.
pub async fn update_marks(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Path(student_id): Path<i64>,
    Json(payload): Json<UpdateMarksRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let academic_year = payload
        .academic_year
        .unwrap_or_else(|| config.default_academic_year.clone());

    let record = sqlx::query_as::<_, MarksRecord>(&format!(
        r#"
        UPDATE marks SET marks = $1, updated_at = NOW()
        WHERE student_id = $2 AND academic_year = $3
        RETURNING {MARKS_COLUMNS}
        "#
    ))
    .bind(SqlJson(&payload.marks))
    .bind(student_id)
    .bind(&academic_year)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update marks: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Marks not found".to_string()))?;

    Ok(Json(record))
}

pub async fn delete_marks(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM marks WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete marks: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Marks not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Loads a student's marks for `academic_year`, or for their latest year.
pub(crate) async fn fetch_marks(
    pool: &PgPool,
    student_id: i64,
    academic_year: Option<&str>,
) -> Result<Option<MarksRecord>, AppError> {
    let record = sqlx::query_as::<_, MarksRecord>(&format!(
        r#"
        SELECT {MARKS_COLUMNS} FROM marks
        WHERE student_id = $1 AND ($2::TEXT IS NULL OR academic_year = $2)
        ORDER BY academic_year DESC
        LIMIT 1
        "#
    ))
    .bind(student_id)
    .bind(academic_year)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Loads every marks record of a class section, ordered by student name.
/// Without `academic_year` all years are returned.
pub(crate) async fn fetch_class_marks(
    pool: &PgPool,
    class_name: &str,
    section: &str,
    academic_year: Option<&str>,
) -> Result<Vec<StudentMarks>, AppError> {
    let records = sqlx::query_as::<_, StudentMarks>(
        r#"
        SELECT
            m.id, m.student_id, m.academic_year, m.class_name, m.section,
            m.marks, m.created_at, m.updated_at,
            s.name AS student_name, s.admission_no, s.father_name
        FROM marks m
        JOIN students s ON s.id = m.student_id
        WHERE m.class_name = $1 AND m.section = $2
          AND ($3::TEXT IS NULL OR m.academic_year = $3)
        ORDER BY s.name, m.academic_year
        "#,
    )
    .bind(class_name)
    .bind(section)
    .bind(academic_year)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch class marks: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(records)
}
