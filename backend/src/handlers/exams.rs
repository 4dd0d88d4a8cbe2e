// src/handlers/exams.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::exam::{CreateExamRequest, EXAM_COLUMNS, Exam, ExamListParams},
};

/// Lists scheduled exams in date order, optionally filtered.
pub async fn list_exams(
    State(pool): State<PgPool>,
    Query(params): Query<ExamListParams>,
) -> Result<impl IntoResponse, AppError> {
    let exams = sqlx::query_as::<_, Exam>(&format!(
        r#"
        SELECT {EXAM_COLUMNS} FROM exams
        WHERE ($1::TEXT IS NULL OR class_name = $1)
          AND ($2::TEXT IS NULL OR section = $2)
          AND ($3::TEXT IS NULL OR session = $3)
        ORDER BY exam_date, start_time
        "#
    ))
    .bind(params.class_name)
    .bind(params.section)
    .bind(params.session)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list exams: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(exams))
}

pub async fn get_exam(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = sqlx::query_as::<_, Exam>(&format!("SELECT {EXAM_COLUMNS} FROM exams WHERE id = $1"))
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(exam))
}

pub async fn create_exam(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.check()?;

    let exam = sqlx::query_as::<_, Exam>(&format!(
        r#"
        INSERT INTO exams
            (exam_type, class_name, section, subject, exam_date,
             start_time, end_time, max_marks, session)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {EXAM_COLUMNS}
        "#
    ))
    .bind(&payload.exam_type)
    .bind(&payload.class_name)
    .bind(&payload.section)
    .bind(payload.subject.trim())
    .bind(payload.exam_date)
    .bind(&payload.start_time)
    .bind(&payload.end_time)
    .bind(payload.max_marks)
    .bind(&payload.session)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create exam: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(exam)))
}

pub async fn delete_exam(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM exams WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
