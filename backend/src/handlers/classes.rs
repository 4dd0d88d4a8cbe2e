// src/handlers/classes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    config::{DEFAULT_CLASS_TEACHER, DEFAULT_SECTION},
    error::{AppError, conflict_or_internal},
    models::class_details::{
        ClassDetails, ClassWithCount, CreateClassRequest, SaveClassDetailsRequest, SubjectTeacher,
        UpdateClassRequest, UpdateSubjectsRequest,
    },
};

/// Class columns plus the live student count of the (class_name, section)
/// pair in that academic year.
const CLASS_WITH_COUNT: &str = r#"
    SELECT
        c.id, c.class_name, c.section, c.academic_year, c.class_teacher,
        c.subjects, c.created_at, c.updated_at,
        (SELECT COUNT(*) FROM students s
         WHERE s.class_name = c.class_name AND s.section = c.section
           AND s.session = c.academic_year) AS student_count
    FROM class_details c
"#;

const CLASS_COLUMNS: &str =
    "id, class_name, section, academic_year, class_teacher, subjects, created_at, updated_at";

/// Lists classes, newest first, each with its student count.
pub async fn list_classes(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let classes = sqlx::query_as::<_, ClassWithCount>(&format!(
        "{CLASS_WITH_COUNT} ORDER BY c.created_at DESC, c.id DESC"
    ))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list classes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(classes))
}

pub async fn get_class(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(fetch_class_with_count(&pool, id).await?))
}

/// Looks a class up by name and section. The most recent academic year wins.
pub async fn get_class_by_name(
    State(pool): State<PgPool>,
    Path((class_name, section)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let class = sqlx::query_as::<_, ClassDetails>(&format!(
        r#"
        SELECT {CLASS_COLUMNS} FROM class_details
        WHERE class_name = $1 AND section = $2
        ORDER BY academic_year DESC
        LIMIT 1
        "#
    ))
    .bind(&class_name)
    .bind(&section)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| {
        tracing::debug!("No class found for {} {}", class_name, section);
        AppError::NotFound("Class not found".to_string())
    })?;

    Ok(Json(class))
}

/// Creates a class with no subjects.
pub async fn create_class(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let section = payload.section.as_deref().unwrap_or(DEFAULT_SECTION).trim();
    let class_teacher = payload
        .class_teacher
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CLASS_TEACHER);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO class_details (class_name, section, academic_year, class_teacher)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(payload.class_name.trim())
    .bind(section)
    .bind(&payload.academic_year)
    .bind(class_teacher)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        conflict_or_internal(
            e,
            format!(
                "Class {}-{} already exists for {}",
                payload.class_name, section, payload.academic_year
            ),
        )
    })?;

    let class = fetch_class_with_count(&pool, id).await?;
    tracing::info!("Created class {}-{}", class.class.class_name, class.class.section);

    Ok((StatusCode::CREATED, Json(class)))
}

/// Replaces a class, including its subject list.
pub async fn update_class(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let subjects = SubjectTeacher::normalize_all(payload.subjects)?;
    let class_teacher = payload
        .class_teacher
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CLASS_TEACHER);

    let updated = sqlx::query(
        r#"
        UPDATE class_details SET
            academic_year = $1, class_name = $2, section = $3,
            class_teacher = $4, subjects = $5, updated_at = NOW()
        WHERE id = $6
        "#,
    )
    .bind(&payload.academic_year)
    .bind(payload.class_name.trim())
    .bind(payload.section.trim())
    .bind(class_teacher)
    .bind(SqlJson(&subjects))
    .bind(id)
    .execute(&pool)
    .await
    .map_err(|e| conflict_or_internal(e, "Another class already uses this name, section and year"))?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Class not found".to_string()));
    }

    Ok(Json(fetch_class_with_count(&pool, id).await?))
}

/// Replaces only the subject list of a class.
pub async fn update_subjects(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSubjectsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let subjects = SubjectTeacher::normalize_all(payload.subjects)?;

    let updated = sqlx::query(
        "UPDATE class_details SET subjects = $1, updated_at = NOW() WHERE id = $2",
    )
    .bind(SqlJson(&subjects))
    .bind(id)
    .execute(&pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Class not found".to_string()));
    }

    Ok(Json(fetch_class_with_count(&pool, id).await?))
}

pub async fn delete_class(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM class_details WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete class: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Class not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Saves the subject list for (class_name, section, academic_year),
/// creating the class when it does not exist yet.
///
/// Returns 201 on create and 200 on update.
pub async fn save_class_details(
    State(pool): State<PgPool>,
    Json(payload): Json<SaveClassDetailsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let subjects = SubjectTeacher::normalize_all(payload.subjects)?;

    // xmax = 0 only for freshly inserted rows.
    let (id, inserted) = sqlx::query_as::<_, (i64, bool)>(
        r#"
        INSERT INTO class_details (class_name, section, academic_year, class_teacher, subjects)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (class_name, section, academic_year) DO UPDATE SET
            subjects = EXCLUDED.subjects,
            updated_at = NOW()
        RETURNING id, (xmax = 0) AS inserted
        "#,
    )
    .bind(payload.class_name.trim())
    .bind(payload.section.trim())
    .bind(&payload.academic_year)
    .bind(DEFAULT_CLASS_TEACHER)
    .bind(SqlJson(&subjects))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to save class details: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let details = fetch_class_with_count(&pool, id).await?;
    let status = if inserted { StatusCode::CREATED } else { StatusCode::OK };

    Ok((status, Json(details)))
}

pub(crate) async fn fetch_class_with_count(pool: &PgPool, id: i64) -> Result<ClassWithCount, AppError> {
    sqlx::query_as::<_, ClassWithCount>(&format!("{CLASS_WITH_COUNT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Class not found".to_string()))
}

/// Finds the class record matching a student's class, section and year.
pub(crate) async fn find_class(
    pool: &PgPool,
    class_name: &str,
    section: &str,
    academic_year: &str,
) -> Result<Option<ClassDetails>, AppError> {
    let class = sqlx::query_as::<_, ClassDetails>(&format!(
        "SELECT {CLASS_COLUMNS} FROM class_details WHERE class_name = $1 AND section = $2 AND academic_year = $3"
    ))
    .bind(class_name)
    .bind(section)
    .bind(academic_year)
    .fetch_optional(pool)
    .await?;

    Ok(class)
}
