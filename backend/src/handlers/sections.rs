// src/handlers/sections.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{config::Config, error::AppError, models::marks::YearParams};

/// Distinct sections of a class in one academic year, sorted.
/// Falls back to the configured default sections when the class has none.
pub async fn list_sections(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Path(class_name): Path<String>,
    Query(params): Query<YearParams>,
) -> Result<impl IntoResponse, AppError> {
    let academic_year = params
        .academic_year
        .unwrap_or_else(|| config.default_academic_year.clone());

    let sections = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT section FROM class_details
        WHERE class_name = $1 AND academic_year = $2
        ORDER BY section
        "#,
    )
    .bind(&class_name)
    .bind(&academic_year)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch sections: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if sections.is_empty() {
        return Ok(Json(config.default_sections));
    }

    Ok(Json(sections))
}
