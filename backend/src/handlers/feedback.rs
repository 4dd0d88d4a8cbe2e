// src/handlers/feedback.rs

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    error::AppError,
    models::feedback::{
        CreateFeedbackRequest, FEEDBACK_COLUMNS, Feedback, FeedbackListParams, FeedbackPage,
        FeedbackStats, Pagination,
    },
    utils::html::{strip_markup, strip_markup_opt},
};

/// Submits parent feedback. Public.
pub async fn submit_feedback(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let text = strip_markup(&payload.feedback);
    if text.trim().is_empty() {
        return Err(AppError::BadRequest("Feedback text cannot be empty".to_string()));
    }

    let feedback = sqlx::query_as::<_, Feedback>(&format!(
        r#"
        INSERT INTO feedback
            (parent_name, student_name, email, class_name, category, rating, feedback, suggestions)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {FEEDBACK_COLUMNS}
        "#
    ))
    .bind(strip_markup(payload.parent_name.trim()))
    .bind(strip_markup(payload.student_name.trim()))
    .bind(payload.email.trim().to_lowercase())
    .bind(payload.class_name.trim())
    .bind(&payload.category)
    .bind(payload.rating)
    .bind(text.trim())
    .bind(strip_markup_opt(payload.suggestions.as_deref()))
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to submit feedback: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Feedback submitted successfully",
            "feedback": feedback
        })),
    ))
}

/// Lists feedback, newest first. Admin only.
///
/// Supports category, date range (both bounds required), minimum rating and
/// page/limit pagination.
pub async fn list_feedback(
    State(pool): State<PgPool>,
    Query(params): Query<FeedbackListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM feedback WHERE TRUE");
    push_filters(&mut count_query, &params);
    let total: i64 = count_query
        .build_query_scalar()
        .fetch_one(&pool)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let mut list_query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE TRUE"
    ));
    push_filters(&mut list_query, &params);
    list_query
        .push(" ORDER BY submitted_at DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(page_offset(page, limit));

    let feedback: Vec<Feedback> = list_query
        .build_query_as()
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list feedback: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(FeedbackPage {
        feedback,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// Average rating, total count and per-category counts. Admin only.
pub async fn feedback_stats(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let (average, total) = sqlx::query_as::<_, (Option<f64>, i64)>(
        "SELECT AVG(rating)::FLOAT8, COUNT(*) FROM feedback",
    )
    .fetch_one(&pool)
    .await?;

    let categories = sqlx::query_as::<_, (String, i64)>(
        "SELECT category, COUNT(*) FROM feedback GROUP BY category",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(FeedbackStats {
        average_rating: round2(average.unwrap_or(0.0)),
        total_feedback: total,
        category_distribution: categories.into_iter().collect::<BTreeMap<_, _>>(),
    }))
}

fn push_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, params: &'a FeedbackListParams) {
    if let Some(category) = &params.category {
        query.push(" AND category = ").push_bind(category);
    }
    if let (Some(start), Some(end)) = (params.start_date, params.end_date) {
        query
            .push(" AND submitted_at BETWEEN ")
            .push_bind(start)
            .push(" AND ")
            .push_bind(end);
    }
    if let Some(min_rating) = params.min_rating {
        query.push(" AND rating >= ").push_bind(min_rating);
    }
}

/// Rows to skip for a 1-based page. Saturates instead of overflowing on huge pages.
fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
