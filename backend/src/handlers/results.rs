// src/handlers/results.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Serialize;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    grading::{
        ExamResult, Grade, Ranked, ResultSummary, Verdict, class_statistics, rank_by_percentage,
    },
    handlers::{classes::find_class, marks::fetch_class_marks, marks::fetch_marks, students::fetch_student},
    models::{
        class_details::ClassDetails,
        marks::{ClassSelection, MarkSheet, MarksRecord, YearParams},
        student::Student,
    },
};

/// Everything printed on a student's marksheet.
#[derive(Debug, Serialize)]
pub struct Marksheet {
    pub student: Student,
    pub class_details: Option<ClassDetails>,
    pub marks: Option<MarksRecord>,
    /// Absent when no marks are on record for the year.
    pub result: Option<ResultSummary>,
}

/// One row of the class ranking.
#[derive(Debug, Serialize)]
pub struct Standing {
    pub student_id: i64,
    pub student_name: String,
    pub admission_no: String,
    pub percentage: f64,
    pub grade: Grade,
    pub result: Verdict,
}

/// Evaluates a posted mark record without storing anything.
pub async fn compute_result(Json(payload): Json<MarkSheet>) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    Ok(Json(crate::grading::overall_result(&payload.marks)))
}

/// Builds the marksheet of a student for one academic year.
pub async fn student_marksheet(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Path(student_id): Path<i64>,
    Query(params): Query<YearParams>,
) -> Result<impl IntoResponse, AppError> {
    let academic_year = params
        .academic_year
        .unwrap_or_else(|| config.default_academic_year.clone());

    let student = fetch_student(&pool, student_id).await?;
    let marks = fetch_marks(&pool, student.id, Some(&academic_year)).await?;
    let class_details = find_class(&pool, &student.class_name, &student.section, &academic_year).await?;
    let result = marks.as_ref().map(MarksRecord::summary);

    Ok(Json(Marksheet {
        student,
        class_details,
        marks,
        result,
    }))
}

/// Summary statistics of a class section for one year.
///
/// With `exam_type`, each student contributes that exam's percentage; without
/// it, their overall percentage.
pub async fn class_stats(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Query(params): Query<ClassSelection>,
) -> Result<impl IntoResponse, AppError> {
    let academic_year = params
        .academic_year
        .unwrap_or_else(|| config.default_academic_year.clone());

    let records = fetch_class_marks(&pool, &params.class_name, &params.section, Some(&academic_year)).await?;

    let statistics = match params.exam_type {
        Some(exam) => class_statistics(
            records
                .iter()
                .map(|r| ExamResult::compute(r.record.subjects(), exam)),
        ),
        None => class_statistics(records.iter().map(|r| r.record.summary().overall)),
    };

    tracing::debug!(
        "Class {}-{} {}: {} students, average {:.2}",
        params.class_name,
        params.section,
        academic_year,
        statistics.total_students,
        statistics.average_percentage
    );

    Ok(Json(statistics))
}

/// Students of a class section ordered by overall percentage.
/// Equal percentages share a rank.
pub async fn class_ranking(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Query(params): Query<ClassSelection>,
) -> Result<impl IntoResponse, AppError> {
    let academic_year = params
        .academic_year
        .unwrap_or_else(|| config.default_academic_year.clone());

    let records = fetch_class_marks(&pool, &params.class_name, &params.section, Some(&academic_year)).await?;

    let standings: Vec<Standing> = records
        .into_iter()
        .map(|r| {
            let overall = r.record.summary().overall;
            Standing {
                student_id: r.record.student_id,
                student_name: r.student_name,
                admission_no: r.admission_no,
                percentage: overall.percentage,
                grade: overall.grade,
                result: overall.result,
            }
        })
        .collect();

    let ranked: Vec<Ranked<Standing>> = rank_by_percentage(standings, |s| s.percentage);

    Ok(Json(ranked))
}
