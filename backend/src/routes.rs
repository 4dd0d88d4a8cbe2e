// src/routes.rs

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, classes, exams, feedback, marks, results, root, sections, students},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Auth, result computation and feedback submission are public.
/// * Record management requires a valid token.
/// * Feedback review requires the admin role.
/// * Applies global middleware (Trace, CORS) and injects `AppState`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let student_routes = Router::new()
        .route("/", get(students::list_students).post(students::create_student))
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route(
            "/class/{class_name}/{section}",
            get(students::list_students_by_class),
        )
        .layer(require_auth.clone());

    let class_routes = Router::new()
        .route("/", get(classes::list_classes).post(classes::create_class))
        .route(
            "/{id}",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        )
        .route("/{id}/subjects", put(classes::update_subjects))
        .route(
            "/details/{class_name}/{section}",
            get(classes::get_class_by_name),
        )
        .layer(require_auth.clone());

    let section_routes = Router::new()
        .route("/{class_name}", get(sections::list_sections))
        .layer(require_auth.clone());

    let marks_routes = Router::new()
        .route("/", post(marks::create_marks))
        .route(
            "/{id}",
            get(marks::get_marks)
                .put(marks::update_marks)
                .delete(marks::delete_marks),
        )
        .route("/class/{class_name}/{section}", get(marks::list_class_marks))
        .layer(require_auth.clone());

    let academic_routes = Router::new()
        .route("/class-details", post(classes::save_class_details))
        .route(
            "/student-marks/{student_id}",
            get(results::student_marksheet),
        )
        .route("/class-statistics", get(results::class_stats))
        .route("/class-ranking", get(results::class_ranking))
        .layer(require_auth.clone());

    let result_routes = Router::new().route("/compute", post(results::compute_result));

    let exam_routes = Router::new()
        .route("/", get(exams::list_exams).post(exams::create_exam))
        .route("/{id}", get(exams::get_exam).delete(exams::delete_exam))
        .layer(require_auth.clone());

    let feedback_routes = Router::new()
        .route("/", post(feedback::submit_feedback))
        .merge(
            Router::new()
                .route("/all", get(feedback::list_feedback))
                .route("/stats", get(feedback::feedback_stats))
                // Auth first, then Admin check
                .layer(middleware::from_fn(admin_middleware))
                .layer(require_auth),
        );

    Router::new()
        .route("/api", get(root::welcome))
        .nest("/api/auth", auth_routes)
        .nest("/api/students", student_routes)
        .nest("/api/classes", class_routes)
        .nest("/api/sections", section_routes)
        .nest("/api/marks", marks_routes)
        .nest("/api/academic", academic_routes)
        .nest("/api/results", result_routes)
        .nest("/api/exams", exam_routes)
        .nest("/api/feedback", feedback_routes)
        .fallback(root::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
