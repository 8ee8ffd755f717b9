pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::chart::handlers as chart;
use crate::experiences::handlers as experiences;
use crate::organizer::handlers as organizer;
use crate::report::handlers as report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/login", post(auth::handle_sign_in))
        // Experiences
        .route(
            "/api/v1/experiences",
            get(experiences::handle_list_experiences).post(experiences::handle_create_experience),
        )
        .route(
            "/api/v1/experiences/:id",
            patch(experiences::handle_update_experience)
                .delete(experiences::handle_delete_experience),
        )
        // Story organizer
        .route(
            "/api/v1/stories/organize",
            post(organizer::handle_organize),
        )
        // Charts
        .route("/api/v1/charts/radar", post(chart::handle_radar_layout))
        // Reports
        .route("/api/v1/reports", post(report::handle_generate_report))
        .route("/api/v1/reports/share", post(report::handle_share_report))
        .route(
            "/api/v1/reports/shared/:id",
            get(report::handle_get_shared_report),
        )
        .with_state(state)
}
