//! REST endpoint handlers organized by resource.

pub mod booking;
pub mod feedback;
pub mod report;
pub mod route;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(route::routes())
        .merge(booking::routes())
        .merge(feedback::routes())
        .merge(report::routes())
}
