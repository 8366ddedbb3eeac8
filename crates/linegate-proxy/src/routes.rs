// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Route definitions: the translation endpoint plus the relay fallback.

use crate::handlers;
use crate::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the proxy router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/db/:database", post(handlers::write))
        .fallback(handlers::relay)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
