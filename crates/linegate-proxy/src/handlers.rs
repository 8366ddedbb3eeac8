// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HTTP request handlers.

use crate::dispatch::DispatchTarget;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use linegate_translate::decode_batch;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

/// Credentials relayed from the inbound query string. Absent parameters
/// collapse to empty strings, matching the original form parsing.
#[derive(Debug, Deserialize, Default)]
pub struct WriteParams {
    #[serde(default)]
    pub u: String,
    #[serde(default)]
    pub p: String,
}

/// Plain-text `HTTP <code>: <reason>` reply. Clients get a generic
/// status line, never a structured error payload.
pub fn status_reply(code: StatusCode) -> Response {
    let body = format!(
        "HTTP {}: {}",
        code.as_u16(),
        code.canonical_reason().unwrap_or("")
    );
    (code, body).into_response()
}

/// POST /db/{database} — decode a legacy batch and forward it.
///
/// 400 when the body fails to decode (nothing is forwarded), 500 when
/// any outbound send fails, empty 200 on success.
pub async fn write(
    State(state): State<Arc<AppState>>,
    Path(database): Path<String>,
    params: Option<Query<WriteParams>>,
    body: Bytes,
) -> Response {
    // Form-value semantics: a query string that fails to parse collapses
    // to empty credentials instead of a framework rejection, keeping the
    // plain-text error surface uniform.
    let params = params.map(|Query(params)| params).unwrap_or_default();

    let batch = match decode_batch(&body) {
        Ok(batch) => batch,
        Err(err) => {
            warn!("HTTP 400: {}", err);
            return status_reply(StatusCode::BAD_REQUEST);
        }
    };

    let target = DispatchTarget {
        database,
        username: params.u,
        password: params.p,
    };

    match state.dispatcher.dispatch(&target, &batch).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => {
            warn!("HTTP 500: {}", err);
            status_reply(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Fallback — relay everything else to the downstream host untouched.
pub async fn relay(State(state): State<Arc<AppState>>, req: Request) -> Response {
    match state.relay.proxy(req).await {
        Ok(response) => response,
        Err(err) => {
            warn!("relay failed: {}", err);
            status_reply(StatusCode::BAD_GATEWAY)
        }
    }
}
