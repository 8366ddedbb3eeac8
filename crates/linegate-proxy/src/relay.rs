// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Pass-through relay for requests outside the translation path.
//!
//! Forwards method, path, query, headers and body to the downstream host
//! and mirrors its response. Hop-by-hop headers are stripped in both
//! directions, bodies are streamed through without buffering, and
//! redirects are returned to the client, not followed.

use crate::ProxyConfig;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderName};
use axum::response::Response;
use thiserror::Error;

/// Relay errors. All of them surface to the client as 502.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("downstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("failed to assemble response: {0}")]
    Http(#[from] axum::http::Error),
}

/// Connection-scoped headers that must not cross the proxy.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Single-host reverse proxy to the downstream server.
pub struct Relay {
    client: reqwest::Client,
    server: String,
}

impl Relay {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            server: config.server.clone(),
        })
    }

    /// Forward one request to the downstream host and mirror its
    /// response verbatim.
    pub async fn proxy(&self, req: Request) -> Result<Response, RelayError> {
        let (parts, body) = req.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = format!("http://{}{}", self.server, path_and_query);

        // The client targets us; reqwest sets Host and Content-Length for
        // the downstream leg. Hop-by-hop headers end at this hop.
        let mut headers = HeaderMap::new();
        for (name, value) in parts.headers.iter() {
            if name == &header::HOST || name == &header::CONTENT_LENGTH || is_hop_by_hop(name) {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }

        let upstream = self
            .client
            .request(parts.method, url)
            .headers(headers)
            .body(reqwest::Body::wrap_stream(body.into_data_stream()))
            .send()
            .await?;

        let mut response = Response::builder().status(upstream.status());
        for (name, value) in upstream.headers() {
            if !is_hop_by_hop(name) {
                response = response.header(name.clone(), value.clone());
            }
        }
        Ok(response.body(Body::from_stream(upstream.bytes_stream()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_by_hop_headers_are_recognized() {
        assert!(is_hop_by_hop(&HeaderName::from_static("connection")));
        assert!(is_hop_by_hop(&HeaderName::from_static("transfer-encoding")));
        assert!(!is_hop_by_hop(&header::CONTENT_TYPE));
        assert!(!is_hop_by_hop(&HeaderName::from_static("x-request-id")));
    }
}
