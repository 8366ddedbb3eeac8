// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequential forwarding of translated records to the downstream server.
//!
//! One outbound `POST /write` per point, in message and point order. A
//! point that fails to encode is logged and skipped; the first network
//! failure or non-success status aborts the whole dispatch. Points
//! already sent stay sent, the downstream is not transactional.

use crate::ProxyConfig;
use linegate_translate::{LegacyMessage, RecordEncoder};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Timeout for a single outbound write. The original design had none; a
/// hung downstream would have pinned the inbound request forever.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a batch is written, resolved per inbound request from the URL
/// path and query string. Credentials are relayed as received, in the
/// cleartext query string the downstream expects.
#[derive(Debug, Clone)]
pub struct DispatchTarget {
    pub database: String,
    pub username: String,
    pub password: String,
}

/// Dispatch errors. Both variants abort the remainder of the request.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to send to server: {0}")]
    Network(#[from] reqwest::Error),

    #[error("got HTTP {status} from server: {body}")]
    Status { status: StatusCode, body: String },
}

/// Forwards translated records to the downstream `/write` endpoint.
pub struct Dispatcher {
    client: reqwest::Client,
    encoder: RecordEncoder,
    server: String,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            client,
            encoder: RecordEncoder::default(),
            server: config.server.clone(),
            verbose: config.verbose,
        })
    }

    /// Send every point of every message, strictly in order, one write at
    /// a time.
    ///
    /// Returns `Ok(())` only if nothing past the encode step failed.
    /// Points skipped for encode errors do not count against success.
    pub async fn dispatch(
        &self,
        target: &DispatchTarget,
        batch: &[LegacyMessage],
    ) -> Result<(), SendError> {
        let url = format!("http://{}/write", self.server);

        for msg in batch {
            for point in &msg.points {
                let record = match self.encoder.encode(&msg.name, &msg.columns, point) {
                    Ok(record) => record,
                    Err(err) => {
                        warn!("couldn't format point for '{}': {}", msg.name, err);
                        continue;
                    }
                };

                if self.verbose {
                    info!("{} db={} {}", url, target.database, record);
                } else {
                    debug!("{} db={} {}", url, target.database, record);
                }

                let response = self
                    .client
                    .post(&url)
                    .query(&[
                        ("db", target.database.as_str()),
                        ("u", target.username.as_str()),
                        ("p", target.password.as_str()),
                    ])
                    .header(CONTENT_TYPE, "text/plain")
                    .body(record)
                    .send()
                    .await?;

                let status = response.status();
                if status.as_u16() >= 300 {
                    let body = response.text().await.unwrap_or_default();
                    return Err(SendError::Status { status, body });
                }
            }
        }

        Ok(())
    }
}
