// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! linegate proxy service.
//!
//! Accepts legacy JSON batch writes on `POST /db/{database}`, translates
//! each point into a line-protocol record and forwards one write per
//! point to the downstream server. Every other request is relayed to the
//! same host unchanged.
//!
//! Each inbound request is an independent unit of work: decode the batch,
//! send its points sequentially, map the outcome to a status code. No
//! state is retained across requests.

pub mod dispatch;
pub mod handlers;
pub mod relay;
pub mod routes;

pub use dispatch::{DispatchTarget, Dispatcher, SendError};
pub use relay::{Relay, RelayError};

/// Immutable process configuration, resolved once from CLI flags at
/// startup and handed to the components explicitly.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Downstream server as `host:port`.
    pub server: String,
    /// Log every translated request before sending it.
    pub verbose: bool,
}

/// Shared application state, one per process.
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub relay: Relay,
}

impl AppState {
    /// Build the state from configuration. Fails only if an HTTP client
    /// cannot be constructed.
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            dispatcher: Dispatcher::new(config)?,
            relay: Relay::new(config)?,
        })
    }
}
