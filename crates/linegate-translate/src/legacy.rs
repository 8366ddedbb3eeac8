// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Legacy JSON batch decoding.
//!
//! The pre-line-protocol write format: a JSON array of messages, each
//! carrying a series name, a column-name list, and rows of untyped
//! values. Column order is significant: `columns[i]` names the value at
//! position `i` of every point.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// One series worth of points from a legacy batch.
///
/// Values stay untyped at decode time; [`crate::line::RecordEncoder`]
/// down-casts them per field when the record is built.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyMessage {
    /// Series (measurement) name.
    #[serde(alias = "Name")]
    pub name: String,
    /// Field names, order-significant.
    #[serde(alias = "Columns")]
    pub columns: Vec<String>,
    /// Rows of values; each row is expected to match `columns` in length.
    #[serde(alias = "Points")]
    pub points: Vec<Vec<Value>>,
}

/// Malformed inbound batch.
///
/// Decoding is strict: a batch with any structural problem is rejected
/// whole, nothing is salvaged.
#[derive(Debug, Error)]
#[error("malformed legacy batch: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decode a legacy batch body into its messages, preserving message,
/// column, and point order exactly as given.
pub fn decode_batch(bytes: &[u8]) -> Result<Vec<LegacyMessage>, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}
