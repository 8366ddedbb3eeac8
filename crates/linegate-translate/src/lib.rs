// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Legacy batch to line-protocol translation.
//!
//! Decodes the old JSON write format (a series name, a column list, and
//! rows of untyped values) and encodes each row as a single
//! `name field1=value1,field2=value2` line-protocol record.
//!
//! This crate performs no I/O. Sending records to the downstream server
//! is the proxy's job.
//!
//! ```text
//! JSON batch --> LegacyMessage --> RecordEncoder --> "name k1=v1,k2=v2"
//! ```

pub mod legacy;
pub mod line;

pub use legacy::{decode_batch, DecodeError, LegacyMessage};
pub use line::{EncodeError, RecordEncoder, UnsupportedFieldPolicy};
