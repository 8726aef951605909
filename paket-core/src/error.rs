// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types shared by the whole engine.
//!
//! Every failure is one of five classes: configuration errors raised at
//! registration time, resolution errors raised on first use of a lookup,
//! validation errors raised while checking field constraints, malformed
//! input errors raised while decoding a corrupt stream, and unsupported
//! operations. None of them are retried internally; an error aborts the
//! current operation and propagates to the caller unchanged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid registration, raised synchronously at registration time.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A lookup (codec, group, packet id) found nothing.
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// A range or length constraint was violated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The input stream cannot be decoded.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The operation is not available on this receiver.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn duplicate_codec(type_name: &str) -> Error {
        Error::Configuration(format!(
            "there is already an existing serializer for type {type_name}"
        ))
    }

    pub fn invalid_packet_id(type_name: &str) -> Error {
        Error::Configuration(format!("invalid packet ID for packet {type_name}"))
    }

    pub fn id_collision(id: u32, existing: &str) -> Error {
        Error::Configuration(format!("packet ID {id} is already used by {existing}"))
    }

    pub fn no_dynamic_id(type_name: &str, group: &str) -> Error {
        Error::Configuration(format!(
            "packet {type_name} resolved no dynamic ID for group {group}"
        ))
    }

    pub fn no_codec(type_name: &str) -> Error {
        Error::Resolution(format!("no serializer found for type {type_name}"))
    }

    pub fn unknown_group(group: &str) -> Error {
        Error::Resolution(format!("there is no {group} packet group"))
    }

    pub fn unknown_packet(id: u32, group: &str) -> Error {
        Error::Resolution(format!("there is no packet with id {id} in group {group}"))
    }

    pub fn unregistered_packet(type_name: &str) -> Error {
        Error::Resolution(format!("packet {type_name} is not assigned to any group"))
    }

    pub fn type_mismatch(expected: &str, found: &str) -> Error {
        Error::Resolution(format!("expected {expected} but found {found}"))
    }

    pub fn not_generic(type_name: &str) -> Error {
        Error::Resolution(format!("type {type_name} has no type parameters"))
    }

    pub fn no_parameter(type_name: &str, index: usize) -> Error {
        Error::Resolution(format!(
            "type {type_name} has no type parameter {index}"
        ))
    }

    pub fn out_of_range(got: i128, min: i64, max: i64, inclusive: bool) -> Error {
        let bounds = if inclusive { "inclusive" } else { "exclusive" };
        Error::Validation(format!(
            "value out of bounds, got {got}, expected value between {min} and {max}, {bounds}"
        ))
    }

    pub fn float_out_of_range(got: f64, min: f64, max: f64, inclusive: bool) -> Error {
        let bounds = if inclusive { "inclusive" } else { "exclusive" };
        Error::Validation(format!(
            "value out of bounds, got {got}, expected value between {min} and {max}, {bounds}"
        ))
    }

    pub fn fixed_length_mismatch(expected: usize, got: usize) -> Error {
        Error::Validation(format!("expected length {expected}, got {got}"))
    }

    pub fn length_out_of_bounds(min: usize, max: usize, got: usize) -> Error {
        Error::Validation(format!(
            "expected length between {min} and {max}, got {got}"
        ))
    }

    pub fn buffer_underflow(offset: usize, count: usize, limit: usize) -> Error {
        Error::MalformedInput(format!(
            "cannot read {count} bytes at offset {offset}, buffer holds {limit}"
        ))
    }

    pub fn invalid_data(msg: impl Into<String>) -> Error {
        Error::MalformedInput(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Error {
        Error::Unsupported(msg.into())
    }
}

/// Returns early with the given error when the condition does not hold.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}
