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

//! Field-level serialization constraints.
//!
//! A [`Metadata`] travels inside a type descriptor and is consulted by the
//! serializer that handles the described value. Constraints are enforced on
//! both the write and the read path, so a peer sending out-of-contract data
//! fails at the boundary instead of producing a half-valid packet.

use crate::error::Error;
use crate::resolver::provider::CodecKey;

/// Bounds on the length of a string, collection, map or byte array.
#[derive(Clone, Copy, Debug)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// Bounds on an integral value.
///
/// When `inclusive` is set the bounds themselves are legal values,
/// otherwise only the open interval between them is.
#[derive(Clone, Copy, Debug)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
    pub inclusive: bool,
}

/// Bounds on a floating point value.
#[derive(Clone, Copy, Debug)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
    pub inclusive: bool,
}

/// Per-field serialization options attached to a type descriptor.
///
/// All fields default to "no constraint". The derive macro populates this
/// from field attributes; handwritten descriptors can set it through
/// [`TypeDescriptor::with_metadata`](crate::resolver::descriptor::TypeDescriptor::with_metadata).
#[derive(Clone, Debug, Default)]
pub struct Metadata {
    /// Skip the field entirely. Reads restore it to its type default.
    pub ignore: bool,
    /// The value must have exactly this length.
    pub fixed_length: Option<usize>,
    /// The value length must fall within these bounds.
    pub length: Option<LengthBounds>,
    /// Integral values must fall within these bounds.
    pub range: Option<IntRange>,
    /// Floating point values must fall within these bounds.
    pub float_range: Option<FloatRange>,
    /// Suppress the length prefix. Requires `fixed_length`.
    pub no_prefix: bool,
    /// Serialize with this exact codec instead of resolving one.
    pub codec: Option<CodecKey>,
    /// Codec identity to use when no explicit override is present.
    pub alias: Option<CodecKey>,
    /// Codec override for the elements of a container.
    pub element_codec: Option<CodecKey>,
    /// Codec used to encode the length prefix itself.
    pub length_with: Option<CodecKey>,
}

/// Validates an integral value against the range constraint, if any.
pub fn check_range(metadata: Option<&Metadata>, value: i128) -> Result<(), Error> {
    let Some(range) = metadata.and_then(|m| m.range) else {
        return Ok(());
    };
    let (min, max) = (range.min as i128, range.max as i128);
    let outside = if range.inclusive {
        value < min || value > max
    } else {
        value <= min || value >= max
    };
    if outside {
        return Err(Error::out_of_range(value, range.min, range.max, range.inclusive));
    }
    Ok(())
}

/// Validates a floating point value against the range constraint, if any.
pub fn check_float_range(metadata: Option<&Metadata>, value: f64) -> Result<(), Error> {
    let Some(range) = metadata.and_then(|m| m.float_range) else {
        return Ok(());
    };
    let outside = if range.inclusive {
        value < range.min || value > range.max
    } else {
        value <= range.min || value >= range.max
    };
    if outside {
        return Err(Error::float_out_of_range(value, range.min, range.max, range.inclusive));
    }
    Ok(())
}

/// Validates a length against the fixed-length and bounds constraints, if any.
pub fn check_length(metadata: Option<&Metadata>, length: usize) -> Result<(), Error> {
    if let Some(fixed) = metadata.and_then(|m| m.fixed_length) {
        if length != fixed {
            return Err(Error::fixed_length_mismatch(fixed, length));
        }
    }
    if let Some(bounds) = metadata.and_then(|m| m.length) {
        if length < bounds.min || length > bounds.max {
            return Err(Error::length_out_of_bounds(bounds.min, bounds.max, length));
        }
    }
    Ok(())
}
