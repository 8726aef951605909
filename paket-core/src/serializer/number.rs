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

//! Arbitrary-precision numbers carried as decimal text.
//!
//! The engine does no arithmetic on these values. It validates the
//! spelling on construction and on the read path, then moves the text
//! across the wire through the string codec.

use std::fmt;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::metadata::{check_float_range, check_range, Metadata};
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

fn strip_sign(text: &str) -> &str {
    text.strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text)
}

/// Canonicalizes an integer spelling: sign folded, redundant zeros
/// dropped, `-0` collapsed to `0`.
fn normalize_integer(text: &str) -> Result<String, Error> {
    let negative = text.starts_with('-');
    let digits = strip_sign(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_data(format!("not a valid integer: {text}")));
    }
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    if negative && trimmed != "0" {
        Ok(format!("-{trimmed}"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn validate_decimal(text: &str) -> Result<(), Error> {
    let rest = strip_sign(text);
    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let valid_mantissa = (!int_part.is_empty() || !frac_part.is_empty())
        && all_digits(int_part)
        && all_digits(frac_part);
    let valid_exponent = match exponent {
        Some(exp) => {
            let exp = strip_sign(exp);
            !exp.is_empty() && all_digits(exp)
        }
        None => true,
    };
    if !valid_mantissa || !valid_exponent {
        return Err(Error::invalid_data(format!("not a valid decimal: {text}")));
    }
    Ok(())
}

/// An arbitrary-precision integer in canonical decimal spelling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInteger(String);

impl BigInteger {
    pub fn new(text: impl Into<String>) -> Result<BigInteger, Error> {
        let text = text.into();
        Ok(BigInteger(normalize_integer(&text)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> BigInteger {
        BigInteger(value.to_string())
    }
}

/// An arbitrary-precision decimal.
///
/// The spelling is kept as written apart from a folded leading plus, so
/// two spellings of the same magnitude (`1.0` and `1.00`) are distinct
/// values and distinct wire images.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigDecimal(String);

impl BigDecimal {
    pub fn new(text: impl Into<String>) -> Result<BigDecimal, Error> {
        let text = text.into();
        validate_decimal(&text)?;
        match text.strip_prefix('+') {
            Some(rest) => Ok(BigDecimal(rest.to_string())),
            None => Ok(BigDecimal(text)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for BigDecimal {
    fn from(value: i64) -> BigDecimal {
        BigDecimal(value.to_string())
    }
}

fn check_integer_range(metadata: Option<&Metadata>, text: &str) -> Result<(), Error> {
    let Some(range) = metadata.and_then(|m| m.range) else {
        return Ok(());
    };
    match text.parse::<i128>() {
        Ok(value) => check_range(metadata, value),
        // Anything that overflows i128 lies outside every expressible range.
        Err(_) => Err(Error::Validation(format!(
            "value {text} does not fit the expected range between {} and {}",
            range.min, range.max
        ))),
    }
}

fn check_decimal_range(metadata: Option<&Metadata>, text: &str) -> Result<(), Error> {
    let Some(range) = metadata.and_then(|m| m.float_range) else {
        return Ok(());
    };
    match text.parse::<f64>() {
        Ok(value) => check_float_range(metadata, value),
        Err(_) => Err(Error::Validation(format!(
            "value {text} does not fit the expected range between {} and {}",
            range.min, range.max
        ))),
    }
}

/// Serializes [`BigInteger`] as its decimal text.
#[derive(Default)]
pub struct BigIntegerCodec;

impl Serializer<BigInteger> for BigIntegerCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &BigInteger,
    ) -> Result<(), Error> {
        check_integer_range(context.metadata(), value.as_str())?;
        let codec = context.provider().get_for::<String>()?;
        codec.serialize(context, visitor, &value.0)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<BigInteger, Error> {
        let codec = context.provider().get_for::<String>()?;
        let text = codec.deserialize(context, visitor)?;
        let value = BigInteger::new(text)?;
        check_integer_range(context.metadata(), value.as_str())?;
        Ok(value)
    }
}

/// Serializes [`BigDecimal`] as its decimal text.
#[derive(Default)]
pub struct BigDecimalCodec;

impl Serializer<BigDecimal> for BigDecimalCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &BigDecimal,
    ) -> Result<(), Error> {
        check_decimal_range(context.metadata(), value.as_str())?;
        let codec = context.provider().get_for::<String>()?;
        codec.serialize(context, visitor, &value.0)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<BigDecimal, Error> {
        let codec = context.provider().get_for::<String>()?;
        let text = codec.deserialize(context, visitor)?;
        let value = BigDecimal::new(text)?;
        check_decimal_range(context.metadata(), value.as_str())?;
        Ok(value)
    }
}
