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

//! Bit set type and codec.

use crate::buffer::DataVisitor;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::serializer::{read_size, write_size, Serializer};

/// A growable set of bit flags packed into 64-bit words.
///
/// Trailing zero words are trimmed after every mutation, so two sets
/// holding the same bits always compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    pub fn new() -> BitSet {
        BitSet::default()
    }

    /// Value of the bit at `index`. Bits past the end read as clear.
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|word| word >> (index % 64) & 1 == 1)
    }

    pub fn set(&mut self, index: usize) {
        let word = index / 64;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (index % 64);
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(word) = self.words.get_mut(index / 64) {
            *word &= !(1 << (index % 64));
        }
        self.trim();
    }

    /// One past the highest set bit, or zero when no bit is set.
    pub fn len(&self) -> usize {
        match self.words.last() {
            Some(word) => self.words.len() * 64 - word.leading_zeros() as usize,
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn from_words(words: Vec<u64>) -> BitSet {
        let mut set = BitSet { words };
        set.trim();
        set
    }

    /// Little-endian byte image with trailing zero bytes trimmed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 8);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> BitSet {
        let mut words = Vec::with_capacity(bytes.len().div_ceil(8));
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            words.push(u64::from_le_bytes(word));
        }
        BitSet::from_words(words)
    }

    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

/// Serializes a [`BitSet`].
///
/// The default form writes a word-count prefix followed by the words. A
/// fixed-length field declares its size in bits instead and writes
/// exactly `ceil(bits / 8)` payload bytes with no prefix, rejecting sets
/// that do not fit.
#[derive(Default)]
pub struct BitSetCodec;

impl Serializer<BitSet> for BitSetCodec {
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &BitSet,
    ) -> Result<(), Error> {
        if let Some(bits) = context.metadata().and_then(|m| m.fixed_length) {
            ensure!(
                value.len() <= bits,
                Error::Validation(format!(
                    "bit set of length {} exceeds fixed size {bits}",
                    value.len()
                ))
            );
            let mut bytes = value.to_bytes();
            bytes.resize(bits.div_ceil(8), 0);
            return visitor.write_bytes(&bytes);
        }
        write_size(context, visitor, value.words().len())?;
        for word in value.words() {
            visitor.write_u64(*word)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<BitSet, Error> {
        if let Some(bits) = context.metadata().and_then(|m| m.fixed_length) {
            let bytes = visitor.read_bytes(bits.div_ceil(8))?;
            return Ok(BitSet::from_bytes(&bytes));
        }
        let count = read_size(context, visitor)?;
        let mut words = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            words.push(visitor.read_u64()?);
        }
        Ok(BitSet::from_words(words))
    }
}
