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

//! # Paket Derive
//!
//! Derive macros for the Paket packet protocol. [`Packet`] turns a
//! struct into a registrable packet declaration; [`Enumerated`] gives a
//! fieldless enum an ordinal wire form.
//!
//! Generated code refers to `paket_core` by name, so every crate using
//! these macros also depends on `paket-core`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod enumerated;
mod packet;
mod util;

/// Derives the packet declaration for a struct with named fields.
///
/// # Packet attributes
///
/// The struct carries one `#[packet(...)]` attribute naming exactly one
/// identifier source:
///
/// - `id = <expr>`: a fixed identifier
/// - `skip`: declared but never registered
/// - `dynamic, id_provider = <path>`: the identifier comes from calling
///   `<path>(group)` at registration time, where `<path>` is a
///   `fn(&str) -> Option<u32>`
///
/// plus optionally:
///
/// - `group = "<name>"`: the packet group, `"default"` when absent
/// - `custom`: the payload layout is the type's `PacketLogic` impl
/// - `proxied`: access goes through a field table and `Default`,
///   one field at a time
///
/// Without `custom` or `proxied` the derive generates direct
/// constructor-style access.
///
/// # Field attributes
///
/// Fields take `#[field(...)]` constraints, checked when writing and
/// again when reading:
///
/// - `ignore`: not serialized, restored from `Default`
/// - `varint` / `varlong`: variable-width encoding for `i32` / `i64`
/// - `with = <Codec>`: serialize with this exact codec
/// - `elements = <Codec>`: codec for the first type parameter, the
///   elements of a collection or the keys of a map
/// - `fixed = <n>`: the value must have exactly this length
/// - `no_prefix`: omit the length prefix, needs `fixed`
/// - `length(min = <n>, max = <n>)`: length bounds
/// - `range(min = <n>, max = <n>[, exclusive])`: integer bounds
/// - `float_range(min = <x>, max = <x>[, exclusive])`: float bounds
/// - `length_with = <Codec>`: codec for the length prefix itself
///
/// # Example
///
/// ```rust,ignore
/// use paket_derive::Packet;
///
/// #[derive(Packet)]
/// #[packet(id = 0x04, group = "play")]
/// struct ChatMessage {
///     #[field(length(max = 256))]
///     message: String,
///     #[field(varint)]
///     sender_id: i32,
///     #[field(ignore)]
///     received_at: Option<u64>,
/// }
/// ```
#[proc_macro_derive(Packet, attributes(packet, field))]
pub fn derive_packet(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    packet::expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derives the ordinal wire form for a fieldless enum.
///
/// Variants are numbered in declaration order starting at zero, so
/// reordering variants is a wire format change. Decoding an ordinal
/// with no variant is a malformed input error.
///
/// # Example
///
/// ```rust,ignore
/// use paket_derive::Enumerated;
///
/// #[derive(Enumerated, Debug, PartialEq)]
/// enum Hand {
///     Main,
///     Off,
/// }
/// ```
#[proc_macro_derive(Enumerated)]
pub fn derive_enumerated(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    enumerated::expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
