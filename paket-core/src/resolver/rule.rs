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

//! Fallback codec resolution for structural types.

use crate::resolver::descriptor::{Kind, TypeDescriptor};
use crate::resolver::provider::{CodecHandle, SerializerProvider};

/// Produces codecs for types without a directly registered serializer.
///
/// Rules are consulted after the direct codec map misses, in the order
/// they were installed; the first rule returning a codec wins. A rule is
/// evaluated on every lookup, so it may resolve differently as the
/// provider changes.
pub trait SerializationRule: Send + Sync + 'static {
    fn codec_for(
        &self,
        descriptor: &TypeDescriptor,
        provider: &SerializerProvider,
    ) -> Option<CodecHandle>;
}

/// Builds codecs for described sequence containers.
#[derive(Default)]
pub struct CollectionRule;

impl SerializationRule for CollectionRule {
    fn codec_for(
        &self,
        descriptor: &TypeDescriptor,
        _provider: &SerializerProvider,
    ) -> Option<CodecHandle> {
        match descriptor.kind() {
            Kind::List { codec } => Some(codec()),
            _ => None,
        }
    }
}

/// Builds codecs for described key-value containers.
#[derive(Default)]
pub struct MapRule;

impl SerializationRule for MapRule {
    fn codec_for(
        &self,
        descriptor: &TypeDescriptor,
        _provider: &SerializerProvider,
    ) -> Option<CodecHandle> {
        match descriptor.kind() {
            Kind::Map { codec } => Some(codec()),
            _ => None,
        }
    }
}

/// Builds codecs for fixed-size arrays.
#[derive(Default)]
pub struct ArrayRule;

impl SerializationRule for ArrayRule {
    fn codec_for(
        &self,
        descriptor: &TypeDescriptor,
        _provider: &SerializerProvider,
    ) -> Option<CodecHandle> {
        match descriptor.kind() {
            Kind::Array { codec, .. } => Some(codec()),
            _ => None,
        }
    }
}

/// Builds ordinal codecs for fieldless enums.
#[derive(Default)]
pub struct EnumRule;

impl SerializationRule for EnumRule {
    fn codec_for(
        &self,
        descriptor: &TypeDescriptor,
        _provider: &SerializerProvider,
    ) -> Option<CodecHandle> {
        match descriptor.kind() {
            Kind::Enum { codec } => Some(codec()),
            _ => None,
        }
    }
}

/// Builds delegating codecs for self-encoding types.
#[derive(Default)]
pub struct BlobRule;

impl SerializationRule for BlobRule {
    fn codec_for(
        &self,
        descriptor: &TypeDescriptor,
        _provider: &SerializerProvider,
    ) -> Option<CodecHandle> {
        match descriptor.kind() {
            Kind::Blob { codec } => Some(codec()),
            _ => None,
        }
    }
}
