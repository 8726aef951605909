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

//! Fallback contract for self-encoding types.

use std::marker::PhantomData;

use crate::buffer::DataVisitor;
use crate::error::Error;
use crate::resolver::context::SerializerContext;
use crate::serializer::Serializer;

/// A type that encodes itself directly against the cursor.
///
/// The escape hatch for values no built-in codec fits. Implementors own
/// their wire layout entirely; the engine contributes nothing but the
/// context and the cursor.
pub trait Blob: Sized + Send + Sync + 'static {
    fn encode(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<(), Error>;

    fn decode(
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<Self, Error>;
}

/// Delegates serialization to the value's own [`Blob`] implementation.
pub struct BlobCodec<T> {
    marker: PhantomData<fn(T)>,
}

impl<T> BlobCodec<T> {
    pub fn new() -> BlobCodec<T> {
        BlobCodec {
            marker: PhantomData,
        }
    }
}

impl<T> Default for BlobCodec<T> {
    fn default() -> BlobCodec<T> {
        BlobCodec::new()
    }
}

impl<T> Serializer<T> for BlobCodec<T>
where
    T: Blob,
{
    fn serialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
        value: &T,
    ) -> Result<(), Error> {
        value.encode(context, visitor)
    }

    fn deserialize(
        &self,
        context: &SerializerContext<'_>,
        visitor: &mut dyn DataVisitor,
    ) -> Result<T, Error> {
        T::decode(context, visitor)
    }
}

/// Implements [`Described`](crate::resolver::descriptor::Described) for a
/// [`Blob`] type, routing it to the blob resolution rule.
#[macro_export]
macro_rules! impl_blob {
    ($ty:ty) => {
        impl $crate::resolver::descriptor::Described for $ty {
            fn describe() -> $crate::resolver::descriptor::TypeDescriptor {
                $crate::resolver::descriptor::TypeDescriptor::blob::<$ty>()
            }
        }
    };
}
