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

//! Immutable descriptions of serializable types.
//!
//! A [`TypeDescriptor`] is a cheaply cloneable tree: the runtime type, the
//! metadata attached to the field it describes, and one descriptor per type
//! parameter. Codecs walk this tree instead of reflecting over values, so a
//! `HashMap<String, Vec<i32>>` field knows how to serialize its keys and
//! elements without any per-value bookkeeping.
//!
//! Descriptors never change after construction. Attaching metadata builds a
//! new descriptor sharing the parameter tree of the old one.

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::metadata::Metadata;
use crate::resolver::provider::CodecHandle;
use crate::serializer::array::ArrayCodec;
use crate::serializer::bits::BitSet;
use crate::serializer::blob::{Blob, BlobCodec};
use crate::serializer::collection::CollectionCodec;
use crate::serializer::enum_::{EnumCodec, Enumerated};
use crate::serializer::map::MapCodec;
use crate::serializer::number::{BigDecimal, BigInteger};
use crate::serializer::option::OptionCodec;

/// How a described type is serialized when no codec is registered for it
/// directly.
///
/// Structural kinds carry a factory for the codec that fits the described
/// type, so the fallback resolution rules never need to name concrete
/// container types.
#[derive(Clone, Debug)]
pub enum Kind {
    /// A plain value resolved through the provider's codec map.
    Value,
    /// A homogeneous sequence with one element parameter.
    List { codec: fn() -> CodecHandle },
    /// A key-value container with two parameters.
    Map { codec: fn() -> CodecHandle },
    /// A fixed-size inline array with one element parameter.
    Array {
        len: usize,
        codec: fn() -> CodecHandle,
    },
    /// A fieldless enum serialized by ordinal.
    Enum { codec: fn() -> CodecHandle },
    /// A type that encodes itself.
    Blob { codec: fn() -> CodecHandle },
    /// An optional value. `wrap` lifts the inner value's codec into one
    /// that writes a presence byte first.
    Optional {
        wrap: fn(CodecHandle, TypeDescriptor) -> Result<CodecHandle, Error>,
    },
}

#[derive(Debug)]
struct Inner {
    type_id: TypeId,
    type_name: &'static str,
    kind: Kind,
    metadata: Metadata,
    params: Vec<TypeDescriptor>,
}

/// An immutable description of one serializable type.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    inner: Arc<Inner>,
}

impl TypeDescriptor {
    fn build(
        type_id: TypeId,
        type_name: &'static str,
        kind: Kind,
        params: Vec<TypeDescriptor>,
    ) -> TypeDescriptor {
        TypeDescriptor {
            inner: Arc::new(Inner {
                type_id,
                type_name,
                kind,
                metadata: Metadata::default(),
                params,
            }),
        }
    }

    /// Describes a plain value with no type parameters.
    pub fn value<T: 'static>() -> TypeDescriptor {
        Self::build(TypeId::of::<T>(), type_name::<T>(), Kind::Value, Vec::new())
    }

    /// Describes a sequence container `C` with elements of type `T`.
    pub fn list<C, T>() -> TypeDescriptor
    where
        C: FromIterator<T> + Send + Sync + 'static,
        T: Described + Send + Sync,
        for<'a> &'a C: IntoIterator<Item = &'a T>,
        for<'a> <&'a C as IntoIterator>::IntoIter: ExactSizeIterator,
    {
        Self::build(
            TypeId::of::<C>(),
            type_name::<C>(),
            Kind::List {
                codec: || CodecHandle::of::<C, _>(CollectionCodec::<C, T>::new()),
            },
            vec![T::describe()],
        )
    }

    /// Describes a key-value container `M` with keys `K` and values `V`.
    pub fn map<M, K, V>() -> TypeDescriptor
    where
        M: FromIterator<(K, V)> + Send + Sync + 'static,
        K: Described + Send + Sync,
        V: Described + Send + Sync,
        for<'a> &'a M: IntoIterator<Item = (&'a K, &'a V)>,
        for<'a> <&'a M as IntoIterator>::IntoIter: ExactSizeIterator,
    {
        Self::build(
            TypeId::of::<M>(),
            type_name::<M>(),
            Kind::Map {
                codec: || CodecHandle::of::<M, _>(MapCodec::<M, K, V>::new()),
            },
            vec![K::describe(), V::describe()],
        )
    }

    /// Describes a fixed-size array of `N` elements of type `T`.
    pub fn array<T, const N: usize>() -> TypeDescriptor
    where
        T: Described + Send + Sync,
    {
        Self::build(
            TypeId::of::<[T; N]>(),
            type_name::<[T; N]>(),
            Kind::Array {
                len: N,
                codec: || CodecHandle::of::<[T; N], _>(ArrayCodec::<T, N>::new()),
            },
            vec![T::describe()],
        )
    }

    /// Describes `Option<T>`.
    pub fn optional<T>() -> TypeDescriptor
    where
        T: Described + Send + Sync,
    {
        Self::build(
            TypeId::of::<Option<T>>(),
            type_name::<Option<T>>(),
            Kind::Optional {
                wrap: wrap_option::<T>,
            },
            vec![T::describe()],
        )
    }

    /// Describes a fieldless enum serialized by ordinal.
    pub fn enumeration<E>() -> TypeDescriptor
    where
        E: Enumerated,
    {
        Self::build(
            TypeId::of::<E>(),
            type_name::<E>(),
            Kind::Enum {
                codec: || CodecHandle::of::<E, _>(EnumCodec::<E>::new()),
            },
            Vec::new(),
        )
    }

    /// Describes a type that encodes itself through [`Blob`].
    pub fn blob<T: Blob>() -> TypeDescriptor {
        Self::build(
            TypeId::of::<T>(),
            type_name::<T>(),
            Kind::Blob {
                codec: || CodecHandle::of::<T, _>(BlobCodec::<T>::new()),
            },
            Vec::new(),
        )
    }

    /// A copy of this descriptor carrying the given metadata.
    pub fn with_metadata(&self, metadata: Metadata) -> TypeDescriptor {
        TypeDescriptor {
            inner: Arc::new(Inner {
                type_id: self.inner.type_id,
                type_name: self.inner.type_name,
                kind: self.inner.kind.clone(),
                metadata,
                params: self.inner.params.clone(),
            }),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.inner.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    pub fn metadata(&self) -> &Metadata {
        &self.inner.metadata
    }

    /// Descriptors of the type parameters, in declaration order.
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.inner.params
    }
}

fn wrap_option<T>(inner: CodecHandle, descriptor: TypeDescriptor) -> Result<CodecHandle, Error>
where
    T: Described + Send + Sync,
{
    let codec = OptionCodec::new(inner.typed::<T>()?, descriptor);
    Ok(CodecHandle::of::<Option<T>, _>(codec))
}

/// A type that can describe itself for serialization.
///
/// Implemented for the built-in scalars and containers; the derive macros
/// implement it for packets, enums and blobs.
pub trait Described: 'static {
    fn describe() -> TypeDescriptor;
}

macro_rules! describe_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Described for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::value::<$ty>()
                }
            }
        )*
    };
}

describe_value!(bool, u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, char, String);
describe_value!(Uuid, DateTime<Utc>, BitSet, BigInteger, BigDecimal);

impl<T> Described for Vec<T>
where
    T: Described + Send + Sync,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list::<Vec<T>, T>()
    }
}

impl<T> Described for VecDeque<T>
where
    T: Described + Send + Sync,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list::<VecDeque<T>, T>()
    }
}

impl<T> Described for HashSet<T>
where
    T: Described + Send + Sync + Eq + Hash,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list::<HashSet<T>, T>()
    }
}

impl<T> Described for BTreeSet<T>
where
    T: Described + Send + Sync + Ord,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list::<BTreeSet<T>, T>()
    }
}

impl<K, V> Described for HashMap<K, V>
where
    K: Described + Send + Sync + Eq + Hash,
    V: Described + Send + Sync,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map::<HashMap<K, V>, K, V>()
    }
}

impl<K, V> Described for BTreeMap<K, V>
where
    K: Described + Send + Sync + Ord,
    V: Described + Send + Sync,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map::<BTreeMap<K, V>, K, V>()
    }
}

impl<T> Described for Option<T>
where
    T: Described + Send + Sync,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::optional::<T>()
    }
}

impl<T, const N: usize> Described for [T; N]
where
    T: Described + Send + Sync,
{
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array::<T, N>()
    }
}
