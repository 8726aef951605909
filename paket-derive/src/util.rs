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

use proc_macro2::Ident;
use quote::format_ident;
use syn::{Field, GenericArgument, PathArguments, Type, TypePath};

/// Name of the generated memoized descriptor accessor for a field.
pub fn descriptor_fn_name(field: &Field) -> Ident {
    format_ident!("__paket_field_{}", field.ident.as_ref().expect(""))
}

/// First type argument of a generic type, `i32` for `Vec<i32>`.
pub fn first_type_argument(ty: &Type) -> Option<&Type> {
    if let Type::Path(TypePath { path, .. }) = ty {
        if let Some(seg) = path.segments.last() {
            if let PathArguments::AngleBracketed(args) = &seg.arguments {
                for arg in &args.args {
                    if let GenericArgument::Type(inner) = arg {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}

/// Check if a type is spelled as the given bare path ident.
pub fn type_is(ty: &Type, name: &str) -> bool {
    if let Type::Path(TypePath { qself: None, path }) = ty {
        if let Some(seg) = path.segments.last() {
            return seg.ident == name && seg.arguments.is_empty();
        }
    }
    false
}
