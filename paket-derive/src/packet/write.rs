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

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Field};

use super::FieldAttrs;
use crate::util::descriptor_fn_name;

/// A writer serializing every non-ignored field in declaration order.
pub fn gen_generated_write(
    input: &DeriveInput,
    fields: &[&Field],
    attrs: &[FieldAttrs],
) -> TokenStream {
    let name = &input.ident;
    let name_str = name.to_string();
    let write_fields: Vec<TokenStream> = fields
        .iter()
        .zip(attrs)
        .filter(|(_, attrs)| !attrs.ignore)
        .map(|(field, _)| {
            let ident = &field.ident;
            let ty = &field.ty;
            let fn_name = descriptor_fn_name(field);
            quote! {
                {
                    let field_context = context.with_descriptor(#fn_name());
                    let codec = field_context.serialize_with::<#ty>()?;
                    codec.serialize(&field_context, visitor, &packet.#ident)?;
                }
            }
        })
        .collect();
    if write_fields.is_empty() {
        return quote! {
            paket_core::PacketWriter::new(|_context, _visitor, _packet| Ok(()))
        };
    }
    quote! {
        paket_core::PacketWriter::new(|context, visitor, packet| {
            let packet = packet
                .downcast_ref::<#name>()
                .ok_or_else(|| paket_core::Error::type_mismatch(#name_str, "another packet type"))?;
            #(#write_fields)*
            Ok(())
        })
    }
}

/// A writer delegating deconstruction to the hand-written packet logic.
pub fn gen_custom_write(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let name_str = name.to_string();
    quote! {
        paket_core::PacketWriter::new(|context, visitor, packet| {
            let packet = packet
                .downcast_ref::<#name>()
                .ok_or_else(|| paket_core::Error::type_mismatch(#name_str, "another packet type"))?;
            paket_core::PacketLogic::deconstruct(packet, context, visitor)
        })
    }
}

pub fn gen_proxied_write() -> TokenStream {
    quote! {
        paket_core::proxied_writer(__PAKET_FIELDS)
    }
}
