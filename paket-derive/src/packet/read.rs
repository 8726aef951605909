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

/// A reader deserializing every field in declaration order, then
/// assembling the struct. Ignored fields come from `Default`.
pub fn gen_generated_read(
    input: &DeriveInput,
    fields: &[&Field],
    attrs: &[FieldAttrs],
) -> TokenStream {
    let name = &input.ident;
    let active = fields.iter().zip(attrs).any(|(_, attrs)| !attrs.ignore);
    let read_fields: Vec<TokenStream> = fields
        .iter()
        .zip(attrs)
        .map(|(field, attrs)| {
            let ident = &field.ident;
            let ty = &field.ty;
            if attrs.ignore {
                quote! {
                    let #ident: #ty = Default::default();
                }
            } else {
                let fn_name = descriptor_fn_name(field);
                quote! {
                    let #ident: #ty = {
                        let field_context = context.with_descriptor(#fn_name());
                        let codec = field_context.serialize_with::<#ty>()?;
                        codec.deserialize(&field_context, visitor)?
                    };
                }
            }
        })
        .collect();
    let idents: Vec<_> = fields.iter().map(|field| &field.ident).collect();
    let (context, visitor) = if active {
        (quote! { context }, quote! { visitor })
    } else {
        (quote! { _context }, quote! { _visitor })
    };
    quote! {
        paket_core::PacketReader::new(|#context, #visitor| {
            #(#read_fields)*
            let packet: Box<dyn std::any::Any> = Box::new(#name { #(#idents),* });
            Ok(packet)
        })
    }
}

/// A reader delegating construction to the hand-written packet logic.
pub fn gen_custom_read(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    quote! {
        paket_core::PacketReader::new(|context, visitor| {
            let packet = <#name as paket_core::PacketLogic>::construct(context, visitor)?;
            Ok(Box::new(packet) as Box<dyn std::any::Any>)
        })
    }
}

pub fn gen_proxied_read(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    quote! {
        paket_core::proxied_reader::<#name>(__PAKET_FIELDS)
    }
}
