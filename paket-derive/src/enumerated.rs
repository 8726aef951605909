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
use syn::{Data, DeriveInput, Fields};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, "Enumerated works on enums"));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Enumerated does not support generic enums",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "Enumerated needs at least one variant",
        ));
    }
    let mut ordinal_arms: Vec<TokenStream> = Vec::new();
    let mut variant_arms: Vec<TokenStream> = Vec::new();
    for (index, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Enumerated variants cannot carry data",
            ));
        }
        let ident = &variant.ident;
        let ordinal = index as i32;
        ordinal_arms.push(quote! { #name::#ident => #ordinal });
        variant_arms.push(quote! { #ordinal => Some(#name::#ident) });
    }
    Ok(quote! {
        const _: () = {
            impl paket_core::Enumerated for #name {
                fn ordinal(&self) -> i32 {
                    match self {
                        #(#ordinal_arms,)*
                    }
                }

                fn from_ordinal(ordinal: i32) -> Option<#name> {
                    match ordinal {
                        #(#variant_arms,)*
                        _ => None,
                    }
                }
            }

            impl paket_core::Described for #name {
                fn describe() -> paket_core::TypeDescriptor {
                    paket_core::TypeDescriptor::enumeration::<#name>()
                }
            }
        };
    })
}
