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
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Expr, Field, Fields, LitStr, Path, Type};

use crate::util::{descriptor_fn_name, first_type_argument, type_is};

mod read;
mod write;

#[derive(Default)]
struct PacketAttrs {
    id: Option<Expr>,
    group: Option<LitStr>,
    skip: bool,
    dynamic: bool,
    id_provider: Option<Path>,
    custom: bool,
    proxied: bool,
}

impl PacketAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<PacketAttrs> {
        let mut parsed = PacketAttrs::default();
        for attr in attrs {
            if !attr.path().is_ident("packet") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    parsed.id = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("group") {
                    parsed.group = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else if meta.path.is_ident("dynamic") {
                    parsed.dynamic = true;
                } else if meta.path.is_ident("id_provider") {
                    parsed.id_provider = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("custom") {
                    parsed.custom = true;
                } else if meta.path.is_ident("proxied") {
                    parsed.proxied = true;
                } else {
                    return Err(meta.error("unsupported packet attribute"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

#[derive(Default)]
struct Bounds {
    min: Option<Expr>,
    max: Option<Expr>,
    exclusive: bool,
}

fn parse_bounds(meta: &ParseNestedMeta, allow_exclusive: bool) -> syn::Result<Bounds> {
    let mut bounds = Bounds::default();
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("min") {
            bounds.min = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("max") {
            bounds.max = Some(inner.value()?.parse()?);
        } else if allow_exclusive && inner.path.is_ident("exclusive") {
            bounds.exclusive = true;
        } else {
            return Err(inner.error("unsupported bound"));
        }
        Ok(())
    })?;
    Ok(bounds)
}

#[derive(Default)]
pub struct FieldAttrs {
    pub ignore: bool,
    varint: bool,
    varlong: bool,
    with: Option<Type>,
    elements: Option<Type>,
    length_with: Option<Type>,
    fixed: Option<Expr>,
    no_prefix: bool,
    length: Option<Bounds>,
    range: Option<Bounds>,
    float_range: Option<Bounds>,
}

impl FieldAttrs {
    fn parse(field: &Field) -> syn::Result<FieldAttrs> {
        let mut parsed = FieldAttrs::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("field") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    parsed.ignore = true;
                } else if meta.path.is_ident("varint") {
                    parsed.varint = true;
                } else if meta.path.is_ident("varlong") {
                    parsed.varlong = true;
                } else if meta.path.is_ident("with") {
                    parsed.with = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("elements") {
                    parsed.elements = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("length_with") {
                    parsed.length_with = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("fixed") {
                    parsed.fixed = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("no_prefix") {
                    parsed.no_prefix = true;
                } else if meta.path.is_ident("length") {
                    parsed.length = Some(parse_bounds(&meta, false)?);
                } else if meta.path.is_ident("range") {
                    parsed.range = Some(parse_bounds(&meta, true)?);
                } else if meta.path.is_ident("float_range") {
                    parsed.float_range = Some(parse_bounds(&meta, true)?);
                } else {
                    return Err(meta.error("unsupported field attribute"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

fn bound_or(expr: &Option<Expr>, default: TokenStream) -> TokenStream {
    match expr {
        Some(expr) => quote! { #expr },
        None => default,
    }
}

/// Constraint metadata for a field, `None` when every knob is default.
fn metadata_tokens(field: &Field, attrs: &FieldAttrs) -> syn::Result<Option<TokenStream>> {
    if attrs.varint && attrs.varlong {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "varint and varlong are mutually exclusive",
        ));
    }
    let mut entries: Vec<TokenStream> = Vec::new();
    if let Some(fixed) = &attrs.fixed {
        entries.push(quote! { fixed_length: Some(#fixed) });
    }
    if attrs.no_prefix {
        entries.push(quote! { no_prefix: true });
    }
    if let Some(bounds) = &attrs.length {
        let min = bound_or(&bounds.min, quote! { 0 });
        let max = bound_or(&bounds.max, quote! { usize::MAX });
        entries.push(quote! {
            length: Some(paket_core::metadata::LengthBounds { min: #min, max: #max })
        });
    }
    if let Some(bounds) = &attrs.range {
        let min = bound_or(&bounds.min, quote! { i64::MIN });
        let max = bound_or(&bounds.max, quote! { i64::MAX });
        let inclusive = !bounds.exclusive;
        entries.push(quote! {
            range: Some(paket_core::metadata::IntRange {
                min: #min,
                max: #max,
                inclusive: #inclusive,
            })
        });
    }
    if let Some(bounds) = &attrs.float_range {
        let min = bound_or(&bounds.min, quote! { f64::NEG_INFINITY });
        let max = bound_or(&bounds.max, quote! { f64::INFINITY });
        let inclusive = !bounds.exclusive;
        entries.push(quote! {
            float_range: Some(paket_core::metadata::FloatRange {
                min: #min,
                max: #max,
                inclusive: #inclusive,
            })
        });
    }
    if let Some(codec) = &attrs.with {
        let ty = &field.ty;
        entries.push(quote! {
            codec: Some(paket_core::CodecKey::of::<#codec, #ty>())
        });
    }
    if attrs.varint {
        if !type_is(&field.ty, "i32") {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "varint applies to i32 fields",
            ));
        }
        entries.push(quote! {
            alias: Some(paket_core::CodecKey::of::<paket_core::serializer::varint::VarIntCodec, i32>())
        });
    }
    if attrs.varlong {
        if !type_is(&field.ty, "i64") {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "varlong applies to i64 fields",
            ));
        }
        entries.push(quote! {
            alias: Some(paket_core::CodecKey::of::<paket_core::serializer::varint::VarLongCodec, i64>())
        });
    }
    if let Some(codec) = &attrs.elements {
        let element = first_type_argument(&field.ty).ok_or_else(|| {
            syn::Error::new_spanned(&field.ty, "elements needs a field type with type parameters")
        })?;
        entries.push(quote! {
            element_codec: Some(paket_core::CodecKey::of::<#codec, #element>())
        });
    }
    if let Some(codec) = &attrs.length_with {
        entries.push(quote! {
            length_with: Some(paket_core::CodecKey::of::<#codec, i32>())
        });
    }
    if entries.is_empty() {
        Ok(None)
    } else {
        Ok(Some(quote! {
            paket_core::Metadata { #(#entries,)* ..Default::default() }
        }))
    }
}

/// One memoized descriptor accessor per serialized field.
fn gen_descriptor_fns(fields: &[&Field], attrs: &[FieldAttrs]) -> syn::Result<TokenStream> {
    let mut fns: Vec<TokenStream> = Vec::new();
    for (field, field_attrs) in fields.iter().zip(attrs) {
        if field_attrs.ignore {
            continue;
        }
        let fn_name = descriptor_fn_name(field);
        let ty = &field.ty;
        let describe = match metadata_tokens(field, field_attrs)? {
            Some(metadata) => quote! {
                <#ty as paket_core::Described>::describe().with_metadata(#metadata)
            },
            None => quote! {
                <#ty as paket_core::Described>::describe()
            },
        };
        fns.push(quote! {
            fn #fn_name() -> paket_core::TypeDescriptor {
                static DESCRIPTOR: std::sync::OnceLock<paket_core::TypeDescriptor> =
                    std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| #describe).clone()
            }
        });
    }
    Ok(quote! { #(#fns)* })
}

/// The field table driving proxied access, in declaration order.
fn gen_field_models(input: &DeriveInput, fields: &[&Field], attrs: &[FieldAttrs]) -> TokenStream {
    let name = &input.ident;
    let name_str = name.to_string();
    let models: Vec<TokenStream> = fields
        .iter()
        .zip(attrs)
        .filter(|(_, attrs)| !attrs.ignore)
        .map(|(field, _)| {
            let ident = &field.ident;
            let ty = &field.ty;
            let fn_name = descriptor_fn_name(field);
            let field_name = ident.as_ref().expect("").to_string();
            quote! {
                paket_core::FieldModel {
                    name: #field_name,
                    descriptor: #fn_name,
                    read: |context, visitor, packet| {
                        let packet = packet
                            .downcast_mut::<#name>()
                            .ok_or_else(|| {
                                paket_core::Error::type_mismatch(#name_str, "another packet type")
                            })?;
                        let codec = context.serialize_with::<#ty>()?;
                        packet.#ident = codec.deserialize(context, visitor)?;
                        Ok(())
                    },
                    write: |context, visitor, packet| {
                        let packet = packet
                            .downcast_ref::<#name>()
                            .ok_or_else(|| {
                                paket_core::Error::type_mismatch(#name_str, "another packet type")
                            })?;
                        let codec = context.serialize_with::<#ty>()?;
                        codec.serialize(context, visitor, &packet.#ident)
                    },
                }
            }
        })
        .collect();
    quote! {
        static __PAKET_FIELDS: &[paket_core::FieldModel] = &[#(#models),*];
    }
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let attrs = PacketAttrs::parse(&input.attrs)?;
    let declared = attrs.id.is_some() as u8 + attrs.skip as u8 + attrs.dynamic as u8;
    if declared != 1 {
        return Err(syn::Error::new_spanned(
            name,
            "packet needs exactly one of id, skip or dynamic",
        ));
    }
    if attrs.dynamic && attrs.id_provider.is_none() {
        return Err(syn::Error::new_spanned(
            name,
            "dynamic packets need an id_provider",
        ));
    }
    if attrs.id_provider.is_some() && !attrs.dynamic {
        return Err(syn::Error::new_spanned(
            name,
            "id_provider only applies to dynamic packets",
        ));
    }
    if attrs.custom && attrs.proxied {
        return Err(syn::Error::new_spanned(
            name,
            "custom and proxied are mutually exclusive",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Packet does not support generic structs",
        ));
    }
    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(name, "Packet needs named fields"));
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Packet works on structs")),
    };
    let field_attrs = fields
        .iter()
        .map(|field| FieldAttrs::parse(field))
        .collect::<syn::Result<Vec<FieldAttrs>>>()?;

    let id_tokens = if attrs.skip {
        quote! { paket_core::PacketId::Skip }
    } else if attrs.dynamic {
        quote! { paket_core::PacketId::Dynamic }
    } else {
        let id = attrs.id.as_ref().expect("");
        quote! { paket_core::PacketId::Id(#id) }
    };
    let group_tokens = attrs.group.as_ref().map(|group| {
        quote! { const GROUP: &'static str = #group; }
    });
    let dynamic_fn = attrs.id_provider.as_ref().map(|provider| {
        quote! {
            fn dynamic_id(group: &str) -> Option<u32> {
                #provider(group)
            }
        }
    });

    let (strategy, descriptors, support, reader, writer) = if attrs.custom {
        (
            quote! { Custom },
            TokenStream::new(),
            TokenStream::new(),
            read::gen_custom_read(input),
            write::gen_custom_write(input),
        )
    } else if attrs.proxied {
        (
            quote! { Proxied },
            gen_descriptor_fns(&fields, &field_attrs)?,
            gen_field_models(input, &fields, &field_attrs),
            read::gen_proxied_read(input),
            write::gen_proxied_write(),
        )
    } else {
        (
            quote! { Generated },
            gen_descriptor_fns(&fields, &field_attrs)?,
            TokenStream::new(),
            read::gen_generated_read(input, &fields, &field_attrs),
            write::gen_generated_write(input, &fields, &field_attrs),
        )
    };

    Ok(quote! {
        const _: () = {
            #descriptors
            #support
            impl paket_core::Packet for #name {
                const ID: paket_core::PacketId = #id_tokens;
                #group_tokens
                const STRATEGY: paket_core::AccessorStrategy =
                    paket_core::AccessorStrategy::#strategy;
                #dynamic_fn
                fn reader() -> paket_core::PacketReader {
                    #reader
                }
                fn writer() -> paket_core::PacketWriter {
                    #writer
                }
            }
        };
    })
}
