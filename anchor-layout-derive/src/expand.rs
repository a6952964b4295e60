//! Code generation for structs and enums.

use darling::{ast, FromDeriveInput, Result};
use heck::ToShoutySnakeCase;
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident, Index, Member, Type};

use crate::attrs::{CodecField, CodecInput, CodecVariant, SchemaKind};

pub fn derive_codec(input: &DeriveInput) -> Result<TokenStream> {
    let parsed = CodecInput::from_derive_input(input)?;
    let kind = parsed.validate()?;
    let body = match &parsed.data {
        ast::Data::Struct(fields) => expand_struct(&parsed, kind, fields),
        ast::Data::Enum(variants) => expand_enum(&parsed, kind, variants),
    };
    let schema = expand_schema(&parsed, kind)?;
    Ok(quote! {
        #body
        #schema
    })
}

fn layout_base(kind: SchemaKind) -> usize {
    match kind {
        SchemaKind::Account => 8,
        _ => 0,
    }
}

/// Display name of a field: its identifier, or its position for tuples.
fn field_name(index: usize, field: &CodecField) -> String {
    match &field.ident {
        Some(ident) => ident.to_string().trim_start_matches("r#").to_string(),
        None => index.to_string(),
    }
}

/// `Some(0) + FIXED_LEN(T1) + FIXED_LEN(T2) ...`, `None` as soon as one is `None`.
fn fixed_sum<'a>(tys: impl Iterator<Item = &'a Type>) -> TokenStream {
    tys.fold(quote!(::core::option::Option::Some(0usize)), |acc, ty| {
        quote!(::anchor_layout::sum_fixed(#acc, <#ty as ::anchor_layout::Layout>::FIXED_LEN))
    })
}

fn min_sum<'a>(tys: impl Iterator<Item = &'a Type>) -> TokenStream {
    let tys = tys.collect::<Vec<_>>();
    quote!(0usize #(+ <#tys as ::anchor_layout::Layout>::MIN_LEN)*)
}

fn expand_struct(
    input: &CodecInput,
    kind: SchemaKind,
    fields: &ast::Fields<CodecField>,
) -> TokenStream {
    let ident = &input.ident;
    let type_name = ident.to_string();
    let base = layout_base(kind);

    let members: Vec<Member> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(i)),
        })
        .collect();
    let names: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_name(i, field))
        .collect();
    let tys: Vec<&Type> = fields.iter().map(|field| &field.ty).collect();

    let min_len = min_sum(tys.iter().copied());
    let fixed_len = fixed_sum(tys.iter().copied());

    let construct = match fields.style {
        ast::Style::Struct => quote! {
            Self { #(#members: <#tys as ::anchor_layout::Decode>::decode(reader)?,)* }
        },
        ast::Style::Tuple => quote! {
            Self( #(<#tys as ::anchor_layout::Decode>::decode(reader)?,)* )
        },
        ast::Style::Unit => quote!(Self),
    };

    let offsets = if fields.style == ast::Style::Struct && !names.is_empty() {
        let consts = names
            .iter()
            .map(|name| format_ident!("{}_OFFSET", name.to_shouty_snake_case()));
        let indices = 0..names.len();
        let docs = names.iter().map(|name| {
            format!("Static byte offset of `{name}`, `None` after a variable-length field.")
        });
        quote! {
            impl #ident {
                #(
                    #[doc = #docs]
                    pub const #consts: ::core::option::Option<usize> =
                        <Self as ::anchor_layout::HasLayout>::LAYOUT.offset_at(#indices);
                )*
            }
        }
    } else {
        TokenStream::new()
    };

    quote! {
        impl ::anchor_layout::Layout for #ident {
            const MIN_LEN: usize = #min_len;
            const FIXED_LEN: ::core::option::Option<usize> = #fixed_len;
        }

        impl ::anchor_layout::Encode for #ident {
            fn encoded_len(&self) -> usize {
                0usize #(+ ::anchor_layout::Encode::encoded_len(&self.#members))*
            }

            #[allow(unused_variables)]
            fn encode(
                &self,
                writer: &mut ::anchor_layout::Writer<'_>,
            ) -> ::anchor_layout::CodecResult<()> {
                #(::anchor_layout::Encode::encode(&self.#members, writer)?;)*
                ::core::result::Result::Ok(())
            }
        }

        impl ::anchor_layout::Decode for #ident {
            #[allow(unused_variables)]
            fn decode(
                reader: &mut ::anchor_layout::Reader<'_>,
            ) -> ::anchor_layout::CodecResult<Self> {
                ::core::result::Result::Ok(#construct)
            }
        }

        impl ::anchor_layout::Describe for #ident {
            fn describe(&self, name: &str) -> ::anchor_layout::DecodedField {
                ::anchor_layout::DecodedField::with_children(
                    name,
                    ::std::vec![#(::anchor_layout::Describe::describe(&self.#members, #names)),*],
                )
            }
        }

        impl ::anchor_layout::HasLayout for #ident {
            const LAYOUT: ::anchor_layout::RecordLayout = ::anchor_layout::RecordLayout::new(
                #type_name,
                #base,
                &[#(::anchor_layout::FieldLayout::new(
                    #names,
                    <#tys as ::anchor_layout::Layout>::FIXED_LEN,
                )),*],
            );
        }

        #offsets
    }
}

/// Pattern pieces for one enum variant.
struct VariantParts {
    /// `Self::V { a: __field0 }`, `Self::V(__field0)` or `Self::V`.
    binding: TokenStream,
    /// `Self::V { .. }`, `Self::V(..)` or `Self::V`.
    wildcard: TokenStream,
    bindings: Vec<Ident>,
    names: Vec<String>,
    construct: TokenStream,
}

fn variant_parts(variant: &CodecVariant) -> VariantParts {
    let vident = &variant.ident;
    let fields = &variant.fields;
    let bindings: Vec<Ident> = (0..fields.len())
        .map(|i| format_ident!("__field{}", i))
        .collect();
    let names: Vec<String> = fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_name(i, field))
        .collect();
    let tys: Vec<&Type> = fields.iter().map(|field| &field.ty).collect();
    let field_idents: Vec<&Ident> = fields.iter().filter_map(|f| f.ident.as_ref()).collect();

    match fields.style {
        ast::Style::Struct => VariantParts {
            binding: quote!(Self::#vident { #(#field_idents: #bindings),* }),
            wildcard: quote!(Self::#vident { .. }),
            construct: quote! {
                Self::#vident { #(#field_idents: <#tys as ::anchor_layout::Decode>::decode(reader)?,)* }
            },
            bindings,
            names,
        },
        ast::Style::Tuple => VariantParts {
            binding: quote!(Self::#vident( #(#bindings),* )),
            wildcard: quote!(Self::#vident(..)),
            construct: quote! {
                Self::#vident( #(<#tys as ::anchor_layout::Decode>::decode(reader)?,)* )
            },
            bindings,
            names,
        },
        ast::Style::Unit => VariantParts {
            binding: quote!(Self::#vident),
            wildcard: quote!(Self::#vident),
            construct: quote!(Self::#vident),
            bindings,
            names,
        },
    }
}

fn expand_enum(input: &CodecInput, kind: SchemaKind, variants: &[CodecVariant]) -> TokenStream {
    let ident = &input.ident;
    let type_name = ident.to_string();
    let base = layout_base(kind);
    let width = input.ordinal_width();
    let width_len = width as usize;
    let width_variant = match width {
        2 => quote!(::anchor_layout::OrdinalWidth::U16),
        4 => quote!(::anchor_layout::OrdinalWidth::U32),
        _ => quote!(::anchor_layout::OrdinalWidth::U8),
    };
    let count = variants.len();

    let parts: Vec<VariantParts> = variants.iter().map(variant_parts).collect();
    let variant_names: Vec<String> = variants.iter().map(|v| v.ident.to_string()).collect();
    let ordinals: Vec<Literal> = (0..count)
        .map(|i| Literal::u32_unsuffixed(i as u32))
        .collect();

    let payload_mins = variants
        .iter()
        .map(|v| min_sum(v.fields.iter().map(|f| &f.ty)));
    let payload_fixed = variants
        .iter()
        .map(|v| fixed_sum(v.fields.iter().map(|f| &f.ty)));

    let wildcards = parts.iter().map(|p| &p.wildcard);
    let len_arms = parts.iter().map(|p| {
        let binding = &p.binding;
        let bindings = &p.bindings;
        quote!(#binding => 0usize #(+ ::anchor_layout::Encode::encoded_len(#bindings))*)
    });
    let encode_arms = parts.iter().map(|p| {
        let binding = &p.binding;
        let bindings = &p.bindings;
        quote!(#binding => { #(::anchor_layout::Encode::encode(#bindings, writer)?;)* })
    });
    let decode_arms = parts.iter().zip(&ordinals).map(|(p, ordinal)| {
        let construct = &p.construct;
        quote!(#ordinal => #construct)
    });
    let describe_arms = parts.iter().zip(&variant_names).map(|(p, vname)| {
        let binding = &p.binding;
        let bindings = &p.bindings;
        let names = &p.names;
        quote! {
            #binding => ::anchor_layout::DecodedField::variant(
                name,
                #vname,
                ::std::vec![#(::anchor_layout::Describe::describe(#bindings, #names)),*],
            )
        }
    });

    quote! {
        impl ::anchor_layout::Layout for #ident {
            const MIN_LEN: usize = #width_len
                + ::anchor_layout::variant::min_payload_len(&[#(#payload_mins),*]);
            const FIXED_LEN: ::core::option::Option<usize> = ::anchor_layout::sum_fixed(
                ::core::option::Option::Some(#width_len),
                ::anchor_layout::variant::common_fixed_len(&[#(#payload_fixed),*]),
            );
        }

        impl ::anchor_layout::TaggedUnion for #ident {
            const NAME: &'static str = #type_name;
            const ORDINAL_WIDTH: ::anchor_layout::OrdinalWidth = #width_variant;
            const VARIANTS: &'static [&'static str] = &[#(#variant_names),*];

            fn ordinal(&self) -> u32 {
                match self {
                    #(#wildcards => #ordinals,)*
                }
            }
        }

        impl ::anchor_layout::Encode for #ident {
            fn encoded_len(&self) -> usize {
                #width_len + match self {
                    #(#len_arms,)*
                }
            }

            fn encode(
                &self,
                writer: &mut ::anchor_layout::Writer<'_>,
            ) -> ::anchor_layout::CodecResult<()> {
                <Self as ::anchor_layout::TaggedUnion>::ORDINAL_WIDTH
                    .write(writer, ::anchor_layout::TaggedUnion::ordinal(self))?;
                match self {
                    #(#encode_arms)*
                }
                ::core::result::Result::Ok(())
            }
        }

        impl ::anchor_layout::Decode for #ident {
            fn decode(
                reader: &mut ::anchor_layout::Reader<'_>,
            ) -> ::anchor_layout::CodecResult<Self> {
                let ordinal = ::anchor_layout::variant::read_ordinal(
                    reader,
                    <Self as ::anchor_layout::TaggedUnion>::ORDINAL_WIDTH,
                    #count,
                    #type_name,
                )?;
                ::core::result::Result::Ok(match ordinal {
                    #(#decode_arms,)*
                    other => {
                        return ::core::result::Result::Err(
                            ::anchor_layout::variant::unexpected_ordinal(#type_name, other),
                        )
                    }
                })
            }
        }

        impl ::anchor_layout::Describe for #ident {
            fn describe(&self, name: &str) -> ::anchor_layout::DecodedField {
                match self {
                    #(#describe_arms,)*
                }
            }
        }

        impl ::anchor_layout::HasLayout for #ident {
            const LAYOUT: ::anchor_layout::RecordLayout = ::anchor_layout::RecordLayout::new(
                #type_name,
                #base,
                &[::anchor_layout::FieldLayout::new(
                    "ordinal",
                    ::core::option::Option::Some(#width_len),
                )],
            );
        }
    }
}

fn expand_schema(input: &CodecInput, kind: SchemaKind) -> Result<TokenStream> {
    let ident = &input.ident;
    let name = input.schema_name(kind);
    let discriminator = match (&input.discriminator, input.derived_discriminator(kind)) {
        (Some(explicit), _) => quote!(#explicit),
        (None, Some(bytes)) => {
            let bytes = bytes.iter().map(|b| Literal::u8_unsuffixed(*b));
            quote!([#(#bytes),*])
        }
        (None, None) => return Ok(TokenStream::new()),
    };
    let discriminator = quote! {
        const DISCRIMINATOR: ::anchor_layout::Discriminator =
            ::anchor_layout::Discriminator::new(#discriminator);
    };

    Ok(match kind {
        SchemaKind::Record => TokenStream::new(),
        SchemaKind::Account => quote! {
            impl ::anchor_layout::AccountSchema for #ident {
                const NAME: &'static str = #name;
                #discriminator
            }
        },
        SchemaKind::Instruction => {
            let account_names = input.account_name_literals()?;
            quote! {
                impl ::anchor_layout::InstructionArgs for #ident {
                    const NAME: &'static str = #name;
                    #discriminator
                    const ACCOUNT_NAMES: &'static [&'static str] = &[#(#account_names),*];
                }
            }
        }
        SchemaKind::Event => quote! {
            impl ::anchor_layout::EventSchema for #ident {
                const NAME: &'static str = #name;
                #discriminator
            }
        },
    })
}
