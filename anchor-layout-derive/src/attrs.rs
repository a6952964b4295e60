//! Attribute parsing for `#[derive(Codec)]`.

use darling::{ast, Error, FromDeriveInput, FromField, FromVariant, Result};
use heck::ToSnakeCase;
use syn::{Expr, ExprArray, Generics, Ident, Lit, Type};

use crate::discriminator::hashed;

/// Suffixes stripped from instruction argument type names.
const INSTRUCTION_SUFFIXES: &[&str] = &["IxData", "Args", "Instruction"];

#[derive(Debug, FromField)]
#[darling(attributes(codec))]
pub struct CodecField {
    pub ident: Option<Ident>,
    pub ty: Type,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(codec))]
pub struct CodecVariant {
    pub ident: Ident,
    pub fields: ast::Fields<CodecField>,
    pub discriminant: Option<Expr>,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(codec), supports(struct_any, enum_any))]
pub struct CodecInput {
    pub ident: Ident,
    pub generics: Generics,
    pub data: ast::Data<CodecVariant, CodecField>,

    /// Account state: `sha256("account:<Name>")` discriminator, layout base 8.
    #[darling(default)]
    pub account: bool,
    /// Instruction arguments: `sha256("global:<snake_name>")` discriminator.
    #[darling(default)]
    pub instruction: bool,
    /// Event: `sha256("event:<Name>")` discriminator.
    #[darling(default)]
    pub event: bool,
    /// Schema name override.
    #[darling(default)]
    pub name: Option<String>,
    /// Explicit 8-byte discriminator, e.g. `discriminator = [1, 2, 3, 4, 5, 6, 7, 8]`.
    #[darling(default)]
    pub discriminator: Option<ExprArray>,
    /// Ordinal width in bytes for enums: 1 (default), 2 or 4.
    #[darling(default)]
    pub ordinal_width: Option<u8>,
    /// Account role names of an instruction, in order.
    #[darling(default)]
    pub account_names: Option<ExprArray>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Record,
    Account,
    Instruction,
    Event,
}

impl CodecInput {
    pub fn validate(&self) -> Result<SchemaKind> {
        let mut errors = Error::accumulator();

        if !self.generics.params.is_empty() {
            errors.push(
                Error::custom("`Codec` cannot be derived for generic types")
                    .with_span(&self.generics),
            );
        }

        let kinds = [
            (self.account, SchemaKind::Account),
            (self.instruction, SchemaKind::Instruction),
            (self.event, SchemaKind::Event),
        ];
        let selected: Vec<SchemaKind> = kinds
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, kind)| *kind)
            .collect();
        let kind = match selected.as_slice() {
            [] => SchemaKind::Record,
            [kind] => *kind,
            _ => {
                errors.push(
                    Error::custom("only one of `account`, `instruction` or `event` may be set")
                        .with_span(&self.ident),
                );
                SchemaKind::Record
            }
        };

        if kind == SchemaKind::Record {
            if self.discriminator.is_some() {
                errors.push(
                    Error::custom("`discriminator` requires `account`, `instruction` or `event`")
                        .with_span(&self.ident),
                );
            }
            if self.name.is_some() {
                errors.push(
                    Error::custom("`name` requires `account`, `instruction` or `event`")
                        .with_span(&self.ident),
                );
            }
        }

        if let Some(array) = &self.discriminator {
            if array.elems.len() != 8 {
                errors.push(
                    Error::custom(format!(
                        "discriminator must have 8 bytes, found {}",
                        array.elems.len()
                    ))
                    .with_span(array),
                );
            }
        }

        if self.account_names.is_some() && kind != SchemaKind::Instruction {
            errors.push(
                Error::custom("`account_names` is only valid with `instruction`")
                    .with_span(&self.ident),
            );
        }

        match &self.data {
            ast::Data::Struct(_) => {
                if self.ordinal_width.is_some() {
                    errors.push(
                        Error::custom("`ordinal_width` is only valid on enums")
                            .with_span(&self.ident),
                    );
                }
            }
            ast::Data::Enum(variants) => {
                if variants.is_empty() {
                    errors.push(
                        Error::custom("`Codec` enums need at least one variant")
                            .with_span(&self.ident),
                    );
                }
                for variant in variants {
                    if let Some(discriminant) = &variant.discriminant {
                        errors.push(
                            Error::custom(
                                "explicit discriminants are not supported, ordinals follow declaration order",
                            )
                            .with_span(discriminant),
                        );
                    }
                }
                let width = self.ordinal_width();
                if matches!(width, 1 | 2 | 4) {
                    let capacity = 1u64 << (8 * u32::from(width));
                    if variants.len() as u64 > capacity {
                        errors.push(
                            Error::custom(format!(
                                "{} variants do not fit a {}-byte ordinal",
                                variants.len(),
                                width
                            ))
                            .with_span(&self.ident),
                        );
                    }
                } else {
                    errors.push(
                        Error::custom("`ordinal_width` must be 1, 2 or 4").with_span(&self.ident),
                    );
                }
            }
        }

        errors.finish_with(kind)
    }

    pub fn ordinal_width(&self) -> u8 {
        self.ordinal_width.unwrap_or(1)
    }

    /// Schema name: the override, or the type name with instruction
    /// suffixes removed for instructions.
    pub fn schema_name(&self, kind: SchemaKind) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let ident = self.ident.to_string();
        if kind != SchemaKind::Instruction {
            return ident;
        }
        INSTRUCTION_SUFFIXES
            .iter()
            .find_map(|suffix| ident.strip_suffix(suffix).filter(|rest| !rest.is_empty()))
            .unwrap_or(&ident)
            .to_string()
    }

    /// Hash-derived discriminator bytes, or `None` when one is assigned.
    pub fn derived_discriminator(&self, kind: SchemaKind) -> Option<[u8; 8]> {
        if self.discriminator.is_some() {
            return None;
        }
        let name = self.schema_name(kind);
        match kind {
            SchemaKind::Record => None,
            SchemaKind::Account => Some(hashed("account", &name)),
            SchemaKind::Instruction => Some(hashed("global", &name.to_snake_case())),
            SchemaKind::Event => Some(hashed("event", &name)),
        }
    }

    pub fn account_name_literals(&self) -> Result<Vec<String>> {
        let Some(array) = &self.account_names else {
            return Ok(Vec::new());
        };
        array
            .elems
            .iter()
            .map(|elem| match elem {
                Expr::Lit(lit) => match &lit.lit {
                    Lit::Str(s) => Ok(s.value()),
                    other => Err(Error::custom("expected a string literal").with_span(other)),
                },
                other => Err(Error::custom("expected a string literal").with_span(other)),
            })
            .collect()
    }
}
