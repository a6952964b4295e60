//! Plain-text rendering of decoded instructions and accounts.

use std::fmt::Write;

use solana_instruction::Instruction;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    config::DecoderConfig,
    error::CodecResult,
    types::{DecodedAccount, DecodedField, DecodedInstruction},
};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Account")]
    name: String,
    #[tabled(rename = "Pubkey")]
    pubkey: String,
    #[tabled(rename = "Signer")]
    signer: &'static str,
    #[tabled(rename = "Writable")]
    writable: &'static str,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        ""
    }
}

/// Flatten nested fields into dotted rows.
fn field_rows(fields: &[DecodedField], prefix: &str, rows: &mut Vec<FieldRow>) {
    for field in fields {
        let name = if prefix.is_empty() {
            field.name.clone()
        } else if field.name.starts_with('[') {
            format!("{prefix}{}", field.name)
        } else {
            format!("{prefix}.{}", field.name)
        };
        if field.children.is_empty() || !field.value.is_empty() {
            rows.push(FieldRow {
                name: name.clone(),
                value: field.value.clone(),
            });
        }
        field_rows(&field.children, &name, rows);
    }
}

fn fields_table(fields: &[DecodedField]) -> Option<String> {
    let mut rows = Vec::new();
    field_rows(fields, "", &mut rows);
    if rows.is_empty() {
        return None;
    }
    Some(Table::new(rows).with(Style::rounded()).to_string())
}

pub struct InstructionFormatter<'a> {
    config: &'a DecoderConfig,
}

impl<'a> InstructionFormatter<'a> {
    pub fn new(config: &'a DecoderConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, ix: &Instruction, decoded: &CodecResult<DecodedInstruction>) -> String {
        let registry = self.config.program_registry();
        let mut out = String::new();
        let program_name = registry.program_name(&ix.program_id);
        let _ = writeln!(out, "Program: {program_name} ({})", ix.program_id);

        let decoded = match decoded {
            Ok(decoded) => {
                let _ = writeln!(
                    out,
                    "Instruction: {} [{}]",
                    decoded.name, decoded.discriminator
                );
                Some(decoded)
            }
            Err(err) => {
                let _ = writeln!(out, "Instruction: <undecoded> ({err})");
                None
            }
        };

        let names: Vec<String> = match decoded {
            Some(decoded) => decoded
                .labelled_accounts(&ix.accounts)
                .map(|(name, _)| name)
                .collect(),
            None => Vec::new(),
        };
        let rows: Vec<AccountRow> = ix
            .accounts
            .iter()
            .enumerate()
            .map(|(index, meta)| AccountRow {
                index,
                name: names.get(index).cloned().unwrap_or_default(),
                pubkey: meta.pubkey.to_string(),
                signer: yes_no(meta.is_signer),
                writable: yes_no(meta.is_writable),
            })
            .collect();
        if !rows.is_empty() {
            let _ = writeln!(out, "{}", Table::new(rows).with(Style::rounded()));
        }

        if let Some(table) = decoded.and_then(|d| fields_table(&d.fields)) {
            let _ = writeln!(out, "{table}");
        }

        if self.config.show_payload {
            let _ = writeln!(out, "Payload: {}", self.payload(&ix.data));
        }
        out
    }

    pub fn format_account(&self, account: &DecodedAccount) -> String {
        let mut out = format!("Account: {} [{}]\n", account.name, account.discriminator);
        if let Some(table) = fields_table(&account.fields) {
            let _ = writeln!(out, "{table}");
        }
        out
    }

    /// Hex payload, cut at `max_payload_bytes`.
    fn payload(&self, data: &[u8]) -> String {
        let max = self.config.max_payload_bytes;
        if data.len() <= max {
            return hex::encode(data);
        }
        format!(
            "{}... ({} more bytes)",
            hex::encode(&data[..max]),
            data.len() - max
        )
    }
}
