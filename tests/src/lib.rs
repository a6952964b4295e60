//! Shared helpers for the anchor-layout integration tests.
//!
//! Provides deterministic keys, a registry-backed config for the vault
//! program, and JSON-serializable snapshot types for insta.

use anchor_layout::{
    CodecResult, DecodedField, DecodedInstruction, DecoderConfig, InstructionFormatter,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

pub use vault_schema::VaultProgram;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Key made of one repeated byte. Stable across runs, readable in snapshots.
pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

/// Anchor discriminator computed independently of the library.
pub fn anchor_discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("{namespace}:{name}").as_bytes());
    let hash = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash[..8]);
    disc
}

/// Config with the vault program registered.
pub fn vault_config() -> DecoderConfig {
    DecoderConfig::default().with_programs(vec![Box::new(VaultProgram)])
}

// ---------------------------------------------------------------------------
// Snapshot types (JSON-serializable for insta)
// ---------------------------------------------------------------------------

/// JSON-serializable snapshot of a single instruction.
#[derive(Debug, Serialize)]
pub struct InstructionSnapshot {
    pub program_id: String,
    pub program_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub accounts: Vec<AccountSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_fields: Option<Vec<FieldSnapshot>>,
}

/// JSON-serializable snapshot of an account reference within an instruction.
#[derive(Debug, Serialize)]
pub struct AccountSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// JSON-serializable snapshot of a decoded field.
#[derive(Debug, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldSnapshot>,
}

impl From<&DecodedField> for FieldSnapshot {
    fn from(field: &DecodedField) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            children: field.children.iter().map(FieldSnapshot::from).collect(),
        }
    }
}

/// Decode `ix` through the config's registry and capture the result.
pub fn instruction_snapshot(ix: &Instruction, config: &DecoderConfig) -> InstructionSnapshot {
    let registry = config.program_registry();
    let decoded = config.decode_instruction(ix);
    let (name, error, fields, account_names) = match &decoded {
        Some(Ok(decoded)) => (
            Some(decoded.name.clone()),
            None,
            Some(decoded.fields.iter().map(FieldSnapshot::from).collect()),
            decoded.account_names.clone(),
        ),
        Some(Err(err)) => (None, Some(err.to_string()), None, Vec::new()),
        None => (None, None, None, Vec::new()),
    };

    InstructionSnapshot {
        program_id: ix.program_id.to_string(),
        program_name: registry.program_name(&ix.program_id).to_string(),
        instruction_name: name,
        error,
        accounts: account_snapshots(&ix.accounts, &account_names),
        decoded_fields: fields,
    }
}

fn account_snapshots(accounts: &[AccountMeta], names: &[String]) -> Vec<AccountSnapshot> {
    accounts
        .iter()
        .enumerate()
        .map(|(i, meta)| AccountSnapshot {
            name: names.get(i).cloned(),
            pubkey: meta.pubkey.to_string(),
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        })
        .collect()
}

/// Render an instruction the way `log_events` would.
pub fn format_instruction(ix: &Instruction, config: &DecoderConfig) -> String {
    let decoded: CodecResult<DecodedInstruction> = match config.decode_instruction(ix) {
        Some(result) => result,
        None => Err(anchor_layout::CodecError::UnknownSchema(
            anchor_layout::Discriminator::from_slice(&ix.data).unwrap_or_default(),
        )),
    };
    InstructionFormatter::new(config).format(ix, &decoded)
}
