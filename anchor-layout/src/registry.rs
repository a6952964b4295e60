//! Program schema registry.
//!
//! Each program contributes a [`ProgramSchema`] that can turn its raw
//! instruction and account bytes into [`DecodedInstruction`] and
//! [`DecodedAccount`] views. The registry routes by program id.

use std::{collections::HashMap, sync::Arc};

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::{
    error::CodecResult,
    program_error::{ErrorTable, ProgramErrorEntry},
    schema::{AccountSchema, InstructionArgs},
    types::{DecodedAccount, DecodedInstruction},
};

pub const UNKNOWN_PROGRAM: &str = "Unknown Program";

/// Trait implemented once per program.
pub trait ProgramSchema: Send + Sync {
    fn program_id(&self) -> Pubkey;

    /// Human-readable program name (e.g. "Vault Program").
    fn program_name(&self) -> &'static str;

    /// Decode instruction data. With `strict`, bytes past the arguments
    /// are an error.
    fn decode_instruction(
        &self,
        data: &[u8],
        accounts: &[AccountMeta],
        strict: bool,
    ) -> CodecResult<DecodedInstruction>;

    /// Decode the data of an account owned by this program.
    fn decode_account(&self, data: &[u8], strict: bool) -> CodecResult<DecodedAccount>;

    fn error_table(&self) -> Option<&ErrorTable> {
        None
    }
}

/// Display view of typed instruction arguments.
pub fn describe_instruction<A: InstructionArgs>(args: &A) -> DecodedInstruction {
    DecodedInstruction::with_fields_and_accounts(
        A::NAME,
        A::DISCRIMINATOR,
        args.fields(),
        A::ACCOUNT_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect(),
    )
}

/// Display view of a typed account.
pub fn describe_account<A: AccountSchema>(account: &A) -> DecodedAccount {
    DecodedAccount {
        name: A::NAME.to_string(),
        discriminator: A::DISCRIMINATOR,
        fields: account.fields(),
    }
}

/// Names of runtime programs that ship without a schema.
fn builtin_program_name(program_id: &Pubkey) -> Option<&'static str> {
    const BUILTINS: &[(&str, &str)] = &[
        ("11111111111111111111111111111111", "System Program"),
        (
            "ComputeBudget111111111111111111111111111111",
            "Compute Budget",
        ),
        (
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "Token Program",
        ),
        (
            "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb",
            "Token 2022 Program",
        ),
        (
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL",
            "Associated Token Program",
        ),
    ];
    let id = program_id.to_string();
    BUILTINS
        .iter()
        .find(|(address, _)| *address == id)
        .map(|(_, name)| *name)
}

/// Registry of program schemas keyed by program id.
#[derive(Clone, Default)]
pub struct ProgramRegistry {
    programs: HashMap<Pubkey, Arc<dyn ProgramSchema>>,
}

impl std::fmt::Debug for ProgramRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.programs.values().map(|p| p.program_name()).collect();
        names.sort_unstable();
        f.debug_struct("ProgramRegistry")
            .field("programs", &names)
            .finish()
    }
}

impl ProgramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema. A later registration for the same program id
    /// replaces the earlier one.
    pub fn register(&mut self, schema: Box<dyn ProgramSchema>) {
        let program_id = schema.program_id();
        tracing::debug!(%program_id, name = schema.program_name(), "program registered");
        self.programs.insert(program_id, Arc::from(schema));
    }

    pub fn register_all(&mut self, schemas: Vec<Box<dyn ProgramSchema>>) {
        for schema in schemas {
            self.register(schema);
        }
    }

    pub fn has_program(&self, program_id: &Pubkey) -> bool {
        self.programs.contains_key(program_id)
    }

    pub fn get(&self, program_id: &Pubkey) -> Option<&Arc<dyn ProgramSchema>> {
        self.programs.get(program_id)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Registered name, a builtin runtime program name, or
    /// [`UNKNOWN_PROGRAM`].
    pub fn program_name(&self, program_id: &Pubkey) -> &'static str {
        self.get(program_id)
            .map(|schema| schema.program_name())
            .or_else(|| builtin_program_name(program_id))
            .unwrap_or(UNKNOWN_PROGRAM)
    }

    /// Decode `ix` with its program's schema. `None` when the program is
    /// not registered.
    pub fn decode_instruction(
        &self,
        ix: &Instruction,
        strict: bool,
    ) -> Option<CodecResult<DecodedInstruction>> {
        let Some(schema) = self.get(&ix.program_id) else {
            tracing::trace!(program_id = %ix.program_id, "no schema for program");
            return None;
        };
        Some(schema.decode_instruction(&ix.data, &ix.accounts, strict))
    }

    /// Decode account data owned by `owner`. `None` when the owner is not
    /// registered.
    pub fn decode_account(
        &self,
        owner: &Pubkey,
        data: &[u8],
        strict: bool,
    ) -> Option<CodecResult<DecodedAccount>> {
        self.get(owner)
            .map(|schema| schema.decode_account(data, strict))
    }

    /// Resolve a custom program error code for `program_id`.
    pub fn lookup_error(
        &self,
        program_id: &Pubkey,
        code: u32,
    ) -> Option<&'static ProgramErrorEntry> {
        self.get(program_id)?.error_table()?.lookup(code)
    }
}
