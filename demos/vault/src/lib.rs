//! Schemas for a sample vault program.
//!
//! Everything a client needs to talk to the program is derived from the
//! type declarations in [`state`], [`instructions`] and [`events`]:
//! codecs, discriminators, field offsets and filters.

use std::sync::LazyLock;

use anchor_layout::{
    describe_account, describe_instruction, AccountSchema, CodecResult, DecodedAccount,
    DecodedInstruction, Dispatcher, ErrorTable, Filter, ProgramSchema,
};
use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

pub use errors::ERRORS;
pub use events::DepositEvent;
pub use instructions::{
    CloseDepositorArgs, ConfigureArgs, DepositArgs, InitializeArgs, WithdrawArgs,
};
pub use state::{Allocation, Depositor, FeeConfig, Strategy, Vault, VaultState};

pub const ID: Pubkey = Pubkey::from_str_const("8vRH89mP9E2pxqGscFyu3gtXKxnTj8VByEC3zE1d2V7z");
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0; 32]);

pub const VAULT_SEED: &[u8] = b"vault";
pub const DEPOSITOR_SEED: &[u8] = b"depositor";

pub fn find_vault_address(authority: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, authority.as_ref(), mint.as_ref()], &ID)
}

pub fn find_depositor_address(vault: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[DEPOSITOR_SEED, vault.as_ref(), owner.as_ref()], &ID)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultAccount {
    Vault(Vault),
    Depositor(Depositor),
}

impl VaultAccount {
    pub fn describe(&self) -> DecodedAccount {
        match self {
            Self::Vault(account) => describe_account(account),
            Self::Depositor(account) => describe_account(account),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultInstruction {
    Initialize(InitializeArgs),
    Deposit(DepositArgs),
    Withdraw(WithdrawArgs),
    Configure(ConfigureArgs),
    CloseDepositor(CloseDepositorArgs),
}

impl VaultInstruction {
    pub fn describe(&self) -> DecodedInstruction {
        match self {
            Self::Initialize(args) => describe_instruction(args),
            Self::Deposit(args) => describe_instruction(args),
            Self::Withdraw(args) => describe_instruction(args),
            Self::Configure(args) => describe_instruction(args),
            Self::CloseDepositor(args) => describe_instruction(args),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    Deposit(DepositEvent),
}

static ACCOUNTS: LazyLock<CodecResult<Dispatcher<VaultAccount>>> = LazyLock::new(|| {
    Ok(Dispatcher::builder()
        .account(VaultAccount::Vault)?
        .account(VaultAccount::Depositor)?
        .build())
});

static INSTRUCTIONS: LazyLock<CodecResult<Dispatcher<VaultInstruction>>> = LazyLock::new(|| {
    Ok(Dispatcher::builder()
        .instruction(VaultInstruction::Initialize)?
        .instruction(VaultInstruction::Deposit)?
        .instruction(VaultInstruction::Withdraw)?
        .instruction(VaultInstruction::Configure)?
        .instruction(VaultInstruction::CloseDepositor)?
        .build())
});

static EVENTS: LazyLock<CodecResult<Dispatcher<VaultEvent>>> = LazyLock::new(|| {
    Ok(Dispatcher::builder().event(VaultEvent::Deposit)?.build())
});

pub fn account_dispatcher() -> CodecResult<&'static Dispatcher<VaultAccount>> {
    ACCOUNTS.as_ref().map_err(Clone::clone)
}

pub fn instruction_dispatcher() -> CodecResult<&'static Dispatcher<VaultInstruction>> {
    INSTRUCTIONS.as_ref().map_err(Clone::clone)
}

pub fn event_dispatcher() -> CodecResult<&'static Dispatcher<VaultEvent>> {
    EVENTS.as_ref().map_err(Clone::clone)
}

pub fn decode_account(data: &[u8]) -> CodecResult<VaultAccount> {
    account_dispatcher()?.dispatch(data)
}

pub fn decode_instruction(data: &[u8]) -> CodecResult<VaultInstruction> {
    instruction_dispatcher()?.dispatch(data)
}

pub fn decode_event(data: &[u8]) -> CodecResult<VaultEvent> {
    event_dispatcher()?.dispatch(data)
}

/// `getProgramAccounts` filters selecting every depositor of `vault`.
pub fn depositors_of_vault(vault: &Pubkey) -> CodecResult<Vec<Filter>> {
    let mut filters = Vec::with_capacity(3);
    filters.extend(Depositor::size_filter());
    filters.push(Depositor::discriminator_filter());
    filters.push(Depositor::field_filter("vault", vault)?);
    Ok(filters)
}

/// Filters selecting vaults administered by `authority`.
pub fn vaults_of_authority(authority: &Pubkey) -> CodecResult<Vec<Filter>> {
    Ok(vec![
        Vault::discriminator_filter(),
        Vault::field_filter("authority", authority)?,
    ])
}

/// Registry entry for the vault program.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaultProgram;

impl ProgramSchema for VaultProgram {
    fn program_id(&self) -> Pubkey {
        ID
    }

    fn program_name(&self) -> &'static str {
        "Vault Program"
    }

    fn decode_instruction(
        &self,
        data: &[u8],
        accounts: &[AccountMeta],
        strict: bool,
    ) -> CodecResult<DecodedInstruction> {
        let (name, ix) = instruction_dispatcher()?.dispatch_with(data, strict)?;
        tracing::trace!(name, accounts = accounts.len(), "vault instruction");
        Ok(ix.describe())
    }

    fn decode_account(&self, data: &[u8], strict: bool) -> CodecResult<DecodedAccount> {
        let (_, account) = account_dispatcher()?.dispatch_with(data, strict)?;
        Ok(account.describe())
    }

    fn error_table(&self) -> Option<&ErrorTable> {
        Some(&ERRORS)
    }
}
