//! Instruction arguments and builders.

use anchor_layout::{
    build_instruction, roles, Codec, CodecResult, IndexGuidance, InstructionArgs,
    InstructionBuilder,
};
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::{
    find_depositor_address, find_vault_address,
    state::{FeeConfig, Strategy, VaultState},
    ID, SYSTEM_PROGRAM_ID,
};

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(
    instruction,
    discriminator = [175, 175, 109, 31, 13, 152, 155, 237],
    account_names = ["authority", "vault", "mint", "system_program"]
)]
pub struct InitializeArgs {
    pub fees: FeeConfig,
    pub strategy: Strategy,
    pub label: String,
}

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(
    instruction,
    discriminator = [242, 35, 198, 137, 82, 225, 242, 182],
    account_names = ["owner", "vault", "depositor", "owner_token", "vault_token", "system_program"]
)]
pub struct DepositArgs {
    pub amount: u64,
    pub min_shares: Option<u64>,
}

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(
    instruction,
    discriminator = [183, 18, 70, 156, 148, 109, 161, 34],
    account_names = ["owner", "vault", "depositor", "owner_token", "vault_token"]
)]
pub struct WithdrawArgs {
    pub shares: u64,
    /// Positions of the strategy accounts passed as remaining accounts.
    pub index_guidance: IndexGuidance,
}

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(
    instruction,
    discriminator = [245, 7, 108, 117, 95, 196, 54, 217],
    account_names = ["authority", "vault"]
)]
pub struct ConfigureArgs {
    pub fees: Option<FeeConfig>,
    pub state: Option<VaultState>,
    pub strategy: Option<Strategy>,
}

/// No arguments; the discriminator is derived from the type name.
#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(instruction, account_names = ["owner", "vault", "depositor"])]
pub struct CloseDepositorArgs;

pub fn initialize(
    authority: Pubkey,
    mint: Pubkey,
    args: &InitializeArgs,
) -> CodecResult<Instruction> {
    let (vault, _) = find_vault_address(&authority, &mint);
    build_instruction(
        ID,
        vec![
            roles::writable_signer(authority),
            roles::write(vault),
            roles::read(mint),
            roles::read(SYSTEM_PROGRAM_ID),
        ],
        args,
    )
}

pub fn deposit(
    owner: Pubkey,
    vault: Pubkey,
    owner_token: Pubkey,
    vault_token: Pubkey,
    args: &DepositArgs,
) -> CodecResult<Instruction> {
    let (depositor, _) = find_depositor_address(&vault, &owner);
    build_instruction(
        ID,
        vec![
            roles::writable_signer(owner),
            roles::write(vault),
            roles::write(depositor),
            roles::write(owner_token),
            roles::write(vault_token),
            roles::read(SYSTEM_PROGRAM_ID),
        ],
        args,
    )
}

/// `strategy_accounts` are appended after the named accounts in the order
/// the caller's index guidance refers to them.
pub fn withdraw(
    owner: Pubkey,
    vault: Pubkey,
    owner_token: Pubkey,
    vault_token: Pubkey,
    args: &WithdrawArgs,
    strategy_accounts: &[AccountMeta],
) -> CodecResult<Instruction> {
    let (depositor, _) = find_depositor_address(&vault, &owner);
    Ok(InstructionBuilder::with_args(ID, args)?
        .accounts([
            roles::readonly_signer(owner),
            roles::write(vault),
            roles::write(depositor),
            roles::write(owner_token),
            roles::write(vault_token),
        ])
        .extra_accounts(strategy_accounts.iter().cloned())
        .build())
}

pub fn configure(
    authority: Pubkey,
    vault: Pubkey,
    args: &ConfigureArgs,
) -> CodecResult<Instruction> {
    build_instruction(
        ID,
        vec![roles::readonly_signer(authority), roles::write(vault)],
        args,
    )
}

pub fn close_depositor(owner: Pubkey, vault: Pubkey) -> CodecResult<Instruction> {
    let (depositor, _) = find_depositor_address(&vault, &owner);
    Ok(InstructionBuilder::new(ID, CloseDepositorArgs::DISCRIMINATOR)
        .accounts([
            roles::writable_signer(owner),
            roles::read(vault),
            roles::write(depositor),
        ])
        .build())
}
