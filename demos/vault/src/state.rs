//! Vault account state.

use anchor_layout::Codec;
use solana_pubkey::Pubkey;

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
pub struct FeeConfig {
    pub deposit_bps: u16,
    pub withdraw_bps: u16,
    pub collector: Pubkey,
}

#[derive(Codec, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    Active,
    Paused,
    Closed,
}

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub target: Pubkey,
    pub weight_bps: u16,
}

/// Where idle funds go. The program tags this union with a u32.
#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(ordinal_width = 4)]
pub enum Strategy {
    Idle,
    Lend {
        market: Pubkey,
        max_utilization_bps: u16,
    },
    Split(Vec<Allocation>),
}

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(account)]
pub struct Vault {
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub state: VaultState,
    pub bump: u8,
    pub total_deposits: u64,
    pub total_shares: u64,
    pub fees: FeeConfig,
    pub delegate: Option<Pubkey>,
    pub strategy: Strategy,
    pub label: String,
}

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(account)]
pub struct Depositor {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub shares: u64,
    pub last_deposit_slot: u64,
    /// `[epoch, reward_per_share]` for the last three reward epochs.
    pub reward_checkpoints: [[u64; 2]; 3],
    pub bump: u8,
}
