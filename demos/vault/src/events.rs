use anchor_layout::Codec;
use solana_pubkey::Pubkey;

#[derive(Codec, Debug, Clone, PartialEq, Eq)]
#[codec(event)]
pub struct DepositEvent {
    pub vault: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    pub shares: u64,
}
