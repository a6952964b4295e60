//! Byte-for-byte agreement with borsh and with the system program's
//! bincode instruction encoding.

use anchor_layout::{from_slice, to_vec, AccountSchema, Codec};
use anchor_layout_tests::key;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;
use solana_system_interface::instruction as system_instruction;
use vault_schema::{Allocation, Depositor, FeeConfig, VaultState};

#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
struct BorshFeeConfig {
    deposit_bps: u16,
    withdraw_bps: u16,
    collector: [u8; 32],
}

#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
enum BorshVaultState {
    Active,
    Paused,
    Closed,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
struct BorshAllocation {
    target: [u8; 32],
    weight_bps: u16,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
struct BorshDepositor {
    vault: [u8; 32],
    owner: [u8; 32],
    shares: u64,
    last_deposit_slot: u64,
    reward_checkpoints: [[u64; 2]; 3],
    bump: u8,
}

#[derive(Codec, Debug, PartialEq)]
struct Manifest {
    name: String,
    allocations: Vec<Allocation>,
    delegate: Option<Pubkey>,
    fees: Option<FeeConfig>,
    state: VaultState,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, PartialEq)]
struct BorshManifest {
    name: String,
    allocations: Vec<BorshAllocation>,
    delegate: Option<[u8; 32]>,
    fees: Option<BorshFeeConfig>,
    state: BorshVaultState,
}

/// The system program tags its instructions with a u32 ordinal.
#[derive(Codec, Debug, PartialEq)]
#[codec(ordinal_width = 4)]
enum SystemInstruction {
    CreateAccount {
        lamports: u64,
        space: u64,
        owner: Pubkey,
    },
    Assign { owner: Pubkey },
    Transfer { lamports: u64 },
}

#[test]
fn test_depositor_matches_borsh() {
    let depositor = Depositor {
        vault: key(1),
        owner: key(2),
        shares: 77,
        last_deposit_slot: 123_456,
        reward_checkpoints: [[9, 90], [10, 100], [11, 110]],
        bump: 255,
    };
    let mirror = BorshDepositor {
        vault: [1; 32],
        owner: [2; 32],
        shares: 77,
        last_deposit_slot: 123_456,
        reward_checkpoints: [[9, 90], [10, 100], [11, 110]],
        bump: 255,
    };

    let borsh_bytes = borsh::to_vec(&mirror).unwrap();
    assert_eq!(to_vec(&depositor).unwrap(), borsh_bytes);

    let mut account_data = Depositor::DISCRIMINATOR.0.to_vec();
    account_data.extend_from_slice(&borsh_bytes);
    assert_eq!(depositor.to_account_data().unwrap(), account_data);
    assert_eq!(
        Depositor::try_from_account_data(&account_data).unwrap(),
        depositor
    );
}

#[test]
fn test_containers_match_borsh() {
    let cases = [
        (
            Manifest {
                name: "vault ünïcode".to_string(),
                allocations: vec![
                    Allocation {
                        target: key(3),
                        weight_bps: 7_000,
                    },
                    Allocation {
                        target: key(4),
                        weight_bps: 3_000,
                    },
                ],
                delegate: Some(key(5)),
                fees: Some(FeeConfig {
                    deposit_bps: 5,
                    withdraw_bps: 15,
                    collector: key(6),
                }),
                state: VaultState::Paused,
            },
            BorshManifest {
                name: "vault ünïcode".to_string(),
                allocations: vec![
                    BorshAllocation {
                        target: [3; 32],
                        weight_bps: 7_000,
                    },
                    BorshAllocation {
                        target: [4; 32],
                        weight_bps: 3_000,
                    },
                ],
                delegate: Some([5; 32]),
                fees: Some(BorshFeeConfig {
                    deposit_bps: 5,
                    withdraw_bps: 15,
                    collector: [6; 32],
                }),
                state: BorshVaultState::Paused,
            },
        ),
        (
            Manifest {
                name: String::new(),
                allocations: Vec::new(),
                delegate: None,
                fees: None,
                state: VaultState::Closed,
            },
            BorshManifest {
                name: String::new(),
                allocations: Vec::new(),
                delegate: None,
                fees: None,
                state: BorshVaultState::Closed,
            },
        ),
    ];

    for (ours, mirror) in cases {
        let bytes = to_vec(&ours).unwrap();
        assert_eq!(bytes, borsh::to_vec(&mirror).unwrap());
        assert_eq!(borsh::from_slice::<BorshManifest>(&bytes).unwrap(), mirror);
        assert_eq!(from_slice::<Manifest>(&bytes).unwrap(), ours);
    }
}

#[test]
fn test_system_instructions_match_bincode() {
    let from = key(1);
    let to = key(2);
    let owner = key(3);

    let transfer = system_instruction::transfer(&from, &to, 1_500_000);
    assert_eq!(
        from_slice::<SystemInstruction>(&transfer.data).unwrap(),
        SystemInstruction::Transfer {
            lamports: 1_500_000
        }
    );
    assert_eq!(
        to_vec(&SystemInstruction::Transfer {
            lamports: 1_500_000
        })
        .unwrap(),
        transfer.data
    );

    let assign = system_instruction::assign(&to, &owner);
    assert_eq!(
        to_vec(&SystemInstruction::Assign { owner }).unwrap(),
        assign.data
    );

    let create = system_instruction::create_account(&from, &to, 2_000_000, 165, &owner);
    let decoded = from_slice::<SystemInstruction>(&create.data).unwrap();
    assert_eq!(
        decoded,
        SystemInstruction::CreateAccount {
            lamports: 2_000_000,
            space: 165,
            owner,
        }
    );
    assert_eq!(to_vec(&decoded).unwrap(), create.data);
}
