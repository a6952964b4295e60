use anchor_layout::{
    from_slice, to_vec, AccountSchema, CodecError, Discriminator, Encode, IndexGuidance,
    InstructionArgs, TaggedUnion,
};
use anchor_layout_tests::anchor_discriminator;
use proptest::prelude::*;
use solana_pubkey::Pubkey;
use vault_schema::{
    Allocation, DepositArgs, DepositEvent, Depositor, FeeConfig, Vault, VaultState, WithdrawArgs,
};

fn pubkey() -> impl Strategy<Value = Pubkey> {
    any::<[u8; 32]>().prop_map(Pubkey::new_from_array)
}

fn fee_config() -> impl Strategy<Value = FeeConfig> {
    (any::<u16>(), any::<u16>(), pubkey()).prop_map(|(deposit_bps, withdraw_bps, collector)| {
        FeeConfig {
            deposit_bps,
            withdraw_bps,
            collector,
        }
    })
}

fn vault_state() -> impl Strategy<Value = VaultState> {
    prop_oneof![
        Just(VaultState::Active),
        Just(VaultState::Paused),
        Just(VaultState::Closed),
    ]
}

fn strategy() -> impl Strategy<Value = vault_schema::Strategy> {
    let allocation = (pubkey(), any::<u16>())
        .prop_map(|(target, weight_bps)| Allocation { target, weight_bps });
    prop_oneof![
        Just(vault_schema::Strategy::Idle),
        (pubkey(), any::<u16>()).prop_map(|(market, max_utilization_bps)| {
            vault_schema::Strategy::Lend {
                market,
                max_utilization_bps,
            }
        }),
        prop::collection::vec(allocation, 0..4).prop_map(vault_schema::Strategy::Split),
    ]
}

prop_compose! {
    fn vault()(
        authority in pubkey(),
        mint in pubkey(),
        state in vault_state(),
        bump in any::<u8>(),
        total_deposits in any::<u64>(),
        total_shares in any::<u64>(),
        fees in fee_config(),
        delegate in proptest::option::of(pubkey()),
        strategy in strategy(),
        label in "[a-zA-Z0-9 éü]{0,24}",
    ) -> Vault {
        Vault {
            authority,
            mint,
            state,
            bump,
            total_deposits,
            total_shares,
            fees,
            delegate,
            strategy,
            label,
        }
    }
}

prop_compose! {
    fn depositor()(
        vault in pubkey(),
        owner in pubkey(),
        shares in any::<u64>(),
        last_deposit_slot in any::<u64>(),
        reward_checkpoints in any::<[[u64; 2]; 3]>(),
        bump in any::<u8>(),
    ) -> Depositor {
        Depositor { vault, owner, shares, last_deposit_slot, reward_checkpoints, bump }
    }
}

proptest! {
    #[test]
    fn vault_round_trips_with_exact_length(vault in vault()) {
        let bytes = to_vec(&vault).unwrap();
        prop_assert_eq!(bytes.len(), vault.encoded_len());
        prop_assert_eq!(from_slice::<Vault>(&bytes).unwrap(), vault.clone());

        let data = vault.to_account_data().unwrap();
        prop_assert_eq!(&data[..8], Vault::DISCRIMINATOR.as_bytes());
        prop_assert_eq!(&data[8..], bytes.as_slice());
        prop_assert_eq!(Vault::try_from_account_data(&data).unwrap(), vault);
    }

    #[test]
    fn depositor_is_fixed_size(depositor in depositor()) {
        let data = depositor.to_account_data().unwrap();
        prop_assert_eq!(Some(data.len()), Depositor::size());
        prop_assert_eq!(Depositor::try_from_account_data_strict(&data).unwrap(), depositor);
    }

    #[test]
    fn instruction_args_round_trip(
        amount in any::<u64>(),
        min_shares in proptest::option::of(any::<u64>()),
        guidance in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let deposit = DepositArgs { amount, min_shares };
        let data = deposit.to_instruction_data().unwrap();
        prop_assert_eq!(data.len(), 8 + deposit.encoded_len());
        prop_assert_eq!(DepositArgs::try_from_instruction_data(&data).unwrap(), deposit);

        let withdraw = WithdrawArgs {
            shares: amount,
            index_guidance: IndexGuidance::new(guidance.clone()),
        };
        let data = withdraw.to_instruction_data().unwrap();
        // guidance bytes are carried verbatim after the u32 prefix
        prop_assert_eq!(&data[20..], guidance.as_slice());
        prop_assert_eq!(WithdrawArgs::try_from_instruction_data(&data).unwrap(), withdraw);
    }

    #[test]
    fn optional_law(value in proptest::option::of(pubkey())) {
        let bytes = to_vec(&value).unwrap();
        match value {
            None => prop_assert_eq!(bytes, vec![0u8]),
            Some(key) => {
                prop_assert_eq!(bytes.len(), 33);
                prop_assert_eq!(bytes[0], 1);
                prop_assert_eq!(&bytes[1..], &key.to_bytes()[..]);
            }
        }
    }

    #[test]
    fn vector_length_law(values in prop::collection::vec(any::<u32>(), 0..64)) {
        let bytes = to_vec(&values).unwrap();
        prop_assert_eq!(bytes.len(), 4 + 4 * values.len());
        prop_assert_eq!(&bytes[..4], &(values.len() as u32).to_le_bytes());
    }

    #[test]
    fn ordinal_outside_variant_set_is_rejected(ordinal in 3u32..) {
        let mut bytes = ordinal.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0; 64]);
        prop_assert_eq!(
            from_slice::<vault_schema::Strategy>(&bytes).unwrap_err(),
            CodecError::UnexpectedOrdinal { schema: "Strategy", ordinal }
        );
    }

    #[test]
    fn truncated_input_never_panics(vault in vault(), cut in 0usize..200) {
        let data = vault.to_account_data().unwrap();
        let cut = cut.min(data.len().saturating_sub(1));
        prop_assert!(Vault::try_from_account_data(&data[..cut]).is_err());
    }
}

#[test]
fn discriminator_law() {
    assert_eq!(
        Vault::DISCRIMINATOR.0,
        anchor_discriminator("account", "Vault")
    );
    assert_eq!(
        Depositor::DISCRIMINATOR.0,
        anchor_discriminator("account", "Depositor")
    );
    assert_eq!(
        <DepositEvent as anchor_layout::EventSchema>::DISCRIMINATOR.0,
        anchor_discriminator("event", "DepositEvent")
    );
    // assigned discriminators match the hash Anchor would have produced
    assert_eq!(
        DepositArgs::DISCRIMINATOR,
        Discriminator::for_instruction("deposit")
    );
}

#[test]
fn variant_law() {
    assert_eq!(VaultState::VARIANTS, ["Active", "Paused", "Closed"]);
    assert_eq!(to_vec(&VaultState::Closed).unwrap(), [2]);
    assert_eq!(
        from_slice::<VaultState>(&[3]).unwrap_err(),
        CodecError::UnexpectedOrdinal {
            schema: "VaultState",
            ordinal: 3
        }
    );

    let split = vault_schema::Strategy::Split(Vec::new());
    assert_eq!(split.ordinal(), 2);
    assert_eq!(to_vec(&split).unwrap(), [2, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        <vault_schema::Strategy as TaggedUnion>::ORDINAL_WIDTH.len(),
        4
    );
}

#[test]
fn empty_vector_boundary() {
    assert_eq!(to_vec(&Vec::<Pubkey>::new()).unwrap(), [0, 0, 0, 0]);
    assert_eq!(to_vec(&String::new()).unwrap(), [0, 0, 0, 0]);
    assert_eq!(
        from_slice::<Vec<Pubkey>>(&[0, 0, 0, 0]).unwrap(),
        Vec::<Pubkey>::new()
    );
}

#[test]
fn oversized_length_prefix_is_malformed() {
    let mut bytes = 1_000_000u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0; 34]);
    assert!(matches!(
        from_slice::<Vec<Allocation>>(&bytes),
        Err(CodecError::MalformedLength {
            len: 1_000_000,
            min_bytes: 34_000_000,
            remaining: 34,
            ..
        })
    ));
}
