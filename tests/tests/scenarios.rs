//! End-to-end walkthroughs of the codec: one test per user-visible flow.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anchor_layout::{
    build_instruction, from_slice, parse_instruction, roles, to_vec, Codec, CodecError,
    Discriminator, Dispatcher, InstructionArgs,
};
use anchor_layout_tests::key;
use solana_pubkey::Pubkey;

#[derive(Codec, Debug, Clone, PartialEq)]
struct Transfer {
    amount: u64,
    flag: bool,
}

#[derive(Codec, Debug, Clone, PartialEq)]
enum Route {
    Direct,
    Hop { first: u64, second: u64 },
}

#[derive(Codec, Debug, Clone, PartialEq)]
struct Delegation {
    delegate: Option<Pubkey>,
}

#[derive(Codec, Debug, Clone, PartialEq)]
#[codec(
    instruction,
    account_names = ["payer", "source", "destination", "mint", "token_program"]
)]
struct RebalanceArgs {
    amount: u64,
    weight_bps: u16,
}

#[test]
fn test_fixed_record_encodes_little_endian() {
    let value = Transfer {
        amount: 1_000_000,
        flag: true,
    };
    let bytes = to_vec(&value).unwrap();

    assert_eq!(
        bytes,
        [0x40, 0x42, 0x0f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
    );
    assert_eq!(from_slice::<Transfer>(&bytes).unwrap(), value);
    assert_eq!(Transfer::AMOUNT_OFFSET, Some(0));
    assert_eq!(Transfer::FLAG_OFFSET, Some(8));
}

#[test]
fn test_tagged_union_prefixes_ordinal() {
    let value = Route::Hop {
        first: 7,
        second: 9,
    };
    let bytes = to_vec(&value).unwrap();

    assert_eq!(bytes.len(), 17);
    assert_eq!(bytes[0], 1);
    assert_eq!(&bytes[1..9], &7u64.to_le_bytes());
    assert_eq!(&bytes[9..], &9u64.to_le_bytes());
    assert_eq!(from_slice::<Route>(&bytes).unwrap(), value);

    let mut unknown = bytes.clone();
    unknown[0] = 5;
    assert_eq!(
        from_slice::<Route>(&unknown).unwrap_err(),
        CodecError::UnexpectedOrdinal {
            schema: "Route",
            ordinal: 5
        }
    );
}

#[test]
fn test_optional_pubkey_is_one_or_thirty_three_bytes() {
    let none = to_vec(&Delegation { delegate: None }).unwrap();
    assert_eq!(none, [0]);

    let some = Delegation {
        delegate: Some(key(4)),
    };
    let bytes = to_vec(&some).unwrap();
    assert_eq!(bytes.len(), 33);
    assert_eq!(bytes[0], 1);
    assert!(bytes[1..].iter().all(|b| *b == 4));
    assert_eq!(from_slice::<Delegation>(&bytes).unwrap(), some);

    assert_eq!(
        from_slice::<Delegation>(&[2]).unwrap_err(),
        CodecError::MalformedOptionalTag { offset: 0, tag: 2 }
    );
}

#[test]
fn test_instruction_keeps_account_order() {
    let program_id = key(200);
    let accounts = vec![
        roles::fee_payer(key(1)),
        roles::write(key(2)),
        roles::write(key(3)),
        roles::read(key(4)),
        roles::read(key(5)),
    ];
    let args = RebalanceArgs {
        amount: 500,
        weight_bps: 2_500,
    };

    let ix = build_instruction(program_id, accounts.clone(), &args).unwrap();

    assert_eq!(ix.program_id, program_id);
    assert_eq!(ix.accounts, accounts);
    assert_eq!(ix.data.len(), 18);
    assert_eq!(&ix.data[..8], RebalanceArgs::DISCRIMINATOR.as_bytes());
    assert_eq!(
        RebalanceArgs::DISCRIMINATOR,
        Discriminator::for_instruction("rebalance")
    );
    assert_eq!(
        parse_instruction::<RebalanceArgs>(&ix, &program_id).unwrap(),
        args
    );
    assert!(matches!(
        parse_instruction::<RebalanceArgs>(&ix, &key(201)),
        Err(CodecError::ProgramMismatch { .. })
    ));
}

#[test]
fn test_unknown_discriminator_invokes_no_decoder() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let dispatcher: Dispatcher<Transfer> = Dispatcher::builder()
        .register("Transfer", Discriminator::new([1; 8]), move |reader| {
            seen.fetch_add(1, Ordering::SeqCst);
            anchor_layout::Decode::decode(reader)
        })
        .unwrap()
        .build();

    let mut data = vec![2u8; 8];
    data.extend_from_slice(&[0; 9]);
    assert_eq!(
        dispatcher.dispatch(&data).unwrap_err(),
        CodecError::UnknownSchema(Discriminator::new([2; 8]))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    data[..8].copy_from_slice(&[1; 8]);
    let decoded = dispatcher.dispatch(&data).unwrap();
    assert_eq!(
        decoded,
        Transfer {
            amount: 0,
            flag: false
        }
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
