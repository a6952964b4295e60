use anchor_layout::{
    from_slice, to_vec, AccountSchema, Codec, CodecError, DecodedField, Describe, Discriminator,
    EventSchema, HasLayout, InstructionArgs, Layout, OrdinalWidth, TaggedUnion,
};
use anchor_layout_tests::anchor_discriminator;
use solana_pubkey::Pubkey;

#[derive(Codec, Debug, PartialEq)]
struct Pair(u32, u16);

#[derive(Codec, Debug, PartialEq)]
struct Marker;

#[derive(Codec, Debug, PartialEq)]
#[codec(account, name = "LegacyPool")]
struct Pool {
    admin: Pubkey,
    r#type: u8,
}

#[derive(Codec, Debug, PartialEq)]
#[codec(instruction)]
struct SwapExactInIxData {
    amount_in: u64,
}

#[derive(Codec, Debug, PartialEq)]
#[codec(instruction, name = "migrate_v2")]
struct MigrateInstruction;

#[derive(Codec, Debug, PartialEq)]
#[codec(event, discriminator = [1, 2, 3, 4, 5, 6, 7, 8])]
struct Swapped {
    amount_out: u64,
}

#[derive(Codec, Debug, PartialEq)]
#[codec(ordinal_width = 2)]
enum Side {
    Bid,
    Ask(u32),
}

#[derive(Codec, Debug, PartialEq)]
enum Mixed {
    Small(u8),
    Large(u64, u64),
}

#[test]
fn test_tuple_and_unit_structs() {
    let pair = Pair(7, 9);
    assert_eq!(to_vec(&pair).unwrap(), [7, 0, 0, 0, 9, 0]);
    assert_eq!(from_slice::<Pair>(&[7, 0, 0, 0, 9, 0]).unwrap(), pair);
    assert_eq!(Pair::FIXED_LEN, Some(6));

    assert!(to_vec(&Marker).unwrap().is_empty());
    assert_eq!(from_slice::<Marker>(&[]).unwrap(), Marker);
    assert_eq!(
        from_slice::<Marker>(&[0]).unwrap_err(),
        CodecError::TrailingBytes(1)
    );
}

#[test]
fn test_vectors_of_unit_structs_are_rejected() {
    assert_eq!(Marker::MIN_LEN, 0);
    assert_eq!(
        from_slice::<Vec<Marker>>(&[0xff, 0xff, 0xff, 0xff]).unwrap_err(),
        CodecError::ZeroSizedElements {
            offset: 0,
            len: u32::MAX as usize
        }
    );
    assert_eq!(
        from_slice::<Vec<Marker>>(&[0, 0, 0, 0]).unwrap(),
        Vec::<Marker>::new()
    );
    assert_eq!(
        to_vec(&vec![Marker]).unwrap_err(),
        CodecError::ZeroSizedElements { offset: 0, len: 1 }
    );
}

#[test]
fn test_name_override_and_raw_identifiers() {
    assert_eq!(Pool::NAME, "LegacyPool");
    assert_eq!(
        Pool::DISCRIMINATOR.0,
        anchor_discriminator("account", "LegacyPool")
    );
    assert_eq!(Pool::TYPE_OFFSET, Some(40));
    assert_eq!(Pool::LAYOUT.fields[1].name, "type");
    assert_eq!(Pool::size(), Some(41));
}

#[test]
fn test_instruction_names() {
    assert_eq!(SwapExactInIxData::NAME, "SwapExactIn");
    assert_eq!(
        SwapExactInIxData::DISCRIMINATOR,
        Discriminator::for_instruction("swap_exact_in")
    );
    assert!(SwapExactInIxData::ACCOUNT_NAMES.is_empty());

    assert_eq!(MigrateInstruction::NAME, "migrate_v2");
    assert_eq!(
        MigrateInstruction::DISCRIMINATOR.0,
        anchor_discriminator("global", "migrate_v2")
    );
    assert_eq!(
        MigrateInstruction.to_instruction_data().unwrap(),
        MigrateInstruction::DISCRIMINATOR.0
    );
}

#[test]
fn test_explicit_event_discriminator() {
    assert_eq!(Swapped::NAME, "Swapped");
    assert_eq!(
        Swapped::DISCRIMINATOR,
        Discriminator::new([1, 2, 3, 4, 5, 6, 7, 8])
    );
    let data = Swapped { amount_out: 3 }.to_event_data().unwrap();
    assert_eq!(data[..8], [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(Swapped::try_from_event_data(&data).unwrap().amount_out, 3);
}

#[test]
fn test_two_byte_ordinal() {
    assert_eq!(Side::ORDINAL_WIDTH, OrdinalWidth::U16);
    assert_eq!(to_vec(&Side::Bid).unwrap(), [0, 0]);
    assert_eq!(to_vec(&Side::Ask(5)).unwrap(), [1, 0, 5, 0, 0, 0]);
    assert_eq!(Side::MIN_LEN, 2);
    assert_eq!(Side::FIXED_LEN, None);
    assert_eq!(
        from_slice::<Side>(&[0, 1]).unwrap_err(),
        CodecError::UnexpectedOrdinal {
            schema: "Side",
            ordinal: 256
        }
    );
}

#[test]
fn test_enum_lengths() {
    assert_eq!(Mixed::MIN_LEN, 2);
    assert_eq!(Mixed::FIXED_LEN, None);
    assert_eq!(Mixed::Large(1, 2).ordinal(), 1);
    assert_eq!(Mixed::VARIANTS, ["Small", "Large"]);
    assert!(from_slice::<Mixed>(&[1, 0, 0]).is_err());
}

#[test]
fn test_describe_output() {
    let pool = Pool {
        admin: Pubkey::new_from_array([0; 32]),
        r#type: 3,
    };
    assert_eq!(
        pool.fields(),
        vec![
            DecodedField::new("admin", "11111111111111111111111111111111"),
            DecodedField::new("type", "3"),
        ]
    );

    assert_eq!(
        Side::Ask(9).describe("side"),
        DecodedField::variant("side", "Ask", vec![DecodedField::new("0", "9")])
    );
    assert_eq!(
        Pair(1, 2).fields(),
        vec![DecodedField::new("0", "1"), DecodedField::new("1", "2")]
    );
}
