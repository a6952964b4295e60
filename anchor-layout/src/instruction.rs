//! Instruction assembly and parsing.
//!
//! An instruction is a program id, an ordered account list and a payload
//! of `discriminator ‖ args`. Account order is the program's contract:
//! nothing here sorts, deduplicates or otherwise rewrites it.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::{
    codec::{Decode, Encode, Layout},
    cursor::{Reader, Writer},
    discriminator::Discriminator,
    error::{CodecError, CodecResult},
    record::to_vec,
    schema::InstructionArgs,
    types::{DecodedField, Describe},
};

/// `AccountMeta` constructors named after the role they play.
pub mod roles {
    use solana_instruction::AccountMeta;
    use solana_pubkey::Pubkey;

    /// Writable, not a signer.
    pub fn write(pubkey: Pubkey) -> AccountMeta {
        AccountMeta::new(pubkey, false)
    }

    /// Read-only, not a signer.
    pub fn read(pubkey: Pubkey) -> AccountMeta {
        AccountMeta::new_readonly(pubkey, false)
    }

    pub fn writable_signer(pubkey: Pubkey) -> AccountMeta {
        AccountMeta::new(pubkey, true)
    }

    pub fn readonly_signer(pubkey: Pubkey) -> AccountMeta {
        AccountMeta::new_readonly(pubkey, true)
    }

    /// The account paying for the transaction: a writable signer.
    pub fn fee_payer(pubkey: Pubkey) -> AccountMeta {
        writable_signer(pubkey)
    }
}

/// Build an instruction from typed arguments.
///
/// `accounts` are kept exactly as given.
pub fn build_instruction<A: InstructionArgs>(
    program_id: Pubkey,
    accounts: Vec<AccountMeta>,
    args: &A,
) -> CodecResult<Instruction> {
    Ok(Instruction {
        program_id,
        accounts,
        data: args.to_instruction_data()?,
    })
}

/// Build an instruction from an already encoded argument payload.
pub fn build_raw(
    program_id: Pubkey,
    accounts: Vec<AccountMeta>,
    discriminator: Discriminator,
    args: &[u8],
) -> Instruction {
    let mut data = Vec::with_capacity(discriminator.as_ref().len() + args.len());
    data.extend_from_slice(discriminator.as_ref());
    data.extend_from_slice(args);
    Instruction {
        program_id,
        accounts,
        data,
    }
}

/// Decode the arguments of `ix`, checking that it targets `program_id`.
pub fn parse_instruction<A: InstructionArgs>(
    ix: &Instruction,
    program_id: &Pubkey,
) -> CodecResult<A> {
    if ix.program_id != *program_id {
        return Err(CodecError::ProgramMismatch {
            expected: program_id.to_string(),
            found: ix.program_id.to_string(),
        });
    }
    A::try_from_instruction_data(&ix.data)
}

/// Incremental instruction builder.
///
/// ```
/// use anchor_layout::{roles, Discriminator, InstructionBuilder};
/// use solana_pubkey::Pubkey;
///
/// let program_id = Pubkey::new_from_array([7; 32]);
/// let payer = Pubkey::new_from_array([1; 32]);
/// let ix = InstructionBuilder::new(program_id, Discriminator::new([9; 8]))
///     .account(roles::fee_payer(payer))
///     .arg(&42u64)
///     .unwrap()
///     .build();
/// assert_eq!(ix.data.len(), 16);
/// assert!(ix.accounts[0].is_signer);
/// ```
#[derive(Debug, Clone)]
pub struct InstructionBuilder {
    program_id: Pubkey,
    accounts: Vec<AccountMeta>,
    data: Vec<u8>,
}

impl InstructionBuilder {
    /// Start a payload with `discriminator` and no arguments.
    pub fn new(program_id: Pubkey, discriminator: Discriminator) -> Self {
        Self {
            program_id,
            accounts: Vec::new(),
            data: discriminator.as_ref().to_vec(),
        }
    }

    /// Start from typed arguments.
    pub fn with_args<A: InstructionArgs>(program_id: Pubkey, args: &A) -> CodecResult<Self> {
        Ok(Self {
            program_id,
            accounts: Vec::new(),
            data: args.to_instruction_data()?,
        })
    }

    pub fn account(mut self, meta: AccountMeta) -> Self {
        self.accounts.push(meta);
        self
    }

    pub fn accounts(mut self, metas: impl IntoIterator<Item = AccountMeta>) -> Self {
        self.accounts.extend(metas);
        self
    }

    /// Append accounts the program reads beyond its named ones
    /// (remaining accounts). They go after every named account.
    pub fn extra_accounts(self, metas: impl IntoIterator<Item = AccountMeta>) -> Self {
        self.accounts(metas)
    }

    /// Append one encoded argument to the payload.
    pub fn arg<T: Encode + ?Sized>(mut self, value: &T) -> CodecResult<Self> {
        self.data.extend_from_slice(&to_vec(value)?);
        Ok(self)
    }

    pub fn build(self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts,
            data: self.data,
        }
    }
}

/// Asset index guidance: a hint list the remote program uses to locate
/// entries in its own tables.
///
/// The bytes are carried verbatim. Their meaning belongs to the program
/// that receives them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IndexGuidance(pub Vec<u8>);

impl IndexGuidance {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for IndexGuidance {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Layout for IndexGuidance {
    const MIN_LEN: usize = <Vec<u8> as Layout>::MIN_LEN;
}

impl Encode for IndexGuidance {
    fn encoded_len(&self) -> usize {
        self.0.encoded_len()
    }

    fn encode(&self, writer: &mut Writer<'_>) -> CodecResult<()> {
        self.0.encode(writer)
    }
}

impl Decode for IndexGuidance {
    fn decode(reader: &mut Reader<'_>) -> CodecResult<Self> {
        Vec::<u8>::decode(reader).map(Self)
    }
}

impl Describe for IndexGuidance {
    fn describe(&self, name: &str) -> DecodedField {
        DecodedField::new(name, hex::encode(&self.0))
    }
}
