//! Display-oriented views of decoded values.

use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

use crate::discriminator::Discriminator;

/// A decoded field for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: String,
    /// Rendered value. Empty for plain containers; the variant name for
    /// tagged unions.
    pub value: String,
    pub children: Vec<DecodedField>,
}

impl DecodedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<DecodedField>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            children,
        }
    }

    /// A tagged-union value: variant name plus the payload fields.
    pub fn variant(
        name: impl Into<String>,
        variant: &'static str,
        children: Vec<DecodedField>,
    ) -> Self {
        Self {
            name: name.into(),
            value: variant.to_string(),
            children,
        }
    }

    /// Depth-first lookup by dotted path, e.g. `fees.deposit_bps`.
    pub fn find(&self, path: &str) -> Option<&DecodedField> {
        let (head, tail) = match path.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (path, None),
        };
        let child = self.children.iter().find(|c| c.name == head)?;
        match tail {
            Some(tail) => child.find(tail),
            None => Some(child),
        }
    }
}

/// A decoded account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAccount {
    pub name: String,
    pub discriminator: Discriminator,
    pub fields: Vec<DecodedField>,
}

/// A decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Human-readable instruction name (e.g. "Deposit")
    pub name: String,
    pub discriminator: Discriminator,
    pub fields: Vec<DecodedField>,
    /// Account names in order (index corresponds to account position)
    pub account_names: Vec<String>,
}

impl DecodedInstruction {
    pub fn with_fields_and_accounts(
        name: impl Into<String>,
        discriminator: Discriminator,
        fields: Vec<DecodedField>,
        account_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            discriminator,
            fields,
            account_names,
        }
    }

    /// Pair each account with its role name. Accounts past the named ones
    /// are labelled `extra_<n>`.
    pub fn labelled_accounts<'a>(
        &'a self,
        accounts: &'a [AccountMeta],
    ) -> impl Iterator<Item = (String, &'a AccountMeta)> + 'a {
        accounts.iter().enumerate().map(|(i, meta)| {
            let name = self
                .account_names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("extra_{}", i - self.account_names.len()));
            (name, meta)
        })
    }
}

/// Render a value as a [`DecodedField`].
///
/// Derived for every `#[derive(Codec)]` type; implemented here for the
/// primitive and container types.
pub trait Describe {
    fn describe(&self, name: &str) -> DecodedField;

    /// Top-level fields of a record.
    fn fields(&self) -> Vec<DecodedField> {
        self.describe("").children
    }
}

macro_rules! impl_describe_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(&self, name: &str) -> DecodedField {
                    DecodedField::new(name, self.to_string())
                }
            }
        )*
    };
}

impl_describe_display!(
    u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64, bool, Pubkey, Discriminator
);

impl Describe for String {
    fn describe(&self, name: &str) -> DecodedField {
        DecodedField::new(name, format!("{self:?}"))
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self, name: &str) -> DecodedField {
        match self {
            None => DecodedField::new(name, "None"),
            Some(value) => value.describe(name),
        }
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe(&self, name: &str) -> DecodedField {
        self.as_ref().describe(name)
    }
}

fn describe_items<T: Describe>(name: &str, items: &[T]) -> DecodedField {
    let children = items
        .iter()
        .enumerate()
        .map(|(i, item)| item.describe(&format!("[{i}]")))
        .collect();
    DecodedField {
        name: name.to_string(),
        value: format!("len {}", items.len()),
        children,
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self, name: &str) -> DecodedField {
        describe_items(name, self)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(&self, name: &str) -> DecodedField {
        describe_items(name, self)
    }
}
