use anchor_layout::{ErrorTable, ProgramErrorEntry};

pub const ERRORS: ErrorTable = ErrorTable::new(
    "Vault Program",
    &[
        ProgramErrorEntry::new(6000, "VaultPaused", "Vault is not accepting deposits"),
        ProgramErrorEntry::new(6001, "DepositTooSmall", "Deposit is below the minimum"),
        ProgramErrorEntry::new(6002, "SlippageExceeded", "Minted shares below min_shares"),
        ProgramErrorEntry::new(6003, "InsufficientShares", "Not enough shares to withdraw"),
        ProgramErrorEntry::new(
            6004,
            "InvalidIndexGuidance",
            "Index guidance does not match the remaining accounts",
        ),
        ProgramErrorEntry::new(6005, "Unauthorized", "Signer is not the vault authority"),
    ],
);
