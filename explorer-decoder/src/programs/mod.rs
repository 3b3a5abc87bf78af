//! Built-in program decoders.
//!
//! The registry is a closed, enum-keyed set of well-known programs with
//! discriminator-driven decoders:
//! - Token program (1-byte tag)
//! - Associated-token program (empty data or 1-byte tag)
//! - Compute-budget program (1-byte tag)
//!
//! Each decoder is a pure function over `(data, accounts)`; account fields
//! are taken positionally from the resolved accounts, never from the payload,
//! and no decoder consults network state. An unmatched tag returns `None`,
//! which the orchestrator renders as `Unknown` -- a normal fallback, not an
//! error. Everything beyond this set goes through the schema-driven path.

use std::collections::HashMap;

use solana_pubkey::{pubkey, Pubkey};

use crate::types::{DecodedVariant, ResolvedAccountRef};

pub mod associated_token;
pub mod compute_budget;
pub mod token;

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const COMPUTE_BUDGET_PROGRAM_ID: Pubkey =
    pubkey!("ComputeBudget111111111111111111111111111111");

/// Well-known programs outside the built-in decoder set, named for display.
const WELL_KNOWN_PROGRAMS: &[(Pubkey, &str)] = &[
    (pubkey!("11111111111111111111111111111111"), "System Program"),
    (
        pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb"),
        "Token-2022 Program",
    ),
    (
        pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr"),
        "Memo Program",
    ),
    (
        pubkey!("Stake11111111111111111111111111111111111111"),
        "Stake Program",
    ),
    (
        pubkey!("Vote111111111111111111111111111111111111111"),
        "Vote Program",
    ),
];

/// The closed set of programs with built-in decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinProgram {
    Token,
    AssociatedToken,
    ComputeBudget,
}

impl BuiltinProgram {
    /// Look up the built-in decoder for a program address, if any.
    pub fn from_address(address: &Pubkey) -> Option<Self> {
        match *address {
            TOKEN_PROGRAM_ID => Some(Self::Token),
            ASSOCIATED_TOKEN_PROGRAM_ID => Some(Self::AssociatedToken),
            COMPUTE_BUDGET_PROGRAM_ID => Some(Self::ComputeBudget),
            _ => None,
        }
    }

    pub fn program_address(&self) -> Pubkey {
        match self {
            Self::Token => TOKEN_PROGRAM_ID,
            Self::AssociatedToken => ASSOCIATED_TOKEN_PROGRAM_ID,
            Self::ComputeBudget => COMPUTE_BUDGET_PROGRAM_ID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Token => "Token Program",
            Self::AssociatedToken => "Associated Token Program",
            Self::ComputeBudget => "Compute Budget Program",
        }
    }

    /// Decode an instruction payload against this program's discriminator
    /// table. Returns `None` for an unknown tag or a payload that does not
    /// match the variant's declared layout.
    pub fn decode(
        &self,
        data: &[u8],
        accounts: &[ResolvedAccountRef],
    ) -> Option<DecodedVariant> {
        match self {
            Self::Token => token::decode(data, accounts),
            Self::AssociatedToken => associated_token::decode(data, accounts),
            Self::ComputeBudget => compute_budget::decode(data, accounts),
        }
    }
}

/// Display names for program addresses.
///
/// Consulted only to annotate decoded instructions; it never affects decoding
/// logic. Built-in and well-known programs are named out of the box, and
/// callers may layer their own overrides on top.
#[derive(Debug, Default)]
pub struct ProgramNameTable {
    overrides: HashMap<Pubkey, String>,
}

impl ProgramNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a display name for `address`.
    pub fn with_override(mut self, address: Pubkey, name: impl Into<String>) -> Self {
        self.overrides.insert(address, name.into());
        self
    }

    pub fn display_name(&self, address: &Pubkey) -> Option<String> {
        if let Some(name) = self.overrides.get(address) {
            return Some(name.clone());
        }
        if let Some(builtin) = BuiltinProgram::from_address(address) {
            return Some(builtin.name().to_string());
        }
        WELL_KNOWN_PROGRAMS
            .iter()
            .find(|(known, _)| known == address)
            .map(|(_, name)| (*name).to_string())
    }
}

/// Take the address of the account at `index`, if present.
///
/// Built-in decoders treat a missing positional account as a layout mismatch
/// and fall back to `Unknown`.
pub(crate) fn account_address(
    accounts: &[ResolvedAccountRef],
    index: usize,
) -> Option<Pubkey> {
    accounts.get(index).map(|account| account.address)
}
