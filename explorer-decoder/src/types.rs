//! Resolved and decoded output model.
//!
//! Everything here is created fresh per decode request and owned by the
//! returned [`DecodedMessage`]. The types serialize to JSON (addresses as
//! base58 strings) for consumption by the display layer and snapshot tests.

use std::fmt;

use serde::{Serialize, Serializer};
use solana_pubkey::Pubkey;

/// Where a resolved account reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum AccountSource {
    /// Embedded directly in the message's static address list.
    Static,
    /// Loaded from an external address lookup table.
    Lookup {
        #[serde(serialize_with = "serialize_address")]
        table_address: Pubkey,
        table_index: u8,
    },
}

/// An account index translated into a concrete address plus permission flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedAccountRef {
    #[serde(serialize_with = "serialize_address")]
    pub address: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
    #[serde(flatten)]
    pub source: AccountSource,
}

/// A single decoded field of a known instruction variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn address(name: impl Into<String>, address: Pubkey) -> Self {
        Self::new(name, FieldValue::Address(address))
    }

    pub fn u8(name: impl Into<String>, value: u8) -> Self {
        Self::new(name, FieldValue::U8(value))
    }

    pub fn u32(name: impl Into<String>, value: u32) -> Self {
        Self::new(name, FieldValue::U32(value))
    }

    pub fn u64(name: impl Into<String>, value: u64) -> Self {
        Self::new(name, FieldValue::U64(value))
    }
}

/// A typed field value.
///
/// Serializes untagged so JSON output reads like the explorer expects:
/// numbers as numbers, addresses as base58 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I64(i64),
    Bool(bool),
    Address(#[serde(serialize_with = "serialize_address")] Pubkey),
    Bytes(Vec<u8>),
    String(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::U128(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Address(v) => write!(f, "{v}"),
            Self::Bytes(v) => write!(f, "{}", bs58::encode(v).into_string()),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// A matched instruction variant with its decoded fields.
///
/// Intermediate result shared by the built-in decoders and the schema-driven
/// path; the orchestrator wraps it into an [`InstructionKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedVariant {
    pub variant: String,
    pub fields: Vec<Field>,
}

/// What the registry made of an instruction's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstructionKind {
    /// A decoder matched the payload's discriminator.
    Known { variant: String, fields: Vec<Field> },
    /// No decoder matched, or decoding failed; the raw payload is preserved.
    Unknown {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        data: Vec<u8>,
    },
}

impl InstructionKind {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// One fully decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedInstruction {
    #[serde(serialize_with = "serialize_address")]
    pub program_address: Pubkey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    #[serde(flatten)]
    pub kind: InstructionKind,
    pub accounts: Vec<ResolvedAccountRef>,
}

/// The decoded form of an entire message.
///
/// Always the same length and order as the input's compiled instructions; a
/// failed decode yields an `Unknown` entry in the same position, never a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMessage {
    pub instructions: Vec<DecodedInstruction>,
}

/// Serialize an address as its base58 string form.
fn serialize_address<S: Serializer>(address: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&bs58::encode(address.as_ref()).into_string())
}
