//! Schema-driven decoding for programs without a built-in decoder.
//!
//! A [`ProgramSchema`] is a declarative description of a program's
//! instructions, fetched at runtime from an external registry (JSON). It is
//! the sole extensibility seam of the decoder: new programs become decodable
//! by publishing a schema, not by adding code.
//!
//! Each [`InstructionSchema`] declares a discriminator byte sequence, an
//! ordered field layout, and positional account names. An empty
//! discriminator means the 8-byte anchor-style tag derived from the
//! instruction name (`sha256("global:<name>")[..8]`).

use std::borrow::Cow;

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{
    error::WireError,
    types::{DecodedVariant, Field, FieldValue, ResolvedAccountRef},
    wire::Cursor,
};

/// A program's published instruction schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgramSchema {
    #[serde(default)]
    pub program_name: Option<String>,
    pub instructions: Vec<InstructionSchema>,
}

/// One instruction variant: discriminator, field layout, account names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstructionSchema {
    pub name: String,
    /// Explicit discriminator bytes. Empty means the anchor-style tag
    /// derived from `name`.
    #[serde(default)]
    pub discriminator: Vec<u8>,
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
    /// Names for the instruction's accounts, matched positionally against
    /// the resolved account list.
    #[serde(default)]
    pub accounts: Vec<String>,
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

/// Wire types a schema field may declare.
///
/// Integers are little-endian fixed-width; `bytes` and `string` carry a
/// u32 length prefix; `address` is 32 raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    U8,
    U16,
    U32,
    U64,
    U128,
    I64,
    Bool,
    Address,
    Bytes,
    String,
}

/// The 8-byte anchor-style discriminator for an instruction name.
pub fn anchor_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("global:{name}").as_bytes());
    let digest = hasher.finalize();
    let mut tag = [0u8; 8];
    tag.copy_from_slice(&digest[..8]);
    tag
}

impl InstructionSchema {
    /// The discriminator this variant matches against: the declared bytes,
    /// or the anchor-style tag when none are declared.
    pub fn effective_discriminator(&self) -> Cow<'_, [u8]> {
        if self.discriminator.is_empty() {
            Cow::Owned(anchor_discriminator(&self.name).to_vec())
        } else {
            Cow::Borrowed(&self.discriminator)
        }
    }
}

impl ProgramSchema {
    /// Decode an instruction payload against this schema.
    ///
    /// When more than one declared discriminator prefixes the payload, the
    /// longest match wins. Returns `None` when nothing matches or the
    /// payload is shorter than the matched variant's declared layout.
    pub fn decode(
        &self,
        data: &[u8],
        accounts: &[ResolvedAccountRef],
    ) -> Option<DecodedVariant> {
        let mut best: Option<(&InstructionSchema, Cow<'_, [u8]>)> = None;
        for instruction in &self.instructions {
            let tag = instruction.effective_discriminator();
            if data.starts_with(&tag)
                && best
                    .as_ref()
                    .is_none_or(|(_, current)| tag.len() > current.len())
            {
                best = Some((instruction, tag));
            }
        }
        let (instruction, tag) = best?;
        decode_fields(instruction, &data[tag.len()..], accounts)
    }
}

fn decode_fields(
    schema: &InstructionSchema,
    payload: &[u8],
    accounts: &[ResolvedAccountRef],
) -> Option<DecodedVariant> {
    let mut fields = Vec::with_capacity(schema.accounts.len() + schema.fields.len());
    for (index, name) in schema.accounts.iter().enumerate() {
        fields.push(Field::address(name, accounts.get(index)?.address));
    }
    let mut cursor = Cursor::new(payload);
    for field in &schema.fields {
        fields.push(Field::new(
            &field.name,
            read_field_value(&mut cursor, field.ty).ok()?,
        ));
    }
    Some(DecodedVariant {
        variant: schema.name.clone(),
        fields,
    })
}

fn read_field_value(cursor: &mut Cursor<'_>, ty: FieldType) -> Result<FieldValue, WireError> {
    match ty {
        FieldType::U8 => cursor.read_u8().map(FieldValue::U8),
        FieldType::U16 => cursor.read_u16_le().map(FieldValue::U16),
        FieldType::U32 => cursor.read_u32_le().map(FieldValue::U32),
        FieldType::U64 => cursor.read_u64_le().map(FieldValue::U64),
        FieldType::U128 => cursor.read_u128_le().map(FieldValue::U128),
        FieldType::I64 => cursor.read_i64_le().map(FieldValue::I64),
        FieldType::Bool => cursor.read_bool().map(FieldValue::Bool),
        FieldType::Address => cursor.read_address().map(FieldValue::Address),
        FieldType::Bytes => cursor
            .read_len_prefixed_bytes()
            .map(|bytes| FieldValue::Bytes(bytes.to_vec())),
        FieldType::String => cursor.read_len_prefixed_string().map(FieldValue::String),
    }
}
