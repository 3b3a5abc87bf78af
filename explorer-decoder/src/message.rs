//! The compiled message data model.
//!
//! A [`Message`] is the compact, index-based encoding of a transaction's
//! accounts and instructions: a header partitioning the static address list
//! into signer/writable regions, the static addresses themselves, compiled
//! instructions that reference accounts by index, and (for versioned
//! messages) references into external address lookup tables.
//!
//! Messages are built once per decode request, either from wire bytes via
//! [`Message::from_bytes`] or directly from fields, and are read-only
//! thereafter.

use solana_hash::Hash;
use solana_pubkey::Pubkey;

use crate::{
    error::{MessageError, WireError},
    wire::{Cursor, VERSION_PREFIX_MASK},
};

/// The three-byte message header.
///
/// Static addresses are laid out as: writable signers, readonly signers,
/// writable non-signers, readonly non-signers. The header counts recover the
/// partition boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction in compiled form: every account (including the program) is
/// an index into the message's combined address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_index: u8,
    pub account_indexes: Vec<u8>,
    pub data: Vec<u8>,
}

/// A reference to an external address lookup table.
///
/// Carries only the table address and the positions to load from it; the
/// addresses themselves live in the table account and are fetched separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTableLookup {
    pub table_address: Pubkey,
    pub writable_indexes: Vec<u8>,
    pub readonly_indexes: Vec<u8>,
}

impl AddressTableLookup {
    /// Number of dynamic address-space entries this lookup contributes.
    pub fn len(&self) -> usize {
        self.writable_indexes.len() + self.readonly_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A compiled transaction message.
///
/// Duplicate static addresses are legal and positionally significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub static_addresses: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
    pub address_table_lookups: Vec<AddressTableLookup>,
}

impl Message {
    /// Parse a message from its wire encoding.
    ///
    /// Accepts both the legacy encoding (first byte is the signature count,
    /// always below [`VERSION_PREFIX_MASK`]) and the versioned encoding
    /// (first byte is `0x80 | version`); only version 0 carries address
    /// table lookups, and higher versions are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let mut cursor = Cursor::new(bytes);

        let first = cursor.read_u8()?;
        let (versioned, num_required_signatures) = if first & VERSION_PREFIX_MASK != 0 {
            let version = first & !VERSION_PREFIX_MASK;
            if version != 0 {
                return Err(WireError::UnsupportedVersion(version));
            }
            (true, cursor.read_u8()?)
        } else {
            (false, first)
        };

        let header = MessageHeader {
            num_required_signatures,
            num_readonly_signed_accounts: cursor.read_u8()?,
            num_readonly_unsigned_accounts: cursor.read_u8()?,
        };

        let num_static = cursor.read_compact_u16()?;
        let mut static_addresses = Vec::with_capacity(num_static);
        for _ in 0..num_static {
            static_addresses.push(cursor.read_address()?);
        }

        let recent_blockhash = cursor.read_hash()?;

        let num_instructions = cursor.read_compact_u16()?;
        let mut instructions = Vec::with_capacity(num_instructions);
        for _ in 0..num_instructions {
            instructions.push(read_compiled_instruction(&mut cursor)?);
        }

        let mut address_table_lookups = Vec::new();
        if versioned {
            let num_lookups = cursor.read_compact_u16()?;
            address_table_lookups.reserve(num_lookups);
            for _ in 0..num_lookups {
                address_table_lookups.push(read_address_table_lookup(&mut cursor)?);
            }
        }

        if !cursor.is_empty() {
            return Err(WireError::TrailingBytes(cursor.remaining()));
        }

        Ok(Self {
            header,
            static_addresses,
            recent_blockhash,
            instructions,
            address_table_lookups,
        })
    }

    /// Check the structural header invariants.
    ///
    /// A violation here means the message is malformed as a whole; it is the
    /// only condition `decode_message` raises to its caller.
    pub fn validate(&self) -> Result<(), MessageError> {
        let required = self.header.num_required_signatures;
        let readonly_signed = self.header.num_readonly_signed_accounts;
        let readonly_unsigned = self.header.num_readonly_unsigned_accounts;

        if usize::from(required) > self.static_addresses.len() {
            return Err(MessageError::TooManySigners {
                required,
                static_count: self.static_addresses.len(),
            });
        }
        if readonly_signed > required {
            return Err(MessageError::ReadonlySignedOutOfRange {
                readonly: readonly_signed,
                required,
            });
        }
        let unsigned = self.static_addresses.len() - usize::from(required);
        if usize::from(readonly_unsigned) > unsigned {
            return Err(MessageError::ReadonlyUnsignedOutOfRange {
                readonly: readonly_unsigned,
                unsigned,
            });
        }
        Ok(())
    }

    /// Number of inline addresses.
    pub fn static_len(&self) -> usize {
        self.static_addresses.len()
    }

    /// Number of entries contributed by address table lookups.
    pub fn dynamic_len(&self) -> usize {
        self.address_table_lookups.iter().map(|l| l.len()).sum()
    }

    /// Total size of the combined address space.
    pub fn combined_len(&self) -> usize {
        self.static_len() + self.dynamic_len()
    }

    /// Whether the static address at `index` must sign the transaction.
    pub fn is_static_signer(&self, index: usize) -> bool {
        index < usize::from(self.header.num_required_signatures)
    }

    /// Whether the static address at `index` is loaded writable.
    pub fn is_static_writable(&self, index: usize) -> bool {
        let required = usize::from(self.header.num_required_signatures);
        let readonly_signed = usize::from(self.header.num_readonly_signed_accounts);
        let readonly_unsigned = usize::from(self.header.num_readonly_unsigned_accounts);
        if index < required {
            index < required.saturating_sub(readonly_signed)
        } else {
            index < self.static_addresses.len().saturating_sub(readonly_unsigned)
        }
    }

    /// The distinct lookup table addresses this message references, in
    /// declaration order.
    pub fn distinct_table_addresses(&self) -> Vec<Pubkey> {
        let mut distinct = Vec::new();
        for lookup in &self.address_table_lookups {
            if !distinct.contains(&lookup.table_address) {
                distinct.push(lookup.table_address);
            }
        }
        distinct
    }
}

fn read_compiled_instruction(cursor: &mut Cursor<'_>) -> Result<CompiledInstruction, WireError> {
    let program_index = cursor.read_u8()?;
    let num_accounts = cursor.read_compact_u16()?;
    let account_indexes = cursor.read_bytes(num_accounts)?.to_vec();
    let data_len = cursor.read_compact_u16()?;
    let data = cursor.read_bytes(data_len)?.to_vec();
    Ok(CompiledInstruction {
        program_index,
        account_indexes,
        data,
    })
}

fn read_address_table_lookup(cursor: &mut Cursor<'_>) -> Result<AddressTableLookup, WireError> {
    let table_address = cursor.read_address()?;
    let num_writable = cursor.read_compact_u16()?;
    let writable_indexes = cursor.read_bytes(num_writable)?.to_vec();
    let num_readonly = cursor.read_compact_u16()?;
    let readonly_indexes = cursor.read_bytes(num_readonly)?.to_vec();
    Ok(AddressTableLookup {
        table_address,
        writable_indexes,
        readonly_indexes,
    })
}
