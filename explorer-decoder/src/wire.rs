//! Byte-layout primitives for the compiled message encoding.
//!
//! [`Cursor`] reads fixed-width little-endian integers, 32-byte addresses, and
//! compact-u16 length prefixes from a byte slice, tracking its offset so every
//! error reports where the input went wrong. The same cursor backs both the
//! message deserializer and the schema-driven field decoder.

use solana_hash::Hash;
use solana_pubkey::Pubkey;

use crate::error::WireError;

/// Width of an address on the wire.
pub const ADDRESS_BYTES: usize = 32;

/// Width of a blockhash on the wire.
pub const HASH_BYTES: usize = 32;

/// High bit of the first message byte marks a versioned encoding.
pub const VERSION_PREFIX_MASK: u8 = 0x80;

/// A forward-only reader over a byte slice.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read `len` bytes, advancing the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::UnexpectedEof {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, WireError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, WireError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, WireError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_u128_le(&mut self) -> Result<u128, WireError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.read_bytes(16)?);
        Ok(u128::from_le_bytes(buf))
    }

    pub fn read_i64_le(&mut self) -> Result<i64, WireError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.read_bytes(8)?);
        Ok(i64::from_le_bytes(buf))
    }

    /// Read a single byte that must encode `0` or `1`.
    pub fn read_bool(&mut self) -> Result<bool, WireError> {
        let offset = self.pos;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(WireError::InvalidBoolean { offset }),
        }
    }

    pub fn read_address(&mut self) -> Result<Pubkey, WireError> {
        let mut bytes = [0u8; ADDRESS_BYTES];
        bytes.copy_from_slice(self.read_bytes(ADDRESS_BYTES)?);
        Ok(Pubkey::new_from_array(bytes))
    }

    pub fn read_hash(&mut self) -> Result<Hash, WireError> {
        let mut bytes = [0u8; HASH_BYTES];
        bytes.copy_from_slice(self.read_bytes(HASH_BYTES)?);
        Ok(Hash::new_from_array(bytes))
    }

    /// Read a compact-u16 length prefix.
    ///
    /// The encoding stores 7 bits per byte, least-significant group first,
    /// with the high bit as a continuation flag. At most 3 bytes, and the
    /// decoded value must fit in a `u16`.
    pub fn read_compact_u16(&mut self) -> Result<usize, WireError> {
        let offset = self.pos;
        let mut value = 0usize;
        for i in 0..3 {
            let byte = self.read_u8()?;
            value |= usize::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                if value > usize::from(u16::MAX) {
                    return Err(WireError::MalformedLength { offset });
                }
                return Ok(value);
            }
        }
        Err(WireError::MalformedLength { offset })
    }

    /// Read a u32-length-prefixed byte string.
    pub fn read_len_prefixed_bytes(&mut self) -> Result<&'a [u8], WireError> {
        let len = self.read_u32_le()? as usize;
        self.read_bytes(len)
    }

    /// Read a u32-length-prefixed utf-8 string.
    pub fn read_len_prefixed_string(&mut self) -> Result<String, WireError> {
        let offset = self.pos;
        let bytes = self.read_len_prefixed_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| WireError::InvalidUtf8 { offset })
    }
}
