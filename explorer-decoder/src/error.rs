//! Error types for the decoder pipeline.
//!
//! Each failure domain has its own enum:
//! - [`WireError`] -- malformed bytes while reading the wire encoding
//! - [`MessageError`] -- structural header violations, the only whole-message failure
//! - [`ResolveError`] -- a single account index that cannot be resolved
//! - [`FetchError`] -- failures reported by the injected lookup-table/schema sources
//!
//! Per-instruction errors never escape the orchestrator; they are converted to
//! `Unknown` entries in the decoded output.

use solana_pubkey::Pubkey;
use thiserror::Error;

/// Errors produced while reading the compiled wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unexpected end of input at byte {offset}, needed {needed} more bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("malformed compact-u16 length prefix at byte {offset}")]
    MalformedLength { offset: usize },

    #[error("byte {offset} is not a valid boolean")]
    InvalidBoolean { offset: usize },

    #[error("invalid utf-8 string at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unsupported message version {0}")]
    UnsupportedVersion(u8),

    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
}

/// Structural header violations.
///
/// These indicate a malformed message as a whole and are raised to the caller
/// of `decode_message`, unlike every per-instruction condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("header requires {required} signatures but message carries {static_count} static addresses")]
    TooManySigners { required: u8, static_count: usize },

    #[error("header marks {readonly} readonly signed accounts but only {required} signatures are required")]
    ReadonlySignedOutOfRange { readonly: u8, required: u8 },

    #[error("header marks {readonly} readonly unsigned accounts but only {unsigned} static addresses are unsigned")]
    ReadonlyUnsignedOutOfRange { readonly: u8, unsigned: usize },
}

/// A single account index that cannot be resolved.
///
/// `InvalidIndex` means the index is structurally impossible for this message;
/// `UnresolvedLookup` means the index points into a lookup table whose contents
/// are unavailable or too short. The two are kept distinct for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("account index {index} out of range for combined address space of {combined_len}")]
    InvalidIndex { index: usize, combined_len: usize },

    #[error("lookup table {table_address} has no resolvable entry at index {table_index}")]
    UnresolvedLookup {
        table_address: Pubkey,
        table_index: u8,
    },
}

/// Failures reported by the injected lookup-table and schema sources.
///
/// The engine never treats these as fatal: an unavailable table surfaces as
/// [`ResolveError::UnresolvedLookup`] on the instructions that need it, and an
/// unavailable schema simply leaves instructions undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Custom(String),
}
