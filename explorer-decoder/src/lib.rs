//! Transaction-message resolution and instruction decoding for the ledger
//! explorer.
//!
//! Takes a compiled, wire-format transaction message -- the compact,
//! index-based encoding of accounts and instructions -- and turns it into a
//! fully resolved, inspectable representation:
//!
//! - [`Message`] -- the compiled data model, parsed from wire bytes or built
//!   from fields
//! - [`resolve_account`] -- account-index resolution across the static +
//!   lookup-table address space, with header-derived signer/writable flags
//! - [`reconstruct`] -- compiled instruction to [`RawInstruction`]
//! - [`BuiltinProgram`] / [`ProgramSchema`] -- discriminator-driven decoding
//!   for well-known programs, with a schema-driven fallback for everything
//!   else
//! - [`decode_message`] -- the orchestrator: concurrent lookup-table and
//!   schema fetches through caller-owned caches, per-instruction failure
//!   isolation, order-preserving output
//!
//! The engine performs no network I/O of its own; lookup-table contents and
//! program schemas come from injected [`LookupTableSource`] /
//! [`SchemaSource`] capabilities. It neither validates signatures nor
//! executes anything: decoding is a pure transformation from wire bytes to
//! structured data, modulo those injected fetches.

pub mod decode;
pub mod error;
pub mod fetch;
pub mod instruction;
pub mod message;
pub mod programs;
pub mod resolve;
pub mod schema;
pub mod types;
pub mod wire;

pub use decode::{decode_message, DecodeContext};
pub use error::{FetchError, MessageError, ResolveError, WireError};
pub use fetch::{LookupTableCache, LookupTableSource, SchemaCache, SchemaSource};
pub use instruction::{reconstruct, RawInstruction};
pub use message::{AddressTableLookup, CompiledInstruction, Message, MessageHeader};
pub use programs::{BuiltinProgram, ProgramNameTable};
pub use resolve::{resolve_account, LookupTableContents};
pub use schema::{FieldSchema, FieldType, InstructionSchema, ProgramSchema};
pub use types::{
    AccountSource, DecodedInstruction, DecodedMessage, DecodedVariant, Field, FieldValue,
    InstructionKind, ResolvedAccountRef,
};
