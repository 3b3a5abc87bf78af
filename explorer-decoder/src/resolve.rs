//! Account-index resolution across the combined address space.
//!
//! An index below the static address count resolves inline, with signer and
//! writable flags recovered from the header partition. Anything above selects
//! from the flattened dynamic space built from the message's address table
//! lookups: every lookup's writable indexes first, in declaration order, then
//! every lookup's readonly indexes. That writable-before-readonly,
//! lookup-order-preserved concatenation is a format invariant; interleaving
//! per lookup would assign the wrong flags.
//!
//! Program indexes resolve through the same path -- a program id may live in
//! a lookup table, so callers must never assume programs are static-only.

use std::{collections::HashMap, sync::Arc};

use solana_pubkey::Pubkey;

use crate::{
    error::ResolveError,
    message::Message,
    types::{AccountSource, ResolvedAccountRef},
};

/// Per-request mapping from lookup table address to its fetched contents.
///
/// Tables that failed to fetch are simply absent; resolution against them
/// reports [`ResolveError::UnresolvedLookup`].
pub type LookupTableContents = HashMap<Pubkey, Arc<Vec<Pubkey>>>;

/// An entry of the flattened dynamic address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DynamicEntry {
    table_address: Pubkey,
    table_index: u8,
    writable: bool,
}

/// Resolve an account index to an address plus signer/writable flags.
pub fn resolve_account(
    index: usize,
    message: &Message,
    tables: &LookupTableContents,
) -> Result<ResolvedAccountRef, ResolveError> {
    if let Some(&address) = message.static_addresses.get(index) {
        return Ok(ResolvedAccountRef {
            address,
            is_signer: message.is_static_signer(index),
            is_writable: message.is_static_writable(index),
            source: AccountSource::Static,
        });
    }

    let entry =
        dynamic_entry(message, index - message.static_len()).ok_or(ResolveError::InvalidIndex {
            index,
            combined_len: message.combined_len(),
        })?;

    let address = tables
        .get(&entry.table_address)
        .and_then(|addresses| addresses.get(usize::from(entry.table_index)))
        .copied()
        .ok_or(ResolveError::UnresolvedLookup {
            table_address: entry.table_address,
            table_index: entry.table_index,
        })?;

    // Dynamic accounts are never signers, by format rule.
    Ok(ResolvedAccountRef {
        address,
        is_signer: false,
        is_writable: entry.writable,
        source: AccountSource::Lookup {
            table_address: entry.table_address,
            table_index: entry.table_index,
        },
    })
}

/// Select the `dyn_index`-th entry of the flattened dynamic space.
fn dynamic_entry(message: &Message, dyn_index: usize) -> Option<DynamicEntry> {
    let mut remaining = dyn_index;
    for lookup in &message.address_table_lookups {
        if let Some(&table_index) = lookup.writable_indexes.get(remaining) {
            return Some(DynamicEntry {
                table_address: lookup.table_address,
                table_index,
                writable: true,
            });
        }
        remaining -= lookup.writable_indexes.len();
    }
    for lookup in &message.address_table_lookups {
        if let Some(&table_index) = lookup.readonly_indexes.get(remaining) {
            return Some(DynamicEntry {
                table_address: lookup.table_address,
                table_index,
                writable: false,
            });
        }
        remaining -= lookup.readonly_indexes.len();
    }
    None
}
