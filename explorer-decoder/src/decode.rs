//! The decode orchestrator.
//!
//! [`decode_message`] drives the whole pipeline for one message:
//! 1. validate the header (the only whole-message failure),
//! 2. fetch the distinct referenced lookup tables concurrently,
//! 3. reconstruct every instruction against the resolved address space,
//! 4. fetch schemas for the distinct non-built-in programs concurrently,
//! 5. decode each instruction in order, purely.
//!
//! Any failure while processing instruction *i* (an unresolvable index, a
//! payload that matches no decoder) becomes an `Unknown` entry at position
//! *i*. No instruction-level error ever aborts the
//! message, and no instruction is ever dropped: the output has exactly one
//! entry per compiled instruction, in order.
//!
//! Dropping the returned future abandons any in-flight fetches; callers
//! never observe a partial result.

use std::{collections::HashMap, sync::Arc};

use futures::future::join_all;
use solana_pubkey::Pubkey;
use tracing::debug;

use crate::{
    error::MessageError,
    fetch::{LookupTableCache, LookupTableSource, SchemaCache, SchemaSource},
    instruction::{reconstruct, RawInstruction},
    message::{CompiledInstruction, Message},
    programs::{BuiltinProgram, ProgramNameTable},
    resolve::{resolve_account, LookupTableContents},
    schema::ProgramSchema,
    types::{DecodedInstruction, DecodedMessage, DecodedVariant, InstructionKind},
};

/// Everything a decode pass needs from its surroundings: the injected fetch
/// sources, the caller-owned caches, and the display-name table.
pub struct DecodeContext<'a> {
    pub lookup_source: &'a dyn LookupTableSource,
    pub schema_source: &'a dyn SchemaSource,
    pub lookup_cache: &'a LookupTableCache,
    pub schema_cache: &'a SchemaCache,
    pub program_names: &'a ProgramNameTable,
}

/// Decode a message into its fully resolved, per-instruction form.
///
/// Errs only on structural header violations; every runtime condition is
/// absorbed into per-instruction `Unknown` entries.
pub async fn decode_message(
    message: &Message,
    context: &DecodeContext<'_>,
) -> Result<DecodedMessage, MessageError> {
    message.validate()?;

    let tables = fetch_lookup_contents(message, context).await;

    // Once the table contents are in hand the rest of the pass is
    // synchronous and deterministic, apart from the schema fan-out.
    let reconstructed: Vec<_> = message
        .instructions
        .iter()
        .map(|instruction| reconstruct(instruction, message, &tables))
        .collect();

    let schemas = fetch_schemas(&reconstructed, context).await;

    let instructions = message
        .instructions
        .iter()
        .zip(&reconstructed)
        .map(|(compiled, outcome)| match outcome {
            Ok(raw) => decode_instruction(raw, &schemas, context),
            Err(err) => {
                debug!(%err, "instruction could not be reconstructed");
                unknown_instruction(compiled, message, &tables, context)
            }
        })
        .collect();

    Ok(DecodedMessage { instructions })
}

/// Fetch the distinct referenced lookup tables, concurrently.
///
/// Tables that fail to fetch are left out of the map; the instructions that
/// need them resolve to `Unknown` individually.
async fn fetch_lookup_contents(
    message: &Message,
    context: &DecodeContext<'_>,
) -> LookupTableContents {
    let fetches = message
        .distinct_table_addresses()
        .into_iter()
        .map(|table_address| async move {
            let contents = context
                .lookup_cache
                .get_or_fetch(&table_address, context.lookup_source)
                .await;
            (table_address, contents)
        });
    join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(table_address, contents)| contents.map(|c| (table_address, c)))
        .collect()
}

/// Fetch schemas for the distinct non-built-in programs, concurrently.
///
/// Instructions from the same program share one fetch through the cache's
/// request coalescing.
async fn fetch_schemas(
    reconstructed: &[Result<RawInstruction, crate::error::ResolveError>],
    context: &DecodeContext<'_>,
) -> HashMap<Pubkey, Arc<ProgramSchema>> {
    let mut programs = Vec::new();
    for raw in reconstructed.iter().flatten() {
        if BuiltinProgram::from_address(&raw.program_address).is_none()
            && !programs.contains(&raw.program_address)
        {
            programs.push(raw.program_address);
        }
    }
    let fetches = programs.into_iter().map(|program_address| async move {
        let schema = context
            .schema_cache
            .get_or_fetch(&program_address, context.schema_source)
            .await;
        (program_address, schema)
    });
    join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(program_address, schema)| schema.map(|s| (program_address, s)))
        .collect()
}

/// Decode one reconstructed instruction: built-in registry first, then the
/// schema-driven path, then the raw-bytes fallback.
fn decode_instruction(
    raw: &RawInstruction,
    schemas: &HashMap<Pubkey, Arc<ProgramSchema>>,
    context: &DecodeContext<'_>,
) -> DecodedInstruction {
    let schema = schemas.get(&raw.program_address);
    let decoded = match BuiltinProgram::from_address(&raw.program_address) {
        Some(program) => program.decode(&raw.data, &raw.accounts),
        None => schema.and_then(|schema| schema.decode(&raw.data, &raw.accounts)),
    };

    let program_name = context
        .program_names
        .display_name(&raw.program_address)
        .or_else(|| schema.and_then(|schema| schema.program_name.clone()));

    let kind = match decoded {
        Some(DecodedVariant { variant, fields }) => InstructionKind::Known { variant, fields },
        None => {
            debug!(program = %raw.program_address, "no decoder matched, keeping raw payload");
            InstructionKind::Unknown {
                data: raw.data.clone(),
            }
        }
    };

    DecodedInstruction {
        program_address: raw.program_address,
        program_name,
        kind,
        accounts: raw.accounts.clone(),
    }
}

/// Best-effort `Unknown` entry for an instruction that failed to
/// reconstruct: the program address if it alone resolves, the accounts if
/// they all do, and always the original payload bytes.
fn unknown_instruction(
    compiled: &CompiledInstruction,
    message: &Message,
    tables: &LookupTableContents,
    context: &DecodeContext<'_>,
) -> DecodedInstruction {
    let (program_address, program_name) =
        match resolve_account(usize::from(compiled.program_index), message, tables) {
            Ok(resolved) => (
                resolved.address,
                context.program_names.display_name(&resolved.address),
            ),
            Err(_) => (Pubkey::default(), None),
        };
    let accounts = compiled
        .account_indexes
        .iter()
        .map(|&index| resolve_account(usize::from(index), message, tables))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default();
    DecodedInstruction {
        program_address,
        program_name,
        kind: InstructionKind::Unknown {
            data: compiled.data.clone(),
        },
        accounts,
    }
}
