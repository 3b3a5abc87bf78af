//! Reconstruction of compiled instructions into resolved form.

use solana_pubkey::Pubkey;

use crate::{
    error::ResolveError,
    message::{CompiledInstruction, Message},
    resolve::{resolve_account, LookupTableContents},
    types::ResolvedAccountRef,
};

/// An instruction with its program and accounts resolved to addresses.
///
/// The payload is still opaque at this stage; the decoder registry gives it
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInstruction {
    pub program_address: Pubkey,
    pub accounts: Vec<ResolvedAccountRef>,
    pub data: Vec<u8>,
}

/// Resolve a compiled instruction's program index and account indexes.
///
/// Any resolution failure is fatal for this instruction only; the
/// orchestrator converts it to an `Unknown` entry rather than aborting the
/// message.
pub fn reconstruct(
    instruction: &CompiledInstruction,
    message: &Message,
    tables: &LookupTableContents,
) -> Result<RawInstruction, ResolveError> {
    let program_address =
        resolve_account(usize::from(instruction.program_index), message, tables)?.address;
    let accounts = instruction
        .account_indexes
        .iter()
        .map(|&index| resolve_account(usize::from(index), message, tables))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RawInstruction {
        program_address,
        accounts,
        data: instruction.data.clone(),
    })
}
