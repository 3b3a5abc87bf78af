//! Token program instruction decoder.
//!
//! Token instructions start with a 1-byte discriminator. The variants the
//! explorer decodes:
//! - 1: InitializeAccount
//! - 3: Transfer
//! - 4: Approve
//! - 7: MintTo
//! - 8: Burn
//! - 9: CloseAccount
//! - 12: TransferChecked
//! - 17: SyncNative
//!
//! Argument layouts are little-endian fixed-width; account references come
//! positionally from the instruction's resolved accounts.

use borsh::BorshDeserialize;

use super::account_address;
use crate::types::{DecodedVariant, Field, ResolvedAccountRef};

const TAG_INITIALIZE_ACCOUNT: u8 = 1;
const TAG_TRANSFER: u8 = 3;
const TAG_APPROVE: u8 = 4;
const TAG_MINT_TO: u8 = 7;
const TAG_BURN: u8 = 8;
const TAG_CLOSE_ACCOUNT: u8 = 9;
const TAG_TRANSFER_CHECKED: u8 = 12;
const TAG_SYNC_NATIVE: u8 = 17;

#[derive(BorshDeserialize)]
struct AmountArgs {
    amount: u64,
}

#[derive(BorshDeserialize)]
struct CheckedAmountArgs {
    amount: u64,
    decimals: u8,
}

pub fn decode(data: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let (&tag, payload) = data.split_first()?;
    match tag {
        TAG_INITIALIZE_ACCOUNT => initialize_account(accounts),
        TAG_TRANSFER => transfer(payload, accounts),
        TAG_APPROVE => approve(payload, accounts),
        TAG_MINT_TO => mint_to(payload, accounts),
        TAG_BURN => burn(payload, accounts),
        TAG_CLOSE_ACCOUNT => close_account(accounts),
        TAG_TRANSFER_CHECKED => transfer_checked(payload, accounts),
        TAG_SYNC_NATIVE => sync_native(accounts),
        _ => None,
    }
}

fn initialize_account(accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    Some(DecodedVariant {
        variant: "InitializeAccount".to_string(),
        fields: vec![
            Field::address("account", account_address(accounts, 0)?),
            Field::address("mint", account_address(accounts, 1)?),
            Field::address("owner", account_address(accounts, 2)?),
        ],
    })
}

fn transfer(payload: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let args = AmountArgs::deserialize(&mut &payload[..]).ok()?;
    Some(DecodedVariant {
        variant: "Transfer".to_string(),
        fields: vec![
            Field::address("source", account_address(accounts, 0)?),
            Field::address("destination", account_address(accounts, 1)?),
            Field::address("authority", account_address(accounts, 2)?),
            Field::u64("amount", args.amount),
        ],
    })
}

fn approve(payload: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let args = AmountArgs::deserialize(&mut &payload[..]).ok()?;
    Some(DecodedVariant {
        variant: "Approve".to_string(),
        fields: vec![
            Field::address("source", account_address(accounts, 0)?),
            Field::address("delegate", account_address(accounts, 1)?),
            Field::address("owner", account_address(accounts, 2)?),
            Field::u64("amount", args.amount),
        ],
    })
}

fn mint_to(payload: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let args = AmountArgs::deserialize(&mut &payload[..]).ok()?;
    Some(DecodedVariant {
        variant: "MintTo".to_string(),
        fields: vec![
            Field::address("mint", account_address(accounts, 0)?),
            Field::address("destination", account_address(accounts, 1)?),
            Field::address("authority", account_address(accounts, 2)?),
            Field::u64("amount", args.amount),
        ],
    })
}

fn burn(payload: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let args = AmountArgs::deserialize(&mut &payload[..]).ok()?;
    Some(DecodedVariant {
        variant: "Burn".to_string(),
        fields: vec![
            Field::address("account", account_address(accounts, 0)?),
            Field::address("mint", account_address(accounts, 1)?),
            Field::address("authority", account_address(accounts, 2)?),
            Field::u64("amount", args.amount),
        ],
    })
}

fn close_account(accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    Some(DecodedVariant {
        variant: "CloseAccount".to_string(),
        fields: vec![
            Field::address("account", account_address(accounts, 0)?),
            Field::address("destination", account_address(accounts, 1)?),
            Field::address("owner", account_address(accounts, 2)?),
        ],
    })
}

fn transfer_checked(payload: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let args = CheckedAmountArgs::deserialize(&mut &payload[..]).ok()?;
    Some(DecodedVariant {
        variant: "TransferChecked".to_string(),
        fields: vec![
            Field::address("source", account_address(accounts, 0)?),
            Field::address("mint", account_address(accounts, 1)?),
            Field::address("destination", account_address(accounts, 2)?),
            Field::address("authority", account_address(accounts, 3)?),
            Field::u64("amount", args.amount),
            Field::u8("decimals", args.decimals),
        ],
    })
}

fn sync_native(accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    Some(DecodedVariant {
        variant: "SyncNative".to_string(),
        fields: vec![Field::address("account", account_address(accounts, 0)?)],
    })
}
