//! Associated-token program instruction decoder.
//!
//! The create instruction predates the program's discriminator byte, so two
//! encodings are live on chain: empty data, and an explicit `0` tag. Both
//! decode to the same `Create` variant. `1` is the idempotent
//! create-if-absent form, `2` recovers tokens from a nested associated
//! account.

use super::account_address;
use crate::types::{DecodedVariant, Field, ResolvedAccountRef};

const TAG_CREATE: u8 = 0;
const TAG_CREATE_IDEMPOTENT: u8 = 1;
const TAG_RECOVER_NESTED: u8 = 2;

pub fn decode(data: &[u8], accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    match data.first() {
        // Legacy alias: no payload at all means Create.
        None => create("Create", accounts),
        Some(&TAG_CREATE) => create("Create", accounts),
        Some(&TAG_CREATE_IDEMPOTENT) => create("CreateIdempotent", accounts),
        Some(&TAG_RECOVER_NESTED) => recover_nested(accounts),
        Some(_) => None,
    }
}

fn create(variant: &str, accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    Some(DecodedVariant {
        variant: variant.to_string(),
        fields: vec![
            Field::address("funding_account", account_address(accounts, 0)?),
            Field::address("associated_account", account_address(accounts, 1)?),
            Field::address("wallet", account_address(accounts, 2)?),
            Field::address("mint", account_address(accounts, 3)?),
            Field::address("system_program", account_address(accounts, 4)?),
            Field::address("token_program", account_address(accounts, 5)?),
        ],
    })
}

fn recover_nested(accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    Some(DecodedVariant {
        variant: "RecoverNested".to_string(),
        fields: vec![
            Field::address("nested_account", account_address(accounts, 0)?),
            Field::address("nested_mint", account_address(accounts, 1)?),
            Field::address("destination", account_address(accounts, 2)?),
            Field::address("owner_account", account_address(accounts, 3)?),
            Field::address("owner_mint", account_address(accounts, 4)?),
            Field::address("wallet", account_address(accounts, 5)?),
            Field::address("token_program", account_address(accounts, 6)?),
        ],
    })
}
