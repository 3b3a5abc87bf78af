//! Compute-budget program instruction decoder.
//!
//! 1-byte discriminator:
//! - 0: RequestUnits (legacy)
//! - 1: RequestHeapFrame
//! - 2: SetComputeUnitLimit
//! - 3: SetComputeUnitPrice
//!
//! These instructions carry no accounts.

use borsh::BorshDeserialize;

use crate::types::{DecodedVariant, Field, ResolvedAccountRef};

const TAG_REQUEST_UNITS: u8 = 0;
const TAG_REQUEST_HEAP_FRAME: u8 = 1;
const TAG_SET_COMPUTE_UNIT_LIMIT: u8 = 2;
const TAG_SET_COMPUTE_UNIT_PRICE: u8 = 3;

#[derive(BorshDeserialize)]
struct RequestUnitsArgs {
    units: u32,
    additional_fee: u32,
}

pub fn decode(data: &[u8], _accounts: &[ResolvedAccountRef]) -> Option<DecodedVariant> {
    let (&tag, payload) = data.split_first()?;
    match tag {
        TAG_REQUEST_UNITS => {
            let args = RequestUnitsArgs::deserialize(&mut &payload[..]).ok()?;
            Some(DecodedVariant {
                variant: "RequestUnits".to_string(),
                fields: vec![
                    Field::u32("units", args.units),
                    Field::u32("additional_fee", args.additional_fee),
                ],
            })
        }
        TAG_REQUEST_HEAP_FRAME => {
            let bytes = u32::deserialize(&mut &payload[..]).ok()?;
            Some(DecodedVariant {
                variant: "RequestHeapFrame".to_string(),
                fields: vec![Field::u32("bytes", bytes)],
            })
        }
        TAG_SET_COMPUTE_UNIT_LIMIT => {
            let units = u32::deserialize(&mut &payload[..]).ok()?;
            Some(DecodedVariant {
                variant: "SetComputeUnitLimit".to_string(),
                fields: vec![Field::u32("units", units)],
            })
        }
        TAG_SET_COMPUTE_UNIT_PRICE => {
            let micro_lamports = u64::deserialize(&mut &payload[..]).ok()?;
            Some(DecodedVariant {
                variant: "SetComputeUnitPrice".to_string(),
                fields: vec![Field::u64("micro_lamports", micro_lamports)],
            })
        }
        _ => None,
    }
}
