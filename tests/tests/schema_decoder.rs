use explorer_decoder::{
    decode_message, schema::anchor_discriminator, AccountSource, FieldSchema, FieldType,
    FieldValue, InstructionKind, InstructionSchema, ProgramSchema, ResolvedAccountRef,
};
use explorer_decoder_tests::{
    address, Harness, MessageBuilder, StaticLookupSource, StaticSchemaSource,
};

fn refs(count: u8) -> Vec<ResolvedAccountRef> {
    (0..count)
        .map(|seed| ResolvedAccountRef {
            address: address(seed + 1),
            is_signer: seed == 0,
            is_writable: true,
            source: AccountSource::Static,
        })
        .collect()
}

#[test]
fn schema_parses_from_registry_json() {
    let schema: ProgramSchema = serde_json::from_value(serde_json::json!({
        "program_name": "Lending Program",
        "instructions": [
            {
                "name": "deposit",
                "discriminator": [242, 35, 198, 137, 82, 225, 242, 182],
                "fields": [
                    { "name": "amount", "type": "u64" },
                    { "name": "leverage", "type": "u16" }
                ],
                "accounts": ["reserve", "depositor"]
            },
            { "name": "initialize" }
        ]
    }))
    .unwrap();

    assert_eq!(schema.program_name.as_deref(), Some("Lending Program"));
    assert_eq!(schema.instructions.len(), 2);
    assert_eq!(schema.instructions[0].fields[1].ty, FieldType::U16);
    // No declared discriminator: the anchor-style tag applies.
    assert_eq!(
        schema.instructions[1].effective_discriminator().as_ref(),
        anchor_discriminator("initialize").as_slice()
    );
}

#[test]
fn schema_decodes_fields_and_named_accounts() {
    let schema = ProgramSchema {
        program_name: None,
        instructions: vec![InstructionSchema {
            name: "deposit".to_string(),
            discriminator: vec![7, 7],
            fields: vec![
                FieldSchema {
                    name: "amount".to_string(),
                    ty: FieldType::U64,
                },
                FieldSchema {
                    name: "auto_compound".to_string(),
                    ty: FieldType::Bool,
                },
            ],
            accounts: vec!["reserve".to_string(), "depositor".to_string()],
        }],
    };

    let mut data = vec![7, 7];
    data.extend_from_slice(&31_337u64.to_le_bytes());
    data.push(1);

    let decoded = schema.decode(&data, &refs(2)).unwrap();
    assert_eq!(decoded.variant, "deposit");
    assert_eq!(decoded.fields.len(), 4);
    assert_eq!(decoded.fields[0].name, "reserve");
    assert_eq!(decoded.fields[0].value, FieldValue::Address(address(1)));
    assert_eq!(decoded.fields[2].value, FieldValue::U64(31_337));
    assert_eq!(decoded.fields[3].value, FieldValue::Bool(true));
}

#[test]
fn schema_decodes_anchor_tagged_payloads() {
    let schema = ProgramSchema {
        program_name: None,
        instructions: vec![InstructionSchema {
            name: "initialize".to_string(),
            discriminator: vec![],
            fields: vec![],
            accounts: vec![],
        }],
    };

    let data = anchor_discriminator("initialize").to_vec();
    assert_eq!(schema.decode(&data, &[]).unwrap().variant, "initialize");
    assert!(schema.decode(&[0xff; 8], &[]).is_none());
}

#[test]
fn schema_payload_shorter_than_layout_does_not_decode() {
    let schema = ProgramSchema {
        program_name: None,
        instructions: vec![InstructionSchema {
            name: "deposit".to_string(),
            discriminator: vec![7],
            fields: vec![FieldSchema {
                name: "amount".to_string(),
                ty: FieldType::U64,
            }],
            accounts: vec![],
        }],
    };
    assert!(schema.decode(&[7, 1, 2, 3], &[]).is_none());
}

#[test]
fn schema_with_more_account_names_than_refs_does_not_decode() {
    let schema = ProgramSchema {
        program_name: None,
        instructions: vec![InstructionSchema {
            name: "deposit".to_string(),
            discriminator: vec![7],
            fields: vec![],
            accounts: vec!["reserve".to_string(), "depositor".to_string()],
        }],
    };
    assert!(schema.decode(&[7], &refs(1)).is_none());
}

#[tokio::test]
async fn schema_program_name_annotates_when_no_table_entry_exists() {
    let program = address(90);
    let schema = ProgramSchema {
        program_name: Some("Lending Program".to_string()),
        instructions: vec![InstructionSchema {
            name: "sync".to_string(),
            discriminator: vec![4],
            fields: vec![],
            accounts: vec![],
        }],
    };
    let message = MessageBuilder::new()
        .signers(1)
        .readonly_unsigned(1)
        .static_addresses([address(1), program])
        .instruction(1, vec![0], vec![4])
        .build();

    let harness = Harness::new(
        StaticLookupSource::new(),
        StaticSchemaSource::new().with_schema(program, schema),
    );
    let decoded = decode_message(&message, &harness.context()).await.unwrap();

    assert_eq!(
        decoded.instructions[0].program_name.as_deref(),
        Some("Lending Program")
    );
    assert!(matches!(
        &decoded.instructions[0].kind,
        InstructionKind::Known { variant, .. } if variant == "sync"
    ));
}

#[tokio::test]
async fn unmatched_schema_discriminator_falls_back_to_unknown() {
    let program = address(90);
    let schema = ProgramSchema {
        program_name: None,
        instructions: vec![InstructionSchema {
            name: "sync".to_string(),
            discriminator: vec![4],
            fields: vec![],
            accounts: vec![],
        }],
    };
    let message = MessageBuilder::new()
        .signers(1)
        .readonly_unsigned(1)
        .static_addresses([address(1), program])
        .instruction(1, vec![0], vec![99, 1, 2])
        .build();

    let harness = Harness::new(
        StaticLookupSource::new(),
        StaticSchemaSource::new().with_schema(program, schema),
    );
    let decoded = decode_message(&message, &harness.context()).await.unwrap();

    assert_eq!(
        decoded.instructions[0].kind,
        InstructionKind::Unknown {
            data: vec![99, 1, 2]
        }
    );
}
