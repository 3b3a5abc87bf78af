//! Shared fixtures for the decoder integration tests.
//!
//! Provides deterministic addresses, a message builder, in-memory fetch
//! sources with call counters, and a [`Harness`] that owns the caches and
//! sources a decode pass needs.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use explorer_decoder::{
    AddressTableLookup, CompiledInstruction, DecodeContext, FetchError, LookupTableCache,
    LookupTableSource, Message, MessageHeader, ProgramNameTable, ProgramSchema, SchemaCache,
    SchemaSource,
};
use solana_hash::Hash;
use solana_pubkey::Pubkey;

/// Deterministic address from a seed byte.
pub fn address(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

// ---------------------------------------------------------------------------
// Message builder
// ---------------------------------------------------------------------------

/// Builds messages field by field, starting from an all-zero header.
#[derive(Default)]
pub struct MessageBuilder {
    header: MessageHeader,
    static_addresses: Vec<Pubkey>,
    instructions: Vec<CompiledInstruction>,
    lookups: Vec<AddressTableLookup>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signers(mut self, count: u8) -> Self {
        self.header.num_required_signatures = count;
        self
    }

    pub fn readonly_signed(mut self, count: u8) -> Self {
        self.header.num_readonly_signed_accounts = count;
        self
    }

    pub fn readonly_unsigned(mut self, count: u8) -> Self {
        self.header.num_readonly_unsigned_accounts = count;
        self
    }

    pub fn static_addresses(mut self, addresses: impl IntoIterator<Item = Pubkey>) -> Self {
        self.static_addresses.extend(addresses);
        self
    }

    pub fn instruction(
        mut self,
        program_index: u8,
        account_indexes: Vec<u8>,
        data: Vec<u8>,
    ) -> Self {
        self.instructions.push(CompiledInstruction {
            program_index,
            account_indexes,
            data,
        });
        self
    }

    pub fn lookup(
        mut self,
        table_address: Pubkey,
        writable_indexes: Vec<u8>,
        readonly_indexes: Vec<u8>,
    ) -> Self {
        self.lookups.push(AddressTableLookup {
            table_address,
            writable_indexes,
            readonly_indexes,
        });
        self
    }

    pub fn build(self) -> Message {
        Message {
            header: self.header,
            static_addresses: self.static_addresses,
            recent_blockhash: Hash::default(),
            instructions: self.instructions,
            address_table_lookups: self.lookups,
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory fetch sources
// ---------------------------------------------------------------------------

/// Lookup-table source backed by a fixed map, counting every fetch.
#[derive(Default)]
pub struct StaticLookupSource {
    tables: HashMap<Pubkey, Vec<Pubkey>>,
    calls: AtomicUsize,
}

impl StaticLookupSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table_address: Pubkey, addresses: Vec<Pubkey>) -> Self {
        self.tables.insert(table_address, addresses);
        self
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LookupTableSource for StaticLookupSource {
    async fn fetch_lookup_table(
        &self,
        table_address: &Pubkey,
    ) -> Result<Vec<Pubkey>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tables
            .get(table_address)
            .cloned()
            .ok_or_else(|| FetchError::Network(format!("no table account {table_address}")))
    }
}

/// Schema source backed by a fixed map, counting every fetch.
///
/// Programs listed in `failing` report a timeout instead of a schema.
#[derive(Default)]
pub struct StaticSchemaSource {
    schemas: HashMap<Pubkey, ProgramSchema>,
    failing: Vec<Pubkey>,
    calls: AtomicUsize,
}

impl StaticSchemaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, program_address: Pubkey, schema: ProgramSchema) -> Self {
        self.schemas.insert(program_address, schema);
        self
    }

    pub fn failing_for(mut self, program_address: Pubkey) -> Self {
        self.failing.push(program_address);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn fetch_program_schema(
        &self,
        program_address: &Pubkey,
    ) -> Result<Option<ProgramSchema>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(program_address) {
            return Err(FetchError::Timeout);
        }
        Ok(self.schemas.get(program_address).cloned())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Owns the sources, caches, and name table for one decode pass.
pub struct Harness {
    pub lookup_source: StaticLookupSource,
    pub schema_source: StaticSchemaSource,
    pub lookup_cache: LookupTableCache,
    pub schema_cache: SchemaCache,
    pub program_names: ProgramNameTable,
}

impl Harness {
    pub fn new(lookup_source: StaticLookupSource, schema_source: StaticSchemaSource) -> Self {
        Self {
            lookup_source,
            schema_source,
            lookup_cache: LookupTableCache::new(),
            schema_cache: SchemaCache::new(),
            program_names: ProgramNameTable::new(),
        }
    }

    pub fn context(&self) -> DecodeContext<'_> {
        DecodeContext {
            lookup_source: &self.lookup_source,
            schema_source: &self.schema_source,
            lookup_cache: &self.lookup_cache,
            schema_cache: &self.schema_cache,
            program_names: &self.program_names,
        }
    }
}

// ---------------------------------------------------------------------------
// Instruction payload builders
// ---------------------------------------------------------------------------

/// Token `Transfer` payload: tag 3 plus a little-endian amount.
pub fn token_transfer_data(amount: u64) -> Vec<u8> {
    let mut data = vec![3];
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

/// Compute-budget `SetComputeUnitLimit` payload: tag 2 plus a little-endian
/// unit count.
pub fn compute_unit_limit_data(units: u32) -> Vec<u8> {
    let mut data = vec![2];
    data.extend_from_slice(&units.to_le_bytes());
    data
}
