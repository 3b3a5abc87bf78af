//! Injected fetch capabilities and their caches.
//!
//! The engine never talks to the network itself. The surrounding application
//! injects two async sources -- one for lookup-table contents, one for
//! program schemas -- and owns the caches, including their eviction policy.
//!
//! Both caches coalesce concurrent requests for the same key onto a single
//! in-flight fetch: entries are `OnceCell`s keyed in a concurrent map, so a
//! duplicate fetch racing a cache population is harmless rather than a
//! correctness bug. A failed fetch is memoized as unavailable; callers that
//! want retry semantics replace the cache handle.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use solana_pubkey::Pubkey;
use tokio::sync::OnceCell;
use tracing::warn;

use crate::{error::FetchError, schema::ProgramSchema};

/// Reads the ordered address list stored in a lookup table account.
#[async_trait]
pub trait LookupTableSource: Send + Sync {
    async fn fetch_lookup_table(&self, table_address: &Pubkey)
        -> Result<Vec<Pubkey>, FetchError>;
}

/// Reads the declarative instruction schema published for a program, if any.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn fetch_program_schema(
        &self,
        program_address: &Pubkey,
    ) -> Result<Option<ProgramSchema>, FetchError>;
}

type CacheCell<T> = Arc<OnceCell<Option<T>>>;

/// Cache of lookup-table contents, keyed by table address.
#[derive(Debug, Default)]
pub struct LookupTableCache {
    entries: DashMap<Pubkey, CacheCell<Arc<Vec<Pubkey>>>>,
}

impl LookupTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached contents for `table_address`, fetching through
    /// `source` on first use. Concurrent callers for the same table share
    /// one in-flight fetch. `None` means the table is unavailable.
    pub async fn get_or_fetch(
        &self,
        table_address: &Pubkey,
        source: &dyn LookupTableSource,
    ) -> Option<Arc<Vec<Pubkey>>> {
        let cell = self.entries.entry(*table_address).or_default().clone();
        cell.get_or_init(|| async {
            match source.fetch_lookup_table(table_address).await {
                Ok(addresses) => Some(Arc::new(addresses)),
                Err(err) => {
                    warn!(%table_address, %err, "lookup table fetch failed");
                    None
                }
            }
        })
        .await
        .clone()
    }
}

/// Cache of program schemas, keyed by program address.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: DashMap<Pubkey, CacheCell<Arc<ProgramSchema>>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached schema for `program_address`, fetching through
    /// `source` on first use. `None` covers both "no schema published" and
    /// "fetch failed"; either way the program's instructions stay undecoded.
    pub async fn get_or_fetch(
        &self,
        program_address: &Pubkey,
        source: &dyn SchemaSource,
    ) -> Option<Arc<ProgramSchema>> {
        let cell = self.entries.entry(*program_address).or_default().clone();
        cell.get_or_init(|| async {
            match source.fetch_program_schema(program_address).await {
                Ok(schema) => schema.map(Arc::new),
                Err(err) => {
                    warn!(%program_address, %err, "schema fetch failed");
                    None
                }
            }
        })
        .await
        .clone()
    }
}
