//! Chain configuration, stored as JSON per genesis hash.

use super::config_key;
use crate::{KeyValueReader, StorageError, WriteBatch};
use alloy_primitives::B256;
use lumen_primitives::ChainConfig;
use tracing::error;

/// Reads the chain configuration stored for `genesis`.
pub fn read_chain_config<DB>(db: &DB, genesis: B256) -> Result<Option<ChainConfig>, StorageError>
where
    DB: KeyValueReader + ?Sized,
{
    let Some(data) = db.get(&config_key(genesis))? else {
        return Ok(None);
    };
    serde_json::from_slice(&data)
        .inspect_err(|err| {
            error!(target: "odr_storage", %genesis, %err, "Invalid chain config JSON");
        })
        .map(Some)
        .map_err(Into::into)
}

/// Queues the chain configuration for `genesis`.
pub fn write_chain_config<B: WriteBatch + ?Sized>(
    batch: &mut B,
    genesis: B256,
    config: &ChainConfig,
) -> Result<(), StorageError> {
    let data = serde_json::to_vec(config)?;
    batch.put(&config_key(genesis), &data);
    Ok(())
}
