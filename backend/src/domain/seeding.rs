//! Catalogue seeding on first start.

use tracing::info;

use crate::domain::NewGame;
use crate::domain::ports::{Storage, StorageError};

/// Insert the fixed game catalogue if the store has no games yet.
///
/// Idempotent: a store that already holds any games is left untouched, so a
/// second startup never duplicates the catalogue. Returns the number of
/// games inserted.
///
/// # Errors
///
/// Propagates the first [`StorageError`] from the backing store.
pub async fn ensure_seed_catalog(storage: &dyn Storage) -> Result<usize, StorageError> {
    let existing = storage.get_games().await?;
    if !existing.is_empty() {
        return Ok(0);
    }

    info!("seeding game catalogue");
    let catalog = game_catalog::seed_catalog();
    for entry in catalog {
        storage.create_game(NewGame::from(entry)).await?;
    }
    info!(count = catalog.len(), "game catalogue seeded");
    Ok(catalog.len())
}
