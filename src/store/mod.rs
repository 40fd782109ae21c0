// ============================================================================
// Module : store
// ============================================================================
// Persistance locale : stockage clé-valeur et ensemble des favoris
// ============================================================================

pub mod favorites;  // Ensemble durable des cryptos favorites
pub mod persistent; // Stockage clé-valeur (fichier ou mémoire)

pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use persistent::{FileStore, MemoryStore, PersistentStore, StoreError};
