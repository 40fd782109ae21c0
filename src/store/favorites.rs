// ============================================================================
// FavoritesStore : ensemble durable des cryptos favorites
// ============================================================================
// Maintient l'ensemble des favoris en mémoire, synchronisé avec le
// PersistentStore sous la clé "favorites". Chaque mutation est écrite de
// manière synchrone avant d'être considérée comme committée : pas de
// write-behind, pas de batching.
//
// Invariant : deux entrées ne partagent jamais le même `id`.
// ============================================================================

use tracing::{debug, info, warn};

use crate::models::Coin;
use crate::store::persistent::{PersistentStore, StoreError};

/// Clé fixe sous laquelle l'ensemble est sérialisé (séquence JSON de Coin).
pub const FAVORITES_KEY: &str = "favorites";

/// Ensemble des cryptos favorites, dédupliqué par `id`, ordre d'insertion
/// conservé.
pub struct FavoritesStore<S: PersistentStore> {
    store: S,
    favorites: Vec<Coin>,
}

impl<S: PersistentStore> FavoritesStore<S> {
    /// Crée le store et charge l'ensemble depuis le backend.
    pub fn new(store: S) -> Result<Self, StoreError> {
        let mut this = Self {
            store,
            favorites: Vec::new(),
        };
        this.load()?;
        Ok(this)
    }

    /// Recharge l'ensemble depuis le backend.
    ///
    /// Clé absente : ensemble vide. Valeur illisible : dégrade en ensemble
    /// vide (loggé, jamais remonté à l'appelant). Seule une erreur d'accès
    /// au backend est remontée.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.favorites = match self.store.load(FAVORITES_KEY)? {
            None => {
                debug!("No stored favorites, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Coin>>(&raw) {
                Ok(coins) => {
                    debug!(count = coins.len(), "Loaded favorites");
                    dedup_by_id(coins)
                }
                Err(e) => {
                    warn!(error = %e, "Stored favorites unreadable, starting empty");
                    Vec::new()
                }
            },
        };
        Ok(())
    }

    /// Vrai ssi une entrée avec le même `id` est dans l'ensemble courant.
    pub fn is_favorite(&self, coin: &Coin) -> bool {
        self.favorites.iter().any(|fav| fav.id == coin.id)
    }

    /// Bascule une crypto : la retire si son `id` est présent, l'ajoute sinon.
    ///
    /// Persiste le nouvel ensemble avant de retourner : un appelant qui
    /// observe Ok a la garantie que le stockage reflète l'ensemble retourné.
    pub fn toggle(&mut self, coin: &Coin) -> Result<&[Coin], StoreError> {
        if self.is_favorite(coin) {
            self.favorites.retain(|fav| fav.id != coin.id);
            info!(coin = %coin.id, "Removed favorite");
        } else {
            self.favorites.push(coin.clone());
            info!(coin = %coin.id, "Added favorite");
        }
        self.persist()?;
        Ok(&self.favorites)
    }

    /// Retire toute entrée portant cet id (no-op si absent) et persiste.
    pub fn remove(&mut self, coin_id: &str) -> Result<&[Coin], StoreError> {
        let before = self.favorites.len();
        self.favorites.retain(|fav| fav.id != coin_id);
        if self.favorites.len() != before {
            info!(coin = %coin_id, "Removed favorite");
        }
        self.persist()?;
        Ok(&self.favorites)
    }

    /// Ensemble courant, dans l'ordre d'insertion.
    pub fn favorites(&self) -> &[Coin] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.favorites)?;
        self.store.save(FAVORITES_KEY, &raw)
    }
}

/// Garde la première entrée de chaque id, dans l'ordre.
fn dedup_by_id(coins: Vec<Coin>) -> Vec<Coin> {
    let mut seen = std::collections::HashSet::new();
    coins
        .into_iter()
        .filter(|coin| seen.insert(coin.id.clone()))
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persistent::MemoryStore;

    fn btc() -> Coin {
        Coin::new("btc", "Bitcoin", 50000.0)
    }

    fn eth() -> Coin {
        Coin::new("eth", "Ethereum", 3000.0)
    }

    #[test]
    fn test_empty_store_loads_empty_set() {
        let favs = FavoritesStore::new(MemoryStore::new()).unwrap();
        assert!(favs.is_empty());
        assert!(!favs.is_favorite(&btc()));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favs = FavoritesStore::new(MemoryStore::new()).unwrap();

        let set = favs.toggle(&btc()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(favs.is_favorite(&btc()));

        let set = favs.toggle(&btc()).unwrap();
        assert!(set.is_empty());
        assert!(!favs.is_favorite(&btc()));
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut favs = FavoritesStore::new(MemoryStore::new()).unwrap();
        favs.toggle(&eth()).unwrap();
        let before: Vec<Coin> = favs.favorites().to_vec();

        favs.toggle(&btc()).unwrap();
        favs.toggle(&btc()).unwrap();

        assert_eq!(favs.favorites(), before.as_slice());
    }

    #[test]
    fn test_dedup_is_by_id_only() {
        let mut favs = FavoritesStore::new(MemoryStore::new()).unwrap();
        favs.toggle(&btc()).unwrap();

        // Même id, autres champs différents : bascule quand même (retire)
        let stale_btc = Coin::new("btc", "Bitcoin", 49000.0);
        let set = favs.toggle(&stale_btc).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_by_id() {
        let mut favs = FavoritesStore::new(MemoryStore::new()).unwrap();
        favs.toggle(&btc()).unwrap();
        favs.toggle(&eth()).unwrap();

        let set = favs.remove("btc").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].id, "eth");

        // Absent : no-op
        let set = favs.remove("btc").unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_mutations_are_persisted_synchronously() {
        let mut favs = FavoritesStore::new(MemoryStore::new()).unwrap();
        favs.toggle(&btc()).unwrap();

        // Le backend reflète la mutation dès le retour de toggle
        let raw = favs.store.load(FAVORITES_KEY).unwrap().unwrap();
        let stored: Vec<Coin> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "btc");

        favs.remove("btc").unwrap();
        let raw = favs.store.load(FAVORITES_KEY).unwrap().unwrap();
        let stored: Vec<Coin> = serde_json::from_str(&raw).unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_reload_sees_persisted_set() {
        let mut favs = FavoritesStore::new(MemoryStore::new()).unwrap();
        favs.toggle(&eth()).unwrap();

        favs.load().unwrap();
        assert!(favs.is_favorite(&eth()));
    }

    #[test]
    fn test_corrupt_stored_value_degrades_to_empty() {
        let store = MemoryStore::with_entry(FAVORITES_KEY, "pas du json{{{");
        let favs = FavoritesStore::new(store).unwrap();
        assert!(favs.is_empty());
    }

    #[test]
    fn test_stored_duplicates_collapse_on_load() {
        let raw = serde_json::to_string(&vec![btc(), eth(), btc()]).unwrap();
        let store = MemoryStore::with_entry(FAVORITES_KEY, &raw);
        let favs = FavoritesStore::new(store).unwrap();

        assert_eq!(favs.len(), 2);
        let ids: Vec<&str> = favs.favorites().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "eth"]);
    }
}
