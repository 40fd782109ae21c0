// ============================================================================
// PersistentStore : stockage clé-valeur durable
// ============================================================================
// Interface minimale clé (string) -> valeur (string sérialisée), survivant
// aux redémarrages. La sérialisation JSON est la responsabilité de la couche
// au-dessus (FavoritesStore), pas du backend.
// ============================================================================

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

/// Erreurs de la couche de stockage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lecture ou écriture du backend impossible
    #[error("échec d'accès au stockage : {0}")]
    Io(#[from] io::Error),

    /// La valeur en mémoire n'a pas pu être sérialisée
    #[error("échec de sérialisation : {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Stockage clé-valeur durable.
///
/// L'absence d'une clé est un état valide (None), pas une erreur.
pub trait PersistentStore {
    /// Écrit une valeur sous une clé. L'écriture est committée au retour.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Lit la valeur d'une clé. None si la clé est absente.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Supprime une clé. No-op si elle est absente.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Backend fichier : une clé = un fichier JSON dans le répertoire data.
///
/// Emplacement :
/// - Linux : ~/.local/share/coinday/<clé>.json
/// - macOS : ~/Library/Application Support/coinday/<clé>.json
/// - Windows : C:\Users\<user>\AppData\Roaming\coinday\<clé>.json
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Ouvre le store dans le répertoire data de la plateforme.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coinday");
        Self::open(dir)
    }

    /// Ouvre le store dans un répertoire donné, créé si nécessaire.
    pub fn open(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PersistentStore for FileStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::write(&path, value)?;
        debug!(key, bytes = value.len(), "Saved key to file store");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!(key, error = %e, "Failed to read key from file store");
                Err(e.into())
            }
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Backend en mémoire, pour les tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pré-remplit une clé (état initial d'un test).
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PersistentStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
