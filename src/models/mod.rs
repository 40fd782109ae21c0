// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application
// ============================================================================

pub mod coin;      // Enregistrement de marché d'une crypto
pub mod coin_list; // Moteur de liste : filtre, tri, tirage aléatoire
pub mod quote;     // Citation du jour

// Re-export des structures principales pour simplifier les imports
pub use coin::Coin;
pub use coin_list::{CoinListEngine, SortDirection};
pub use quote::Quote;
