// ============================================================================
// CoinDay - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;    // Clients des APIs distantes (CoinGecko, citations)
pub mod app;    // État de l'application
pub mod models; // Structures de données et moteur de liste
pub mod share;  // Collaborateur de partage
pub mod store;  // Persistance locale (favoris)
pub mod ui;     // Interface utilisateur
