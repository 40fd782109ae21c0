// ============================================================================
// Module : ui
// ============================================================================
// Interface utilisateur terminal : événements, thème, écrans
// ============================================================================

pub mod events;    // Lecture des événements clavier
pub mod favorites; // Écran des favoris
pub mod login;     // Écran de connexion
pub mod prices;    // Routeur de rendu + écran des prix
pub mod quote;     // Écran de la citation du jour
pub mod theme;     // Palette clair/sombre explicite

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use prices::render;
pub use theme::Theme;
