// ============================================================================
// Structure : Coin
// ============================================================================
// Représente une cryptomonnaie telle que retournée par l'API de marché.
// Les champs correspondent au JSON de CoinGecko /coins/markets ; les champs
// inconnus de la réponse sont ignorés à la désérialisation.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Enregistrement de marché d'une cryptomonnaie au moment du fetch.
///
/// Le prix est un snapshot, pas une valeur live. `id` est l'identifiant
/// stable CoinGecko (ex: "bitcoin"), jamais vide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Identifiant unique et stable (ex: "bitcoin")
    pub id: String,

    /// Nom d'affichage (ex: "Bitcoin")
    pub name: String,

    /// URI de l'icône
    #[serde(default)]
    pub image: String,

    /// Prix au moment du fetch, en USD. Positif ou nul.
    pub current_price: f64,
}

impl Coin {
    pub fn new(id: impl Into<String>, name: impl Into<String>, current_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            current_price,
        }
    }

    /// Formatte la crypto pour l'affichage en liste.
    ///
    /// Format : "Bitcoin              $50000.00"
    /// Le nom est tronqué à 24 caractères pour éviter le débordement.
    pub fn display(&self) -> String {
        let truncated_name = if self.name.chars().count() <= 24 {
            self.name.clone()
        } else {
            let truncated: String = self.name.chars().take(23).collect();
            format!("{}…", truncated)
        };

        format!("{:<24} {:>14}", truncated_name, self.display_price())
    }

    /// Prix formaté avec le symbole dollar.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.current_price)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
