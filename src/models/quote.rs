// ============================================================================
// Structure : Quote
// ============================================================================
// Citation du jour retournée par l'API de phrases.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Une citation avec son auteur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Texte de la citation
    pub quote: String,

    /// Auteur de la citation
    pub author: String,
}

impl Quote {
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
        }
    }

    /// Citation de repli affichée quand le fetch échoue.
    ///
    /// Paire fixe : l'écran Citation montre toujours quelque chose,
    /// jamais une erreur.
    pub fn fallback() -> Self {
        Self::new("Error al obtener la frase", "🙏")
    }

    /// Formatte la citation pour le partage.
    ///
    /// Format : "{quote}" - {author}
    pub fn share_text(&self) -> String {
        format!("\"{}\" - {}", self.quote, self.author)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_text_format() {
        let quote = Quote::new("La simplicité est la sophistication suprême", "Léonard de Vinci");
        assert_eq!(
            quote.share_text(),
            "\"La simplicité est la sophistication suprême\" - Léonard de Vinci"
        );
    }

    #[test]
    fn test_fallback_pair() {
        let quote = Quote::fallback();
        assert_eq!(quote.quote, "Error al obtener la frase");
        assert_eq!(quote.author, "🙏");
    }

    #[test]
    fn test_quote_deserialize() {
        let json = r#"{"quote": "Hazlo simple", "author": "Anónimo"}"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.quote, "Hazlo simple");
        assert_eq!(quote.author, "Anónimo");
    }
}
