// ============================================================================
// ShareTarget : collaborateur de partage
// ============================================================================
// Reçoit un message texte déjà formaté et le transmet à l'extérieur.
// Pas de retry : un échec est remonté à l'appelant, qui affiche une alerte.
// ============================================================================

use anyhow::{Context, Result};
use tracing::info;

/// Collaborateur externe acceptant un message texte à partager.
pub trait ShareTarget {
    fn share(&mut self, message: &str) -> Result<()>;
}

/// Partage via le navigateur : ouvre une URL d'intent avec le message.
pub struct BrowserShare;

impl ShareTarget for BrowserShare {
    fn share(&mut self, message: &str) -> Result<()> {
        let url = share_url(message);
        info!(bytes = message.len(), "Opening share URL in browser");
        open::that(&url).context("Échec de l'ouverture du navigateur pour le partage")?;
        Ok(())
    }
}

/// Construit l'URL d'intent de partage avec le message encodé.
fn share_url(message: &str) -> String {
    format!("https://twitter.com/intent/tweet?text={}", urlencode(message))
}

/// Encodage percent minimal des caractères hors unreserved (RFC 3986).
fn urlencode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_passes_unreserved() {
        assert_eq!(urlencode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }

    #[test]
    fn test_urlencode_escapes_spaces_and_quotes() {
        assert_eq!(urlencode("\"hola\" - yo"), "%22hola%22%20-%20yo");
    }

    #[test]
    fn test_urlencode_escapes_utf8_bytes() {
        // Chaque octet UTF-8 est encodé séparément
        assert_eq!(urlencode("é"), "%C3%A9");
    }

    #[test]
    fn test_share_url_embeds_message() {
        let url = share_url("hola mundo");
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(url.ends_with("hola%20mundo"));
    }
}
