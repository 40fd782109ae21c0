// ============================================================================
// Gestion des événements
// ============================================================================
// Lecture des événements clavier avec timeout : sans événement pendant
// 250 ms, un Tick est émis pour laisser la boucle redessiner.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application.
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (rafraîchissement)
    Tick,
}

/// Gestionnaire d'événements, sans état.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant, timeout 250 ms).
    ///
    /// Seuls les Press sont retenus : certains OS émettent aussi Release.
    pub fn next(&self) -> Result<Event> {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    Ok(Event::Key(key))
                }
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : prédicats sur les événements
// ============================================================================

/// Touche 'q' (quitter, confirmation en deux temps).
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Échap.
pub fn is_escape_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Esc)
    } else {
        false
    }
}

/// Entrée.
pub fn is_enter_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Enter)
    } else {
        false
    }
}

/// Tab (écran suivant, ou champ suivant sur l'écran Login).
pub fn is_tab_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Tab)
    } else {
        false
    }
}

/// Backspace.
pub fn is_backspace_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Backspace)
    } else {
        false
    }
}

/// Flèche haut ou 'k' (vim).
pub fn is_up_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    } else {
        false
    }
}

/// Flèche bas ou 'j' (vim).
pub fn is_down_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    } else {
        false
    }
}

/// '/' : mode recherche (filtre live).
pub fn is_search_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('/'))
    } else {
        false
    }
}

/// 's' : bascule du tri par prix.
pub fn is_sort_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
    } else {
        false
    }
}

/// 'f' ou Espace : bascule du favori sélectionné.
pub fn is_favorite_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(
            key.code,
            KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char(' ')
        )
    } else {
        false
    }
}

/// 'r' : tirage d'une crypto au hasard.
pub fn is_random_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    } else {
        false
    }
}

/// 'u' : rafraîchit le snapshot de marché.
pub fn is_refresh_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('u') | KeyCode::Char('U'))
    } else {
        false
    }
}

/// 'd' : retire le favori sélectionné (confirmation en deux temps).
pub fn is_remove_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('d') | KeyCode::Char('D'))
    } else {
        false
    }
}

/// 't' : bascule du thème clair/sombre.
pub fn is_theme_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T'))
    } else {
        false
    }
}

/// 'g' : fetch d'une nouvelle citation.
pub fn is_new_quote_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('g') | KeyCode::Char('G'))
    } else {
        false
    }
}

/// 'y' : partage de la citation courante.
pub fn is_share_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'))
    } else {
        false
    }
}

/// Touches '1'..'4' : sélection directe d'un écran.
pub fn screen_digit_from_event(event: &Event) -> Option<u8> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c @ '1'..='4') = key.code {
            return Some(c as u8 - b'0');
        }
    }
    None
}

/// Caractère imprimable pour la saisie (recherche, formulaire).
pub fn is_text_char_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char(c) if !c.is_control())
    } else {
        false
    }
}

/// Extrait le caractère d'un événement clavier.
pub fn get_char_from_event(event: &Event) -> Option<char> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c) = key.code {
            return Some(c);
        }
    }
    None
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), event::KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key('q')));
        assert!(is_quit_event(&key('Q')));
        assert!(!is_quit_event(&key('a')));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_screen_digit_from_event() {
        assert_eq!(screen_digit_from_event(&key('1')), Some(1));
        assert_eq!(screen_digit_from_event(&key('4')), Some(4));
        assert_eq!(screen_digit_from_event(&key('5')), None);
        assert_eq!(screen_digit_from_event(&key('x')), None);
    }

    #[test]
    fn test_text_char_event() {
        assert!(is_text_char_event(&key('a')));
        assert!(is_text_char_event(&key(' ')));
        assert!(is_text_char_event(&key('é')));
        let esc = Event::Key(KeyEvent::new(KeyCode::Esc, event::KeyModifiers::empty()));
        assert!(!is_text_char_event(&esc));
    }
}
