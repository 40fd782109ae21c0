// ============================================================================
// Theme : palette clair/sombre
// ============================================================================
// Configuration explicite passée par référence à chaque fonction de rendu,
// au lieu d'un état global partagé. Portée session : initialisé une fois
// dans App, jamais persisté.
// ============================================================================

use ratatui::style::{Color, Modifier, Style};

/// Palette de l'interface. `dark` bascule l'ensemble des couleurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn light() -> Self {
        Self { dark: false }
    }

    pub fn dark() -> Self {
        Self { dark: true }
    }

    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }

    pub fn label(&self) -> &'static str {
        if self.dark {
            "sombre"
        } else {
            "clair"
        }
    }

    /// Style de base des textes.
    pub fn base(&self) -> Style {
        if self.dark {
            Style::default().fg(Color::White).bg(Color::Black)
        } else {
            Style::default().fg(Color::Black).bg(Color::White)
        }
    }

    /// Style des bordures de blocs.
    pub fn border(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    /// Style des textes secondaires.
    pub fn dim(&self) -> Style {
        if self.dark {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    /// Style des éléments mis en avant (titres, valeurs).
    pub fn accent(&self) -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    /// Style des raccourcis clavier du footer.
    pub fn key(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Style des avertissements et confirmations.
    pub fn warning(&self) -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Style de l'étoile des favoris.
    pub fn favorite(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    /// Style de la ligne sélectionnée.
    pub fn selection(&self, base: Style) -> Style {
        base.add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_palette() {
        let mut theme = Theme::light();
        assert!(!theme.dark);
        assert_eq!(theme.label(), "clair");

        theme.toggle();
        assert!(theme.dark);
        assert_eq!(theme.label(), "sombre");

        theme.toggle();
        assert_eq!(theme, Theme::light());
    }
}
