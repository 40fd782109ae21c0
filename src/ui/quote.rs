// ============================================================================
// Écran Frase : citation du jour
// ============================================================================
// Affiche la citation courante (ou l'indicateur de chargement) ; le fetch
// et le partage sont déclenchés par la boucle d'événements.
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::store::PersistentStore;
use crate::ui::theme::Theme;

/// Dessine la zone centrale de l'écran Frase.
pub fn render_body<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(" 🧠 Frase del día ");

    let mut lines = vec![Line::from("")];

    if app.quote_loading {
        lines.push(Line::from(Span::styled("Cargando frase...", theme.dim())));
    } else if let Some(quote) = &app.quote {
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", quote.quote),
            theme.base().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("- {}", quote.author),
            theme.accent(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Appuyez sur [g] pour récupérer une frase",
            theme.dim(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(theme.base())
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
