// ============================================================================
// Écran Favoris
// ============================================================================
// Liste des cryptos favorites persistées, rechargée à l'activation de
// l'écran. La suppression se confirme en deux temps (footer commun).
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::store::PersistentStore;
use crate::ui::theme::Theme;

/// Dessine la zone centrale de l'écran Favoris.
pub fn render_body<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(" ⭐ Mis Criptomonedas Favoritas ");

    if app.favorites.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Aún no tienes favoritas", theme.dim())),
            Line::from(Span::styled(
                "Marca una crypto con [f] en la pantalla de precios",
                theme.dim(),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(theme.base())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .favorites
        .favorites()
        .iter()
        .enumerate()
        .map(|(index, coin)| {
            let line = format!(" ⭐ {}", coin.display());
            let mut style = theme.base();
            if index == app.selected_favorite {
                style = theme.selection(style);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block).style(theme.base());
    frame.render_widget(list, area);
}
