// ============================================================================
// Rendu de l'interface
// ============================================================================
// Routeur de rendu + écran principal (liste des prix). Le layout commun
// (header avec onglets, footer avec statut/raccourcis) vit ici ; les autres
// écrans ne dessinent que leur zone centrale.
//
// Le thème est passé explicitement à chaque fonction de rendu.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::store::PersistentStore;
use crate::ui::theme::Theme;
use crate::ui::{favorites, login, quote};

/// Dessine l'interface complète : header, zone de l'écran actif, footer.
pub fn render<S: PersistentStore>(frame: &mut Frame, app: &App<S>) {
    let theme = &app.theme;
    let area = frame.size();

    // Fond uni aux couleurs du thème
    frame.render_widget(Block::default().style(theme.base()), area);

    let chunks = create_layout(area);

    render_header(frame, app, theme, chunks[0]);

    match app.current_screen {
        Screen::Prices => render_price_list(frame, app, theme, chunks[1]),
        Screen::Favorites => favorites::render_body(frame, app, theme, chunks[1]),
        Screen::Quote => quote::render_body(frame, app, theme, chunks[1]),
        Screen::Login => login::render_body(frame, app, theme, chunks[1]),
    }

    render_footer(frame, app, theme, chunks[2]);
}

/// Layout principal : header 3 lignes, contenu, footer 3 lignes.
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : titre + onglets
// ============================================================================

fn render_header<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(" 🪙 CoinDay ")
        .title_alignment(Alignment::Center);

    // Onglets : l'écran actif est mis en avant
    let mut spans: Vec<Span> = Vec::new();
    for (i, screen) in [Screen::Prices, Screen::Favorites, Screen::Quote, Screen::Login]
        .iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled("  │  ", theme.dim()));
        }
        let label = format!("[{}] {}", i + 1, screen.title());
        if app.is_on(*screen) {
            spans.push(Span::styled(label, theme.accent()));
        } else {
            spans.push(Span::styled(label, theme.base()));
        }
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .style(theme.base())
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Écran Prix : liste filtrable et triable
// ============================================================================

fn render_price_list<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    // Titre du bloc : horodatage du snapshot, état du tri et du filtre
    let mut title = format!(
        " 📊 Precios · snapshot {} UTC ",
        app.engine.fetched_at().format("%H:%M")
    );
    if let Some(direction) = app.engine.sort_direction() {
        title.push_str(&format!("({}) ", direction.label()));
    }
    if !app.engine.filter_text().is_empty() {
        title.push_str(&format!("[filtre: {}] ", app.engine.filter_text()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(title);

    if app.is_loading {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Cargando criptos...", theme.dim())),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(theme.base())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    if app.engine.visible().is_empty() {
        let message = if app.engine.is_empty() {
            "Sin datos de mercado"
        } else {
            "Ninguna crypto coincide con el filtro"
        };
        let text = vec![Line::from(""), Line::from(Span::styled(message, theme.dim()))];
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(theme.base())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .engine
        .visible()
        .iter()
        .enumerate()
        .map(|(index, coin)| {
            let star = if app.favorites.is_favorite(coin) {
                "⭐"
            } else {
                "  "
            };
            let line = format!(" {} {}", star, coin.display());

            let mut style = theme.base();
            if index == app.selected_price {
                style = theme.selection(style);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block).style(theme.base());
    frame.render_widget(list, area);
}

// ============================================================================
// Footer : saisie, confirmations, statut, raccourcis
// ============================================================================

fn render_footer<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    // Mode recherche : ligne de saisie à la place des raccourcis
    if app.is_searching() {
        render_search_footer(frame, app, theme, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());

    let line = if app.is_awaiting_remove_confirmation() {
        let name = app
            .selected_favorite_coin()
            .map(|coin| coin.name.as_str())
            .unwrap_or("?");
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", theme.warning()),
            Span::styled(
                "[d]",
                theme.warning().add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                format!(" à nouveau pour retirer {} ⚠", name),
                theme.warning(),
            ),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", theme.warning()),
            Span::styled(
                "[q]",
                theme.warning().add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(" à nouveau pour quitter ⚠", theme.warning()),
        ])
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(status.clone(), theme.accent()))
    } else {
        shortcuts_line(app.current_screen, theme)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .style(theme.base())
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Raccourcis propres à chaque écran.
fn shortcuts_line(screen: Screen, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled("[q]", theme.key()),
        Span::raw(" Quit  "),
        Span::styled("[Tab]", theme.key()),
        Span::raw(" Écran  "),
        Span::styled("[t]", theme.key()),
        Span::raw(" Thème  "),
    ];

    match screen {
        Screen::Prices => {
            spans.extend([
                Span::styled("[/]", theme.key()),
                Span::raw(" Buscar  "),
                Span::styled("[s]", theme.key()),
                Span::raw(" Tri  "),
                Span::styled("[f]", theme.key()),
                Span::raw(" Favori  "),
                Span::styled("[r]", theme.key()),
                Span::raw(" Random  "),
                Span::styled("[u]", theme.key()),
                Span::raw(" Refresh"),
            ]);
        }
        Screen::Favorites => {
            spans.extend([
                Span::styled("[↑↓ / j k]", theme.key()),
                Span::raw(" Navigate  "),
                Span::styled("[d]", theme.key()),
                Span::raw(" Retirer"),
            ]);
        }
        Screen::Quote => {
            spans.extend([
                Span::styled("[g]", theme.key()),
                Span::raw(" Otra Frase  "),
                Span::styled("[y]", theme.key()),
                Span::raw(" Compartir"),
            ]);
        }
        Screen::Login => {
            spans.extend([
                Span::styled("[Tab]", theme.key()),
                Span::raw(" Champ  "),
                Span::styled("[Enter]", theme.key()),
                Span::raw(" Valider  "),
                Span::styled("[Esc]", theme.key()),
                Span::raw(" Retour"),
            ]);
        }
    }

    Line::from(spans)
}

/// Ligne de saisie du filtre (mode recherche).
fn render_search_footer<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent());

    let input_line = Line::from(vec![
        Span::styled("Buscar criptomoneda: ", theme.accent()),
        Span::styled(app.search_buffer.clone(), theme.base()),
        Span::styled("█", theme.base().add_modifier(Modifier::SLOW_BLINK)),
    ]);

    let help_line = Line::from(vec![
        Span::styled("[Enter]", theme.key()),
        Span::raw(" Garder le filtre  "),
        Span::styled("[ESC]", theme.key()),
        Span::raw(" Annuler"),
    ]);

    let paragraph = Paragraph::new(vec![input_line, help_line])
        .block(block)
        .style(theme.base())
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
