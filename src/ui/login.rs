// ============================================================================
// Écran Login
// ============================================================================
// Formulaire utilisateur/mot de passe. Validation triviale (champs non
// vides), pas de mécanisme d'authentification réel.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};
use crate::store::PersistentStore;
use crate::ui::theme::Theme;

/// Dessine la zone centrale de l'écran Login.
pub fn render_body<S: PersistentStore>(frame: &mut Frame, app: &App<S>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(" 🔐 Login ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    // État de connexion
    let header = match &app.logged_in {
        Some(user) => Line::from(Span::styled(
            format!("Conectado como {}", user),
            theme.accent(),
        )),
        None => Line::from(Span::styled("Inicia sesión", theme.dim())),
    };
    frame.render_widget(
        Paragraph::new(vec![header])
            .style(theme.base())
            .alignment(Alignment::Center),
        chunks[0],
    );

    render_field(
        frame,
        theme,
        chunks[1],
        "Usuario",
        &app.login_username,
        app.login_focus == LoginField::Username,
    );

    // Mot de passe masqué
    let masked = "●".repeat(app.login_password.chars().count());
    render_field(
        frame,
        theme,
        chunks[2],
        "Contraseña",
        &masked,
        app.login_focus == LoginField::Password,
    );
}

/// Dessine un champ du formulaire ; le champ focalisé porte un curseur et
/// une bordure accentuée.
fn render_field(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let border = if focused { theme.accent() } else { theme.border() };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", label));

    let mut spans = vec![Span::styled(value.to_string(), theme.base())];
    if focused {
        spans.push(Span::styled(
            "█",
            theme.base().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)])
        .block(block)
        .style(theme.base());

    frame.render_widget(paragraph, area);
}
