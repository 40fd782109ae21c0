// ============================================================================
// Structure : App
// ============================================================================
// État global de l'application TUI. Tous les écrans lisent depuis App,
// toutes les modifications passent par ses méthodes.
//
// Toutes les écritures vers le store persistant passent par le thread de la
// boucle d'événements (un seul écrivain par clé) ; le worker ne fait que
// des fetchs.
// ============================================================================

use rand::Rng;
use tracing::{info, warn};

use crate::models::{Coin, CoinListEngine, Quote, SortDirection};
use crate::store::{FavoritesStore, PersistentStore};
use crate::ui::theme::Theme;

/// Écrans de l'application. Un seul actif à la fois.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Liste des prix (filtre, tri, favoris, tirage aléatoire)
    Prices,

    /// Cryptos favorites persistées
    Favorites,

    /// Citation du jour, partageable
    Quote,

    /// Formulaire de connexion
    Login,
}

impl Screen {
    /// Écran suivant dans le cycle Tab.
    pub fn next(&self) -> Self {
        match self {
            Screen::Prices => Screen::Favorites,
            Screen::Favorites => Screen::Quote,
            Screen::Quote => Screen::Login,
            Screen::Login => Screen::Prices,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Prices => "Prix",
            Screen::Favorites => "Favoris",
            Screen::Quote => "Frase",
            Screen::Login => "Login",
        }
    }
}

/// Champ du formulaire de connexion ayant le focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// État principal de l'application.
pub struct App<S: PersistentStore> {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Moteur de liste : dataset complet + filtre + tri
    pub engine: CoinListEngine,

    /// Ensemble durable des favoris
    pub favorites: FavoritesStore<S>,

    /// Index sélectionné dans la liste visible des prix
    pub selected_price: usize,

    /// Index sélectionné dans la liste des favoris
    pub selected_favorite: usize,

    /// Mode recherche actif (saisie live du filtre sur l'écran Prix)
    pub searching: bool,

    /// Buffer de saisie du filtre
    pub search_buffer: String,

    /// Filtre à restaurer si la recherche est annulée
    search_restore: String,

    /// Citation courante (None tant que rien n'a été fetché)
    pub quote: Option<Quote>,

    /// Fetch de citation en cours
    pub quote_loading: bool,

    /// Dernière crypto tirée au hasard
    pub random_pick: Option<Coin>,

    /// Chargement du snapshot de marché en cours
    pub is_loading: bool,

    /// Message de statut affiché dans le footer (alerte one-shot)
    pub status: Option<String>,

    /// Première pression de 'q' reçue, en attente de confirmation
    pub confirm_quit: bool,

    /// Première pression de 'd' reçue sur l'écran Favoris
    pub confirm_remove: bool,

    /// Thème courant, passé explicitement à chaque fonction de rendu.
    /// Portée session : initialisé une fois, jamais persisté.
    pub theme: Theme,

    /// Saisie du nom d'utilisateur
    pub login_username: String,

    /// Saisie du mot de passe
    pub login_password: String,

    /// Champ du formulaire ayant le focus
    pub login_focus: LoginField,

    /// Utilisateur connecté (validation triviale, pas d'authentification réelle)
    pub logged_in: Option<String>,
}

impl<S: PersistentStore> App<S> {
    /// Crée l'état initial avec un ensemble de favoris déjà chargé.
    pub fn new(favorites: FavoritesStore<S>) -> Self {
        Self {
            running: true,
            current_screen: Screen::Prices,
            engine: CoinListEngine::new(),
            favorites,
            selected_price: 0,
            selected_favorite: 0,
            searching: false,
            search_buffer: String::new(),
            search_restore: String::new(),
            quote: None,
            quote_loading: false,
            random_pick: None,
            is_loading: false,
            status: None,
            confirm_quit: false,
            confirm_remove: false,
            theme: Theme::light(),
            login_username: String::new(),
            login_password: String::new(),
            login_focus: LoginField::Username,
            logged_in: None,
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Écrans
    // ========================================================================

    /// Bascule vers un écran.
    ///
    /// Activer l'écran Favoris recharge l'ensemble depuis le store : les deux
    /// écrans qui affichent les favoris restent cohérents.
    pub fn show_screen(&mut self, screen: Screen) {
        if screen == self.current_screen {
            return;
        }
        self.confirm_remove = false;
        if screen == Screen::Favorites {
            if let Err(e) = self.favorites.load() {
                warn!(error = %e, "Failed to reload favorites on screen activation");
                self.set_status("⚠ Impossible de relire les favoris");
            }
            self.clamp_favorite_selection();
        }
        info!(screen = ?screen, "Screen changed");
        self.current_screen = screen;
    }

    pub fn next_screen(&mut self) {
        self.show_screen(self.current_screen.next());
    }

    pub fn is_on(&self, screen: Screen) -> bool {
        self.current_screen == screen
    }

    // ========================================================================
    // Snapshot de marché
    // ========================================================================

    /// Remplace le dataset complet (retour du fetch de marché).
    ///
    /// Le moteur remet filtre et tri à zéro ; la sélection revient en tête.
    pub fn set_market_snapshot(&mut self, coins: Vec<Coin>) {
        self.engine.set_full_list(coins);
        self.selected_price = 0;
        self.random_pick = None;
    }

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        if let Some(message) = message {
            self.status = Some(message);
        }
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    // ========================================================================
    // Navigation dans les listes
    // ========================================================================

    /// Longueur de la liste de l'écran courant (0 pour les écrans sans liste).
    fn current_list_len(&self) -> usize {
        match self.current_screen {
            Screen::Prices => self.engine.visible().len(),
            Screen::Favorites => self.favorites.len(),
            _ => 0,
        }
    }

    pub fn navigate_up(&mut self) {
        match self.current_screen {
            Screen::Prices => self.selected_price = self.selected_price.saturating_sub(1),
            Screen::Favorites => {
                self.selected_favorite = self.selected_favorite.saturating_sub(1)
            }
            _ => {}
        }
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.current_list_len().saturating_sub(1);
        match self.current_screen {
            Screen::Prices => {
                self.selected_price = (self.selected_price + 1).min(max_index);
            }
            Screen::Favorites => {
                self.selected_favorite = (self.selected_favorite + 1).min(max_index);
            }
            _ => {}
        }
    }

    /// Crypto sélectionnée dans la liste visible des prix.
    pub fn selected_coin(&self) -> Option<&Coin> {
        self.engine.visible().get(self.selected_price)
    }

    /// Favori sélectionné.
    pub fn selected_favorite_coin(&self) -> Option<&Coin> {
        self.favorites.favorites().get(self.selected_favorite)
    }

    fn clamp_price_selection(&mut self) {
        let max_index = self.engine.visible().len().saturating_sub(1);
        self.selected_price = self.selected_price.min(max_index);
    }

    fn clamp_favorite_selection(&mut self) {
        let max_index = self.favorites.len().saturating_sub(1);
        self.selected_favorite = self.selected_favorite.min(max_index);
    }

    // ========================================================================
    // Recherche (filtre live)
    // ========================================================================

    /// Entre en mode recherche, buffer initialisé au filtre courant.
    pub fn start_search(&mut self) {
        self.searching = true;
        self.search_restore = self.engine.filter_text().to_string();
        self.search_buffer = self.engine.filter_text().to_string();
    }

    /// Annule la recherche et restaure le filtre précédent.
    pub fn cancel_search(&mut self) {
        self.searching = false;
        let restore = self.search_restore.clone();
        self.engine.set_filter(&restore);
        self.search_buffer.clear();
        self.clamp_price_selection();
    }

    /// Valide la recherche : le filtre courant reste appliqué.
    pub fn submit_search(&mut self) {
        self.searching = false;
        self.search_buffer.clear();
    }

    /// Ajoute un caractère au filtre et le réapplique immédiatement.
    pub fn search_append(&mut self, c: char) {
        self.search_buffer.push(c);
        let text = self.search_buffer.clone();
        self.engine.set_filter(&text);
        self.clamp_price_selection();
    }

    /// Retire le dernier caractère du filtre et le réapplique.
    pub fn search_backspace(&mut self) {
        self.search_buffer.pop();
        let text = self.search_buffer.clone();
        self.engine.set_filter(&text);
        self.clamp_price_selection();
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    // ========================================================================
    // Tri et tirage aléatoire
    // ========================================================================

    /// Bascule le tri par prix sur la liste visible.
    pub fn toggle_sort(&mut self) -> SortDirection {
        let (_, direction) = self.engine.toggle_sort();
        self.clamp_price_selection();
        info!(direction = ?direction, "Sort toggled");
        direction
    }

    /// Tire une crypto au hasard dans la liste visible et l'affiche en statut.
    pub fn pick_random(&mut self, rng: &mut impl Rng) {
        match self.engine.pick_random(rng) {
            Some(coin) => {
                info!(coin = %coin.id, "Random pick");
                let message = format!("🎲 {} ({})", coin.name, coin.display_price());
                self.random_pick = Some(coin.clone());
                self.set_status(message);
            }
            None => {
                self.random_pick = None;
                self.set_status("🎲 Liste vide, rien à tirer");
            }
        }
    }

    // ========================================================================
    // Favoris
    // ========================================================================

    /// Bascule la crypto sélectionnée dans les favoris.
    ///
    /// Un échec d'écriture du store n'est pas avalé : il est loggé et
    /// remonté en alerte de statut.
    pub fn toggle_selected_favorite(&mut self) {
        let Some(coin) = self.selected_coin().cloned() else {
            return;
        };
        match self.favorites.toggle(&coin) {
            Ok(set) => {
                let marked = set.iter().any(|c| c.id == coin.id);
                let star = if marked { "⭐" } else { "☆" };
                self.set_status(format!("{} {}", star, coin.name));
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist favorites");
                self.set_status("⚠ Impossible d'enregistrer les favoris");
            }
        }
        self.clamp_favorite_selection();
    }

    pub fn request_remove(&mut self) {
        self.confirm_remove = true;
    }

    pub fn cancel_remove(&mut self) {
        self.confirm_remove = false;
    }

    pub fn is_awaiting_remove_confirmation(&self) -> bool {
        self.confirm_remove
    }

    /// Retire le favori sélectionné (seconde pression de 'd').
    pub fn remove_selected_favorite(&mut self) {
        if let Some(coin) = self.selected_favorite_coin().cloned() {
            match self.favorites.remove(&coin.id) {
                Ok(_) => self.set_status(format!("❌ {} retiré des favoris", coin.name)),
                Err(e) => {
                    warn!(error = %e, "Failed to persist favorites");
                    self.set_status("⚠ Impossible d'enregistrer les favoris");
                }
            }
            self.clamp_favorite_selection();
        }
        self.confirm_remove = false;
    }

    // ========================================================================
    // Citation
    // ========================================================================

    pub fn set_quote(&mut self, quote: Quote) {
        self.quote = Some(quote);
        self.quote_loading = false;
    }

    // ========================================================================
    // Thème et statut
    // ========================================================================

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
        info!(dark = self.theme.dark, "Theme toggled");
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    // ========================================================================
    // Formulaire de connexion
    // ========================================================================

    pub fn login_switch_field(&mut self) {
        self.login_focus = match self.login_focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn login_append(&mut self, c: char) {
        match self.login_focus {
            LoginField::Username => self.login_username.push(c),
            LoginField::Password => self.login_password.push(c),
        }
    }

    pub fn login_backspace(&mut self) {
        match self.login_focus {
            LoginField::Username => self.login_username.pop(),
            LoginField::Password => self.login_password.pop(),
        };
    }

    /// Valide le formulaire : les deux champs doivent être non vides.
    pub fn submit_login(&mut self) {
        if self.login_username.trim().is_empty() || self.login_password.is_empty() {
            self.set_status("⚠ Usuario y contraseña son obligatorios");
            return;
        }
        let user = self.login_username.trim().to_string();
        info!(user = %user, "User logged in");
        self.set_status(format!("👋 Bienvenido, {}", user));
        self.logged_in = Some(user);
        self.login_password.clear();
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_app() -> App<MemoryStore> {
        let favorites = FavoritesStore::new(MemoryStore::new()).unwrap();
        let mut app = App::new(favorites);
        app.set_market_snapshot(vec![
            Coin::new("btc", "Bitcoin", 50000.0),
            Coin::new("eth", "Ethereum", 3000.0),
            Coin::new("doge", "Dogecoin", 0.08),
        ]);
        app
    }

    #[test]
    fn test_app_creation() {
        let favorites = FavoritesStore::new(MemoryStore::new()).unwrap();
        let app: App<MemoryStore> = App::new(favorites);
        assert!(app.is_running());
        assert_eq!(app.current_screen, Screen::Prices);
        assert!(app.engine.is_empty());
    }

    #[test]
    fn test_quit_two_step() {
        let mut app = test_app();
        assert!(!app.is_awaiting_quit_confirmation());

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_screen_cycle() {
        let mut app = test_app();
        assert!(app.is_on(Screen::Prices));

        app.next_screen();
        assert!(app.is_on(Screen::Favorites));
        app.next_screen();
        assert!(app.is_on(Screen::Quote));
        app.next_screen();
        assert!(app.is_on(Screen::Login));
        app.next_screen();
        assert!(app.is_on(Screen::Prices));
    }

    #[test]
    fn test_navigation_clamps_to_list() {
        let mut app = test_app();
        assert_eq!(app.selected_price, 0);

        app.navigate_up();
        assert_eq!(app.selected_price, 0);

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_price, 2);

        app.navigate_down();
        assert_eq!(app.selected_price, 2);
    }

    #[test]
    fn test_search_live_filter_and_cancel_restores() {
        let mut app = test_app();
        app.start_search();
        for c in "bit".chars() {
            app.search_append(c);
        }
        assert_eq!(app.engine.visible().len(), 1);
        assert_eq!(app.selected_coin().unwrap().id, "btc");

        app.cancel_search();
        assert!(!app.is_searching());
        assert_eq!(app.engine.visible().len(), 3);
    }

    #[test]
    fn test_search_submit_keeps_filter() {
        let mut app = test_app();
        app.start_search();
        for c in "eth".chars() {
            app.search_append(c);
        }
        app.submit_search();
        assert_eq!(app.engine.filter_text(), "eth");
        assert_eq!(app.engine.visible().len(), 1);
    }

    #[test]
    fn test_search_clamps_selection() {
        let mut app = test_app();
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_price, 2);

        app.start_search();
        app.search_append('e');
        app.search_append('t');
        // La liste visible a rétréci : la sélection est ramenée dedans
        assert!(app.selected_price < app.engine.visible().len().max(1));
    }

    #[test]
    fn test_toggle_favorite_roundtrip() {
        let mut app = test_app();
        let btc = app.selected_coin().unwrap().clone();

        app.toggle_selected_favorite();
        assert!(app.favorites.is_favorite(&btc));

        app.toggle_selected_favorite();
        assert!(!app.favorites.is_favorite(&btc));
    }

    #[test]
    fn test_remove_favorite_two_step() {
        let mut app = test_app();
        app.toggle_selected_favorite(); // btc en favori
        app.show_screen(Screen::Favorites);

        app.request_remove();
        assert!(app.is_awaiting_remove_confirmation());

        app.remove_selected_favorite();
        assert!(!app.is_awaiting_remove_confirmation());
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_favorites_reload_on_screen_activation() {
        let mut app = test_app();
        app.toggle_selected_favorite();

        app.show_screen(Screen::Favorites);
        assert_eq!(app.favorites.len(), 1);
    }

    #[test]
    fn test_pick_random_sets_status() {
        let mut app = test_app();
        let mut rng = StdRng::seed_from_u64(3);

        app.pick_random(&mut rng);
        assert!(app.random_pick.is_some());
        assert!(app.status.as_deref().unwrap().starts_with("🎲"));
    }

    #[test]
    fn test_pick_random_on_empty_list() {
        let mut app = test_app();
        app.start_search();
        for c in "zzz".chars() {
            app.search_append(c);
        }
        let mut rng = StdRng::seed_from_u64(3);
        app.pick_random(&mut rng);
        assert!(app.random_pick.is_none());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut app = test_app();
        app.show_screen(Screen::Login);

        app.submit_login();
        assert!(app.logged_in.is_none());

        for c in "satoshi".chars() {
            app.login_append(c);
        }
        app.login_switch_field();
        for c in "hunter2".chars() {
            app.login_append(c);
        }
        app.submit_login();
        assert_eq!(app.logged_in.as_deref(), Some("satoshi"));
        // Le mot de passe n'est pas conservé après connexion
        assert!(app.login_password.is_empty());
    }

    #[test]
    fn test_snapshot_replacement_resets_selection() {
        let mut app = test_app();
        app.navigate_down();
        app.toggle_sort();

        app.set_market_snapshot(vec![Coin::new("sol", "Solana", 150.0)]);
        assert_eq!(app.selected_price, 0);
        assert_eq!(app.engine.sort_direction(), None);
        assert_eq!(app.engine.visible().len(), 1);
    }
}
