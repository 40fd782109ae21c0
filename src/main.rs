// ============================================================================
// CoinDay : liste de prix crypto, favoris persistés, frase del día
// ============================================================================
// Programme TUI : event loop + worker thread pour les appels API.
// Le terminal est restauré même en cas d'erreur.
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use coinday::api::{coingecko, quotes};
use coinday::app::{App, Screen};
use coinday::models::{Coin, Quote};
use coinday::share::{BrowserShare, ShareTarget};
use coinday::store::{FavoritesStore, FileStore};
use coinday::ui::{events::EventHandler, render};

/// App concrète du binaire : favoris sur fichier.
type CoinDayApp = App<FileStore>;

// ============================================================================
// Commandes et résultats du worker thread
// ============================================================================
// L'event loop envoie des commandes au worker ; le worker exécute les
// fetchs async et renvoie les résultats via un second channel mpsc.
// ============================================================================

/// Commandes envoyées au worker thread.
#[derive(Debug, Clone)]
enum AppCommand {
    /// Re-fetch du snapshot de marché complet
    RefreshMarkets,

    /// Fetch d'une nouvelle citation
    FetchQuote,
}

/// Résultats renvoyés par le worker thread.
#[derive(Debug)]
enum AppResult {
    /// Snapshot de marché chargé
    MarketsLoaded(Vec<Coin>),

    /// Échec du fetch de marché
    MarketsError(String),

    /// Citation chargée (la citation de repli en cas d'échec du fetch)
    QuoteLoaded(Quote),
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
//
// Emplacement : <data_dir>/coinday/logs/coinday.log
// Niveau : RUST_LOG (défaut : coinday=debug,info)
// ============================================================================

fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("coinday")
        .join("logs");

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "coinday.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinday=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    // Logging d'abord : si l'init échoue, on continue sans
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    println!("CoinDay starting up");
    info!("CoinDay starting up");

    // Fetch initial du snapshot de marché (bloquant, avant le TUI)
    println!("📊 Cargando criptos...\n");
    let runtime = tokio::runtime::Runtime::new()?;
    let initial_markets = match runtime.block_on(coingecko::fetch_markets()) {
        Ok(coins) => {
            info!(coins = coins.len(), "Initial market snapshot loaded");
            println!("✅ {} criptos cargadas\n", coins.len());
            Some(coins)
        }
        Err(e) => {
            // Dégradation : liste vide, l'utilisateur peut re-fetcher avec [u]
            error!(error = ?e, "Failed to load initial market snapshot");
            println!("⚠ Error al cargar los datos: {}\n", e);
            None
        }
    };

    // Favoris : chargés depuis le fichier avant le TUI
    let store = FileStore::open_default().context("Échec de l'ouverture du store de favoris")?;
    let favorites =
        FavoritesStore::new(store).context("Échec du chargement des favoris")?;
    info!(count = favorites.len(), "Favorites loaded");

    let mut app = App::new(favorites);
    match initial_markets {
        Some(coins) => {
            app.set_market_snapshot(coins);
            // Alerte de bienvenue, comme il se doit
            app.set_status("Revisa las criptos del día 🪙");
        }
        None => app.set_status("⚠ Sin conexión, lista vacía. [u] para reintentar"),
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // App partagée entre l'event loop et le worker
    let app = Arc::new(Mutex::new(app));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone());

    let events = EventHandler::new();
    let mut share = BrowserShare;

    info!("Starting event loop");
    let result = run(
        &mut terminal,
        app.clone(),
        &events,
        command_tx,
        result_rx,
        &mut share,
    );

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background worker thread
// ============================================================================
// Thread séparé avec son propre runtime tokio : les fetchs bloquent le
// worker, jamais l'UI.
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<CoinDayApp>>,
) {
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        loop {
            match command_rx.recv() {
                Ok(command) => {
                    info!(?command, "Worker received command");

                    match command {
                        AppCommand::RefreshMarkets => {
                            {
                                let mut app_lock = app.lock().unwrap();
                                app_lock.start_loading(Some(
                                    "📊 Actualizando precios...".to_string(),
                                ));
                            }

                            let result = runtime.block_on(coingecko::fetch_markets());

                            match result {
                                Ok(coins) => {
                                    info!(coins = coins.len(), "Market snapshot refreshed");
                                    let _ = result_tx.send(AppResult::MarketsLoaded(coins));
                                }
                                Err(e) => {
                                    error!(error = ?e, "Failed to refresh market snapshot");
                                    let _ =
                                        result_tx.send(AppResult::MarketsError(e.to_string()));
                                }
                            }

                            {
                                let mut app_lock = app.lock().unwrap();
                                app_lock.stop_loading();
                            }
                        }

                        AppCommand::FetchQuote => {
                            let result = runtime.block_on(quotes::fetch_quote());

                            // Pas de retry : en cas d'échec on substitue la
                            // citation de repli, l'écran montre toujours
                            // quelque chose
                            let quote = match result {
                                Ok(quote) => quote,
                                Err(e) => {
                                    warn!(error = ?e, "Quote fetch failed, using fallback");
                                    Quote::fallback()
                                }
                            };
                            let _ = result_tx.send(AppResult::QuoteLoaded(quote));
                        }
                    }
                }
                Err(_) => {
                    info!("Worker thread exiting (channel closed)");
                    break;
                }
            }
        }
    });
}

// ============================================================================
// Event loop principal
// ============================================================================
// À chaque itération : résultats du worker, rendu, entrées clavier.
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<CoinDayApp>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
    share: &mut dyn ShareTarget,
) -> Result<()> {
    loop {
        {
            let app_lock = app.lock().unwrap();
            if !app_lock.is_running() {
                break;
            }
        }

        // Résultats du worker (non bloquant)
        match result_rx.try_recv() {
            Ok(result) => {
                let mut app_lock = app.lock().unwrap();
                match result {
                    AppResult::MarketsLoaded(coins) => {
                        let count = coins.len();
                        app_lock.set_market_snapshot(coins);
                        app_lock.set_status(format!("✅ {} criptos actualizadas", count));
                    }
                    AppResult::MarketsError(message) => {
                        error!(error = %message, "Market refresh failed");
                        // Dégradation : liste vide plutôt qu'un crash
                        app_lock.set_market_snapshot(Vec::new());
                        app_lock.set_status("⚠ Error al cargar los datos");
                    }
                    AppResult::QuoteLoaded(quote) => {
                        app_lock.set_quote(quote);
                    }
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Worker thread disconnected!");
            }
        }

        // Rendu
        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = app_clone.lock().unwrap();
                render(frame, &*app_lock);
            })?;
        }

        // Entrées clavier
        if let Ok(event) = events.next() {
            let mut app_lock = app.lock().unwrap();
            handle_event(&mut app_lock, event, &command_tx, share);
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement clavier et met à jour l'état.
///
/// Ordre des gardes : saisie de recherche d'abord, puis formulaire de
/// connexion, puis raccourcis globaux, puis raccourcis par écran.
fn handle_event(
    app: &mut CoinDayApp,
    event: coinday::ui::events::Event,
    command_tx: &mpsc::Sender<AppCommand>,
    share: &mut dyn ShareTarget,
) {
    use coinday::ui::events::{
        get_char_from_event, is_backspace_event, is_down_event, is_enter_event, is_escape_event,
        is_favorite_event, is_new_quote_event, is_quit_event, is_random_event, is_refresh_event,
        is_remove_event, is_search_event, is_share_event, is_sort_event, is_tab_event,
        is_text_char_event, is_theme_event, is_up_event, screen_digit_from_event, Event,
    };

    match event {
        // ========================================
        // Mode recherche : capture toutes les touches
        // ========================================
        Event::Key(_) if app.is_searching() && is_escape_event(&event) => {
            debug!("Search cancelled");
            app.cancel_search();
        }
        Event::Key(_) if app.is_searching() && is_enter_event(&event) => {
            info!(filter = %app.engine.filter_text(), "Search submitted");
            app.submit_search();
        }
        Event::Key(_) if app.is_searching() && is_backspace_event(&event) => {
            app.search_backspace();
        }
        Event::Key(_) if app.is_searching() && is_text_char_event(&event) => {
            if let Some(c) = get_char_from_event(&event) {
                app.search_append(c);
            }
        }
        Event::Key(_) if app.is_searching() => {}

        // ========================================
        // Formulaire de connexion : capture la saisie
        // ========================================
        Event::Key(_) if app.is_on(Screen::Login) && is_escape_event(&event) => {
            app.show_screen(Screen::Prices);
        }
        Event::Key(_) if app.is_on(Screen::Login) && is_tab_event(&event) => {
            app.login_switch_field();
        }
        Event::Key(_) if app.is_on(Screen::Login) && is_enter_event(&event) => {
            app.submit_login();
        }
        Event::Key(_) if app.is_on(Screen::Login) && is_backspace_event(&event) => {
            app.login_backspace();
        }
        Event::Key(_) if app.is_on(Screen::Login) && is_text_char_event(&event) => {
            if let Some(c) = get_char_from_event(&event) {
                app.login_append(c);
            }
        }

        // ========================================
        // Raccourcis globaux
        // ========================================
        Event::Key(_) if is_quit_event(&event) => {
            // Quit en deux temps : la première pression demande confirmation
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }
        Event::Key(_) if is_tab_event(&event) => {
            app.cancel_quit();
            app.next_screen();
            maybe_fetch_quote(app, command_tx);
        }
        Event::Key(_) if screen_digit_from_event(&event).is_some() => {
            app.cancel_quit();
            let screen = match screen_digit_from_event(&event) {
                Some(1) => Screen::Prices,
                Some(2) => Screen::Favorites,
                Some(3) => Screen::Quote,
                _ => Screen::Login,
            };
            app.show_screen(screen);
            maybe_fetch_quote(app, command_tx);
        }
        Event::Key(_) if is_theme_event(&event) => {
            app.cancel_quit();
            app.toggle_theme();
        }

        // ========================================
        // Écran Prix
        // ========================================
        Event::Key(_) if is_up_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            app.navigate_down();
        }
        Event::Key(_) if is_search_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            debug!("Search mode entered");
            app.start_search();
        }
        Event::Key(_) if is_sort_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            let direction = app.toggle_sort();
            app.set_status(format!("Tri : {}", direction.label()));
        }
        Event::Key(_) if is_favorite_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            app.toggle_selected_favorite();
        }
        Event::Key(_) if is_random_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            app.pick_random(&mut rand::rng());
        }
        Event::Key(_) if is_refresh_event(&event) && app.is_on(Screen::Prices) => {
            app.cancel_quit();
            let _ = command_tx.send(AppCommand::RefreshMarkets);
        }

        // ========================================
        // Écran Favoris
        // ========================================
        Event::Key(_) if is_up_event(&event) && app.is_on(Screen::Favorites) => {
            app.cancel_quit();
            app.cancel_remove();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on(Screen::Favorites) => {
            app.cancel_quit();
            app.cancel_remove();
            app.navigate_down();
        }
        Event::Key(_) if is_remove_event(&event) && app.is_on(Screen::Favorites) => {
            // Suppression en deux temps
            if !app.favorites.is_empty() {
                if app.is_awaiting_remove_confirmation() {
                    info!("User confirmed favorite removal");
                    app.remove_selected_favorite();
                } else {
                    info!("User requested favorite removal (awaiting confirmation)");
                    app.request_remove();
                }
            }
        }

        // ========================================
        // Écran Frase
        // ========================================
        Event::Key(_) if is_new_quote_event(&event) && app.is_on(Screen::Quote) => {
            app.cancel_quit();
            if !app.quote_loading {
                app.quote_loading = true;
                let _ = command_tx.send(AppCommand::FetchQuote);
            }
        }
        Event::Key(_) if is_share_event(&event) && app.is_on(Screen::Quote) => {
            app.cancel_quit();
            if let Some(quote) = app.quote.clone() {
                match share.share(&quote.share_text()) {
                    Ok(()) => app.set_status("📤 Frase compartida"),
                    Err(e) => {
                        // Alerte one-shot, pas de retry
                        warn!(error = ?e, "Share failed");
                        app.set_status("⚠ No se pudo compartir la frase");
                    }
                }
            }
        }

        // Toute autre touche annule les confirmations en attente
        Event::Key(_) => {
            app.cancel_quit();
            app.cancel_remove();
        }

        Event::Tick => {}
    }
}

/// Déclenche le fetch de la citation à la première activation de l'écran.
fn maybe_fetch_quote(app: &mut CoinDayApp, command_tx: &mpsc::Sender<AppCommand>) {
    if app.is_on(Screen::Quote) && app.quote.is_none() && !app.quote_loading {
        app.quote_loading = true;
        let _ = command_tx.send(AppCommand::FetchQuote);
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// Raw mode + alternate screen. Toujours restaurer avant de quitter.
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
