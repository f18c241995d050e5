//! Literacy Quest: An Island Reading Adventure
//!
//! Offline literacy mini-games for early readers, with durable progress
//! and a password-gated teacher dashboard.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use literacy_quest::data::GameConfig;
use literacy_quest::game::Controller;
use literacy_quest::store::{FileStore, MemoryStore, ProgressStore};
use literacy_quest::tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn setup_logging() -> literacy_quest::Result<()> {
    // The TUI owns stdout, so logs go to a file only.
    let file_appender = tracing_appender::rolling::never(".", "literacy-quest.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Leak the guard to keep the file writer alive
    std::mem::forget(guard);
    Ok(())
}

fn open_store(config: &GameConfig) -> Box<dyn ProgressStore> {
    match FileStore::open(Path::new(&config.progress_path)) {
        Ok(store) => Box::new(store),
        Err(e) => {
            // The session runs unsaved rather than not at all.
            tracing::warn!(error = %e, "progress file unavailable, playing without saving");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> literacy_quest::Result<()> {
    setup_logging()?;

    let config_path =
        std::env::var("LITERACY_QUEST_CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config = GameConfig::load(Path::new(&config_path))?;
    tracing::info!(version = literacy_quest::VERSION, config = %config_path, "starting");

    let kiosk = config.kiosk_mode;
    let store = open_store(&config);
    let controller = Controller::new(config, store);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);

    // Main loop
    let mut last_tick = Instant::now();
    while app.running {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if !app.handle_input()? {
            break;
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;
    }

    app.controller.end_session();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !kiosk {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║  Thanks for playing Literacy Quest!                    ║");
        println!("║                                                        ║");
        println!("║  Keep reading, explorer.                               ║");
        println!("╚════════════════════════════════════════════════════════╝\n");
    }

    Ok(())
}
