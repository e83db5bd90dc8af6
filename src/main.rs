// Entry point for the Minesweeper TUI application
// Initializes logging and configuration, builds the game session and launches the UI

use std::error::Error;
use std::fs::{self, File};
use std::sync::Arc;

use directories::ProjectDirs;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

// Module declarations
mod dm_board;   // Board model: mines, numbers, reveal, win
mod dm_color;   // Terminal-aware board palette
mod dm_config;  // User configuration and persistence
mod dm_control; // Click handling and session state machine
mod dm_error;   // Error types
mod dm_lang;    // Multi-language string resources
mod dm_ui;      // Terminal UI rendering and event handling

use dm_config::load_or_create_config;
use dm_control::Session;
use dm_lang::Lang;
use dm_ui::run as run_ui;

/// Send tracing output to a log file; the terminal belongs to the UI
/// Logging is skipped (with a note on stderr) if the file cannot be created
fn init_logging() {
    let dir = ProjectDirs::from("com", "domin", "domin")
        .map(|proj| proj.data_local_dir().to_path_buf())
        .or_else(|| std::env::current_dir().ok());
    let Some(dir) = dir else {
        eprintln!("Warning: no directory for the log file, logging disabled");
        return;
    };
    let path = dir.join("domin.log");
    let file = fs::create_dir_all(&dir).and_then(|_| File::create(&path));
    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => eprintln!("Warning: cannot create log file {}: {e}", path.display()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    // Load or create user configuration (board size, mines, preferences)
    let cfg = load_or_create_config();

    // Initialize language resources based on saved or system language
    let lang = Lang::new(&cfg.language);

    // A fixed seed makes every board of the run reproducible
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(cfg.size, cfg.mines, rng);
    info!(size = cfg.size, mines = cfg.mines, seeded = cfg.seed.is_some(), lang = %lang.current_lang, "starting");

    // Launch the main UI loop
    run_ui(&mut session, &cfg, &lang)?;
    Ok(())
}
