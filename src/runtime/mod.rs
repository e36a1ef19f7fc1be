use std::env;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::AudioPlayer;
use crate::playback::PlaybackCoordinator;
use crate::playlist::{PlaylistState, PlaylistStore};
use crate::ui::ViewState;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_warning) = settings::load_settings();
    logging::init(&settings);
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }
    let store = PlaylistStore::new(settings.playlist.path.clone());
    let playlist = PlaylistState::load(store);
    info!(
        store = %playlist.store().path().display(),
        tracks = playlist.len(),
        "starting lyricbox"
    );

    let (audio_player, events) = AudioPlayer::spawn()?;
    let view = ViewState::new(&settings);
    let mut coordinator = PlaybackCoordinator::new(playlist, audio_player, view, &settings);
    coordinator.start();

    // Command-line paths go through the same filter as dropped files.
    let added = coordinator.add_paths(env::args().skip(1));
    if added > 0 {
        info!(added, "added tracks from the command line");
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut coordinator, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(state = ?coordinator.state(), "shutting down");
    run_result
}
