//! A continuously scrolling staff showcase for the terminal.
//!
//! Cards slide right-to-left without seams; hovering or pressing on the
//! track pauses them.  Run with a roster file to show your own team, or
//! without one to see the built-in demo roster.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    frame_runtime::TokioFrames,
    handler,
    roster_runtime::{self, RosterUpdate},
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::{roster::RosterSource, scheduler::RunState};
use crate::ui::{lane::MarqueeLane, layout::AppLayout, spinner::LoadingIndicator, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Auto-scrolling staff showcase")]
struct Cli {
    /// Roster TOML file (defaults to the built-in demo roster).
    roster: Option<PathBuf>,

    /// Lane speed in cells per second.
    #[arg(long)]
    speed: Option<f64>,

    /// Skeleton cards shown while loading.
    #[arg(long)]
    placeholders: Option<usize>,

    /// Milliseconds between animation frames.
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,

    /// Write the effective settings to the config file and exit.
    #[arg(long = "save-config")]
    save_config: bool,
}

impl Cli {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(count) = self.placeholders {
            config.placeholder_count = count;
        }
        if let Some(ms) = self.frame_ms {
            config.frame_interval_ms = ms;
        }
        config.clamped()
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    state.track_area = layout.track_area;

    let title = Line::from(vec![
        Span::styled("Staff", Theme::title_style()),
        Span::raw(format!("  ({})", state.source.label())),
    ]);
    frame.render_widget(Paragraph::new(title), layout.header_area);
    frame.render_widget(
        LoadingIndicator {
            visible: state.loading,
            reloading: !state.marquee.is_empty(),
            tick: state.tick,
        },
        layout.header_area,
    );

    let mut lane = MarqueeLane::new(state.marquee.items())
        .offset(state.marquee.offset())
        .photo_base(state.config.photo_base_url.as_deref());
    // A reload keeps the current cards moving.
    if state.loading && state.marquee.is_empty() {
        lane = lane.loading(state.config.placeholder_count, state.tick);
    }
    frame.render_stateful_widget(lane, layout.track_area, &mut state.lane_metrics);

    frame.render_widget(status_bar(state), layout.status_area);
}

fn status_bar(state: &AppState) -> Paragraph<'static> {
    let mut spans = Vec::new();
    if state.marquee.is_paused() {
        spans.push(Span::styled(" ⏸ paused ", Theme::paused_style()));
    } else if state.marquee.state() == RunState::Running {
        spans.push(Span::raw(" ▶ "));
    } else {
        spans.push(Span::raw(" ■ "));
    }
    let detail = match &state.status_message {
        Some(msg) => msg.clone(),
        None if state.marquee.is_empty() => "no staff".to_string(),
        None => format!(
            "{} cards · {:.0} cells/s · step {:.0}",
            state.marquee.len(),
            state.marquee.speed(),
            state.marquee.step()
        ),
    };
    spans.push(Span::raw(detail));
    spans.push(Span::raw("  |  space: pause  r: reload  q: quit"));
    Paragraph::new(Line::from(spans)).style(Theme::status_bar_style())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = cli.apply(AppConfig::load());

    if cli.save_config {
        config.save()?;
        println!("saved {config:?}");
        return Ok(());
    }

    let source = match &cli.roster {
        Some(path) => RosterSource::File(path.canonicalize()?),
        None => RosterSource::Demo,
    };

    // ── engine & channels ─────────────────────────────────────
    let (frames, mut frame_rx) = TokioFrames::new(Duration::from_millis(config.frame_interval_ms));
    let mut state = AppState::new(config, source, frames);
    let (roster_tx, mut roster_rx) = tokio::sync::mpsc::unbounded_channel::<RosterUpdate>();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        // ── probe geometry AFTER draw ────────────────────────────
        // The lane metrics now describe what is on screen, including
        // freshly arrived cards or the new terminal width.
        if state.marquee.needs_measure() {
            state.marquee.remeasure(&state.lane_metrics);
        }
        handler::recheck_hover(&mut state);

        roster_runtime::start_pending_load(&mut state, &roster_tx);

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => handler::handle_resize(&mut state),
                    AppEvent::FocusLost => handler::handle_focus_lost(&mut state),
                    AppEvent::Tick => state.on_tick(),
                }
            }

            Some(update) = roster_rx.recv() => {
                roster_runtime::apply_roster_update(&mut state, update);
            }

            Some(id) = frame_rx.recv() => {
                state.marquee.on_frame(id, Instant::now());
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.marquee.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    Ok(())
}
