//! Runtime: terminal lifecycle and the single event loop.
//!
//! The loop multiplexes three sources with `tokio::select!`:
//! - terminal input from crossterm's `EventStream`
//! - fetch completions sent back by tasks spawned in [`crate::cmd`]
//! - an animation ticker, fast only while a fetch is in flight
//!
//! Every source is turned into a [`Msg`] for [`App::update`]; the effects it
//! returns go to [`cmd::run_cmds`]. The frame is redrawn only after something
//! visible changed.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use jitpages_engine::{HttpJsonFetcher, JsonFetcher};
use jitpages_util::Settings;
use ratatui::{Terminal, layout::Rect, prelude::CrosstermBackend};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::app::{App, Effect, Msg};
use crate::cmd;
use crate::ui::main_component::MainView;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const FAST_TICK: Duration = Duration::from_millis(100);
const IDLE_TICK: Duration = Duration::from_secs(5);

/// Raw mode, alternate screen and mouse capture.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn cleanup_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Tui, app: &App, main_view: &MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn new_ticker(period: Duration) -> time::Interval {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Set up the terminal, run the loop until the user quits, and restore the
/// terminal even when the loop fails.
pub async fn run_app(settings: Settings) -> Result<()> {
    let fetcher: Arc<dyn JsonFetcher> = Arc::new(HttpJsonFetcher::new(&settings.http).context("build HTTP client")?);
    let app = App::from_settings(&settings);
    info!(pages = app.store.pages().len(), page_size = %app.page_size, "starting tui");

    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, app, fetcher).await;
    let cleanup = cleanup_terminal(&mut terminal);
    outcome.and(cleanup)
}

async fn event_loop(terminal: &mut Tui, mut app: App, fetcher: Arc<dyn JsonFetcher>) -> Result<()> {
    let main_view = MainView::default();
    let mut events = EventStream::new();
    let (msg_sender, mut msg_receiver) = mpsc::unbounded_channel::<Msg>();

    let mut current_interval = IDLE_TICK;
    let mut ticker = new_ticker(current_interval);

    render(terminal, &app, &main_view)?;

    while !app.should_quit {
        let target_interval = if app.store.is_fetching_page() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = new_ticker(current_interval);
        }

        let mut effects: Vec<Effect> = Vec::new();
        let needs_render = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if key.kind == KeyEventKind::Press
                        && key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    if let Some(msg) = main_view.handle_key_events(&app, key) {
                        effects = app.update(msg);
                    }
                    true
                }
                Some(Ok(Event::Mouse(mouse))) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    match main_view.handle_mouse_events(&app, mouse, area) {
                        Some(msg) => {
                            effects = app.update(msg);
                            true
                        }
                        None => false,
                    }
                }
                Some(Ok(Event::Resize(_, _))) => true,
                Some(Ok(_)) => false,
                Some(Err(error)) => {
                    warn!(%error, "failed to read terminal event");
                    false
                }
                None => break,
            },

            Some(msg) = msg_receiver.recv() => {
                effects = app.update(msg);
                true
            }

            _ = ticker.tick() => {
                let animating = app.store.is_fetching_page();
                effects = app.update(Msg::Tick);
                animating
            }

            _ = signal::ctrl_c() => break,
        };

        if !effects.is_empty() {
            cmd::run_cmds(cmd::from_effects(effects), &fetcher, &msg_sender);
        }
        if needs_render {
            render(terminal, &app, &main_view)?;
        }
    }

    info!("tui exiting");
    Ok(())
}
