pub mod app;
mod event;
mod view;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::api::TodoApi;
use app::App;
use event::KeyAction;

/// Launch the interactive board against the given backend.
pub fn run(api: &dyn TodoApi) -> Result<()> {
    let mut app = App::new();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, api);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &dyn TodoApi,
) -> Result<()> {
    // Show the loading screen while the initial fetch is in flight.
    terminal.draw(|frame| view::render(frame, app))?;
    app.refresh(api);

    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| view::render(frame, app))?;

        // Short poll so message expiry fires without user input.
        if ct_event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = ct_event::read()? {
                if key.kind == KeyEventKind::Press {
                    match event::handle_key(app, key) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Submit => app.submit(api),
                        KeyAction::Toggle => app.toggle_selected(api),
                        KeyAction::ConfirmDelete => app.confirm_delete(api),
                        KeyAction::Refresh => app.refresh(api),
                        KeyAction::Continue => {}
                    }
                }
            }
        }
    }
}
