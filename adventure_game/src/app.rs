//! Application state
//!
//! `App` owns the terminal and is the engine's controller: whenever the engine
//! needs a decision it redraws and blocks on the keyboard until Enter.

use crate::input::{self, Input, HELP};
use crate::presentation;
use crate::ui;
use adventure_core::prelude::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::{error, info};

/// Everything the UI shows besides the game state itself
#[derive(Debug, Default)]
pub struct View {
    pub log: Vec<String>,
    /// Lines scrolled up from the bottom of the log
    pub scroll: usize,
    pub input: String,
    pub prompt: String,
    /// Player whose command is being asked for
    pub active: Option<ActorId>,
}

impl View {
    pub fn push(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        self.scroll = 0;
    }
}

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: View,
}

impl App {
    /// Take over the terminal
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(App {
            terminal,
            view: View::default(),
        })
    }

    /// Give the terminal back
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    /// Show a closing message, wait for a key and restore the terminal
    pub fn finish(&mut self, state: &GameState, message: &str) -> io::Result<()> {
        self.view.push(message);
        self.view.prompt = "Press any key to exit".to_string();
        self.view.active = None;
        self.terminal.draw(|f| ui::draw(f, state, &self.view))?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
        self.restore()
    }

    fn redraw(&mut self, state: &GameState) {
        if let Err(err) = self.terminal.draw(|f| ui::draw(f, state, &self.view)) {
            error!(error = %err, "failed to draw");
        }
    }

    fn quit(&mut self) -> ! {
        info!("player quit");
        if let Err(err) = self.restore() {
            error!(error = %err, "failed to restore terminal");
        }
        std::process::exit(0)
    }

    /// Block until the player submits a line
    fn read_line(&mut self, state: &GameState) -> String {
        loop {
            self.redraw(state);
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(err) => {
                    error!(error = %err, "failed to read terminal input");
                    self.quit();
                }
            };

            match (key.code, key.modifiers) {
                (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.quit(),
                (KeyCode::Enter, _) => {
                    let line = std::mem::take(&mut self.view.input);
                    if !line.trim().is_empty() {
                        self.view.push(format!("> {}", line.trim()));
                        return line;
                    }
                }
                (KeyCode::Backspace, _) => {
                    self.view.input.pop();
                }
                (KeyCode::PageUp, _) => {
                    self.view.scroll = (self.view.scroll + 5).min(self.view.log.len());
                }
                (KeyCode::PageDown, _) => {
                    self.view.scroll = self.view.scroll.saturating_sub(5);
                }
                (KeyCode::Char(c), _) => self.view.input.push(c),
                _ => {}
            }
        }
    }
}

impl Controller for App {
    fn next_command(&mut self, state: &GameState, actor: ActorId) -> Command {
        self.view.prompt = format!("{} >", state.name_of(actor));
        self.view.active = Some(actor);

        loop {
            let line = self.read_line(state);
            match input::parse_command(&line, state) {
                Ok(Input::Command(command)) => return command,
                Ok(Input::Help) => {
                    for help in HELP {
                        self.view.push(*help);
                    }
                }
                Err(err) => self.view.push(err.to_string()),
            }
        }
    }

    fn select_player(&mut self, state: &GameState) -> Result<ActorId, String> {
        self.view.prompt = "Who acts? >".to_string();
        self.view.active = None;

        loop {
            let line = self.read_line(state);
            let name = line.trim();
            if name.eq_ignore_ascii_case("help") {
                self.view.push("Type the name of a party member.");
                continue;
            }
            return state.find_actor(name).ok_or_else(|| name.to_string());
        }
    }

    fn on_events(&mut self, state: &GameState, events: &[GameEvent]) {
        for event in events {
            for line in presentation::describe(state, event) {
                self.view.push(line);
            }
        }
        self.redraw(state);
    }
}
