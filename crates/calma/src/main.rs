mod cli;
mod logging;
mod session;
mod ui;

use std::time::{Duration, Instant};

use calma_background::{BackgroundState, Tint, Viewport, viewport_size};
use calma_config::Config;
use calma_core::Rgb;
use calma_page::{Exercise, Page, WelcomeState};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::cli::Cli;
use crate::session::{Session, Stage};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    if let Some(path) = logging::init(cli.log_file.as_deref())? {
        log::debug!("logging to {}", path.display());
    }
    let config = Config::load(cli.config.as_deref())?;
    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));

    let terminal = ratatui::init();
    let result = App::new(config, seed).run(terminal);
    ratatui::restore();
    result
}

/// What the screen is showing.
#[derive(Debug)]
enum View {
    /// Welcome screen, then the exercise menu.
    Menu,
    Exercise(Session),
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Page time origin.
    started: Instant,
    viewport: Viewport,
    background: BackgroundState,
    page: Page,
    /// Highlighted menu entry.
    selected: Exercise,
    view: View,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, seed: u64) -> Self {
        let viewport = Viewport::default();
        let bg = &config.background;
        let background =
            BackgroundState::new(&viewport, Tint::new(bg.r_mult, bg.g_mult, bg.b_mult), bg.speed);
        let page = Page::new(&config, seed);
        Self {
            running: false,
            config,
            started: Instant::now(),
            viewport,
            background,
            page,
            selected: Exercise::Anxiety,
            view: View::Menu,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.started = Instant::now();
        self.page.start(0);
        while self.running {
            let now = self.now_ms();
            self.update(now);
            terminal.draw(|frame| self.render(frame, now))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Milliseconds since the app started.
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.config.general.fps.max(1)))
    }

    /// Advance timers, animations and the running exercise.
    fn update(&mut self, now: u64) {
        self.page.tick(now);
        if let View::Exercise(session) = &mut self.view
            && !session.update(&self.config, now)
        {
            log::info!("{} exercise complete", session.exercise());
            self.view = View::Menu;
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame, now: u64) {
        let size = viewport_size(frame.area());
        if size != self.viewport.size() {
            self.viewport.resize(size);
        }

        let backdrop_color = match &self.view {
            View::Menu => self.config.background.color,
            View::Exercise(session) => session.visual(&self.config, now).color(),
        };
        self.background.paint(backdrop_color);
        self.decorate(now);
        self.background.render(frame);

        let [body, help] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let theme = &self.config.theme;

        match &self.view {
            View::Menu => {
                if self.page.welcome_state() != WelcomeState::Done {
                    let welcome = self
                        .page
                        .document()
                        .get_element_by_id(calma_page::WELCOME_SCREEN_ID)
                        .and_then(|id| self.page.document().element(id))
                        .map(|el| el.text().to_owned())
                        .unwrap_or_default();
                    let backdrop = self.backdrop_tone(backdrop_color);
                    let color = ui::fade(backdrop, theme.text, self.page.welcome_opacity(now));
                    ui::render_welcome(frame, body, &welcome, color);
                } else if self.page.main_visible() {
                    ui::render_menu(frame, body, &self.page, self.selected, &self.config);
                    ui::render_help(
                        frame,
                        help,
                        &[("↑↓", "choose"), ("enter", "begin"), ("q", "quit")],
                        theme.accent.into(),
                    );
                }
            }
            View::Exercise(session) => {
                let message = session.message(&self.config, now);
                ui::render_message(frame, body, message, theme.text.into());
                let keys: &[(&str, &str)] = match session.stage() {
                    Stage::Question => &[("y", "yes"), ("n", "once more"), ("esc", "menu")],
                    _ => &[("esc", "menu"), ("q", "quit")],
                };
                let accent = session.exercise().color(&self.config);
                ui::render_help(frame, help, keys, accent.into());
            }
        }
    }

    /// Draw particles or the exercise visual over the backdrop.
    fn decorate(&mut self, now: u64) {
        match &self.view {
            View::Menu => {
                let particles = self.page.particles();
                let color = self.config.particles.color;
                ui::draw_particles(&mut self.background.canvas_mut(), &particles, color, now);
            }
            View::Exercise(session) => {
                let visual = session.visual(&self.config, now);
                let style = match &visual {
                    session::Visual::Breathing { frame, max_scale } => {
                        match self.page.update_circle(frame.color, frame.scale, *max_scale) {
                            Ok(style) => Some(style),
                            Err(err) => {
                                log::warn!("cannot style breathing circle: {err}");
                                None
                            }
                        }
                    }
                    session::Visual::Waves { .. } => None,
                };
                ui::draw_visual(&mut self.background.canvas_mut(), &visual, style.as_ref());
            }
        }
    }

    /// The dim fill behind the orbs, used to fade text in from.
    fn backdrop_tone(&self, color: Rgb) -> Rgb {
        let bg = &self.config.background;
        color.tinted(bg.r_mult, bg.g_mult, bg.b_mult)
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls at the configured frame rate so animations keep moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => {
                    let size = viewport_size(Rect::new(0, 0, width, height));
                    self.viewport.resize(size);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let now = self.now_ms();
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C'))
            | (_, KeyCode::Char('q')) => self.quit(),
            _ => match &mut self.view {
                View::Menu => self.on_menu_key(key.code, now),
                View::Exercise(session) => match key.code {
                    KeyCode::Esc => self.view = View::Menu,
                    KeyCode::Char('y') => session.answer(true, now),
                    KeyCode::Char('n') => session.answer(false, now),
                    _ => {}
                },
            },
        }
    }

    fn on_menu_key(&mut self, code: KeyCode, now: u64) {
        if !self.page.main_visible() {
            if code == KeyCode::Esc {
                self.quit();
            }
            return;
        }
        let index = Exercise::ALL
            .iter()
            .position(|e| *e == self.selected)
            .unwrap_or(0);
        match code {
            KeyCode::Esc => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => self.select(index.saturating_sub(1), now),
            KeyCode::Down | KeyCode::Char('j') => self.select(index + 1, now),
            KeyCode::Char(c @ '1'..='3') => self.select(c as usize - '1' as usize, now),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.view = View::Exercise(Session::new(self.selected, now));
            }
            _ => {}
        }
    }

    /// Highlight an exercise and scroll its section into view.
    fn select(&mut self, index: usize, now: u64) {
        let Some(exercise) = Exercise::ALL.get(index).copied() else {
            return;
        };
        self.selected = exercise;
        let outcome = self.page.go_to(exercise, now);
        if outcome.scrolled_to.is_none() {
            log::debug!("no section to scroll to for {exercise}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
