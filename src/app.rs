// The central application controller and event loop.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

pub mod config;
pub mod i18n;
pub mod model;
pub mod process;
pub mod service;
pub mod toggle;
pub mod ui;

use config::{Config, Manifest};
use i18n::Translations;
use model::PairStatus;

pub struct App {
    config: Config,
    manifest: Manifest,
    i18n: Translations,
    status: PairStatus,
    busy: Arc<AtomicBool>,
    events_tx: Sender<PairStatus>,
    events_rx: Receiver<PairStatus>,
    show_description: bool,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let dir = config::exe_dir();
        let config = Config::load(&dir);
        let manifest = Manifest::load(&dir);
        let i18n = Translations::load(&dir);
        let (events_tx, events_rx) = mpsc::channel();

        Self {
            config,
            manifest,
            i18n,
            status: PairStatus::default(),
            busy: Arc::new(AtomicBool::new(false)),
            events_tx,
            events_rx,
            show_description: false,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // Initial probe before the first frame.
        self.refresh_status();

        let tick_rate = Duration::from_millis(self.config.poll_interval_ms);
        let mut last_tick = Instant::now();

        loop {
            // Worker results arrive over the channel; drain before drawing.
            while let Ok(status) = self.events_rx.try_recv() {
                self.status = status;
            }

            let switching = self.busy.load(Ordering::SeqCst);
            terminal.draw(|f| {
                ui::render(
                    f,
                    self.status,
                    switching,
                    self.show_description,
                    &self.manifest,
                    &self.i18n,
                )
            })?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key.code);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.refresh_status();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        if self.show_description {
            if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('d')) {
                self.show_description = false;
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('d') => self.show_description = true,
            KeyCode::Char(' ') | KeyCode::Enter => self.on_toggle(),
            _ => {}
        }
    }

    fn on_toggle(&mut self) {
        // A request arriving while a toggle is in flight is dropped.
        let _ = toggle::spawn_toggle(
            self.config.clone(),
            Arc::clone(&self.busy),
            self.events_tx.clone(),
        );
    }

    fn refresh_status(&mut self) {
        self.status = toggle::probe(&self.config);
    }
}
