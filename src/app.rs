//! Terminal front end: owns every external resource and runs the frame loop.

use crate::audio::{Audio, Sfx};
use crate::config::{AppPaths, GameConfig};
use crate::game::{Game, GameEvent};
use crate::highscore::HighScoreStore;
use crate::input::Command;
use crate::render::PixelBuf;
use crate::scene;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event},
    execute, terminal,
};
use rand::rngs::ThreadRng;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Raw mode + alternate screen for as long as it lives.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::SetTitle("Flappy Bird"),
        )?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(&mut self.out, terminal::disable_raw_mode);
    }
}

/// Undoes [`TerminalGuard::enter`]. Raw mode is left even when the screen
/// commands fail to write.
fn restore<W: Write>(out: &mut W, disable_raw_mode: impl FnOnce() -> io::Result<()>) {
    if let Err(e) = execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    ) {
        warn!(error = %e, "failed to leave the alternate screen");
    }
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to disable raw mode");
    }
}

pub struct App {
    game: Game,
    audio: Audio,
    store: HighScoreStore,
    rng: ThreadRng,
}

impl App {
    pub fn new(cfg: GameConfig, paths: &AppPaths) -> Result<Self> {
        let store = HighScoreStore::new(&paths.high_score_file);
        let high_score = store
            .load_or_create()
            .with_context(|| format!("reading high score from {}", store.path().display()))?;
        info!(high_score, path = %store.path().display(), "high score loaded");

        let mut audio = Audio::open();
        if audio.is_silent() {
            info!("sound disabled for this session");
        }
        // Music starts with the process, before the first round.
        audio.start_music();

        Ok(Self {
            game: Game::new(cfg, high_score),
            audio,
            store,
            rng: rand::thread_rng(),
        })
    }

    /// Runs until the player quits. The terminal is restored on every exit path.
    pub fn run(mut self) -> Result<()> {
        let mut term = TerminalGuard::enter().context("setting up the terminal")?;
        let (cols, rows) = terminal::size().context("querying terminal size")?;
        let mut buf = PixelBuf::for_terminal(cols, rows);

        let frame_dur = self.game.cfg.frame_duration();
        let max_dt = self.game.cfg.max_frame_dt;
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last).as_secs_f64().min(max_dt);
            last = frame_start;

            // Input
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(key) => match Command::from_key(&key) {
                        Some(Command::Quit) => {
                            info!("quit");
                            self.audio.stop_music();
                            return Ok(());
                        }
                        Some(command) => self.handle(command),
                        None => {}
                    },
                    Event::Resize(c, r) => {
                        debug!(cols = c, rows = r, "terminal resized");
                        buf.resize(c as usize, r as usize * 2);
                    }
                    _ => {}
                }
            }

            // Update
            let events = self.game.step(dt, &mut self.rng);
            self.apply(&events)?;

            // Render
            scene::draw(&self.game, &mut buf);
            buf.render(&mut term.out)?;
            term.out.flush()?;

            // Frame pacing
            let elapsed = frame_start.elapsed();
            if elapsed < frame_dur {
                std::thread::sleep(frame_dur - elapsed);
            }
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Restart => {
                self.game.reset();
                self.audio.start_music();
            }
            Command::Flap => {
                if self.game.flap() {
                    self.audio.play(Sfx::Flap);
                }
            }
            Command::Quit => {}
        }
    }

    /// Turns game events into sound and persistence.
    fn apply(&mut self, events: &[GameEvent]) -> Result<()> {
        for event in events {
            match *event {
                GameEvent::Scored(_) => self.audio.play(Sfx::Score),
                GameEvent::Died => {
                    self.audio.stop_music();
                    self.audio.play(Sfx::GameOver);
                }
                GameEvent::Won => {
                    self.audio.stop_music();
                    self.audio.play(Sfx::Winner);
                }
                GameEvent::NewHighScore(score) => {
                    self.store.save(score).with_context(|| {
                        format!("writing high score to {}", self.store.path().display())
                    })?;
                    info!(score, "high score saved");
                }
            }
        }
        Ok(())
    }
}
