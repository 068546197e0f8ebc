//! Round rules: speed ramp, pipe spawning and recycling, scoring, collisions.
//!
//! The game core performs no I/O. [`Game::step`] reports what happened as
//! [`GameEvent`]s and the caller turns those into sound and persistence.

use crate::bird::Bird;
use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::pipe::Pipe;
use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Before the first round. Everything is frozen.
    NotStarted,
    Playing,
    /// Crashed. Frozen until reset.
    Dead,
    /// Reached the win score. Frozen until reset.
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The bird cleared a pipe; carries the new score.
    Scored(u32),
    Died,
    Won,
    /// The finished round beat the stored best.
    NewHighScore(u32),
}

#[derive(Debug, Clone)]
pub struct Game {
    pub cfg: GameConfig,
    pub bird: Bird,
    /// Oldest pipe at the front.
    pub pipes: VecDeque<Pipe>,
    pub score: u32,
    pub high_score: u32,
    pub speed: f64,
    /// Two ground segments laid edge to edge.
    pub ground: [Rect; 2],
    mode: Mode,
    spawn_counter: u32,
}

impl Game {
    pub fn new(cfg: GameConfig, high_score: u32) -> Self {
        let first = Rect::new(0.0, cfg.ground_y, cfg.ground_width, cfg.ground_height);
        let second = Rect::new(first.right(), cfg.ground_y, cfg.ground_width, cfg.ground_height);
        Self {
            bird: Bird::new(&cfg),
            pipes: VecDeque::new(),
            score: 0,
            high_score,
            speed: cfg.base_speed,
            ground: [first, second],
            mode: Mode::NotStarted,
            spawn_counter: cfg.spawn_interval_frames,
            cfg,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Playing
    }

    /// Starts a fresh round from any mode, including mid-play.
    pub fn reset(&mut self) {
        self.mode = Mode::Playing;
        self.score = 0;
        self.speed = self.cfg.base_speed;
        self.pipes.clear();
        self.bird.reset();
        info!(high_score = self.high_score, "round started");
    }

    /// Returns true when the impulse was applied.
    pub fn flap(&mut self) -> bool {
        self.is_playing() && self.bird.flap()
    }

    /// Advances the round by `dt` seconds, then resolves collisions.
    pub fn step<R: Rng>(&mut self, dt: f64, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_playing() {
            return events;
        }
        self.advance(dt, rng, &mut events);
        self.check_collision(&mut events);
        events
    }

    fn advance<R: Rng>(&mut self, dt: f64, rng: &mut R, events: &mut Vec<GameEvent>) {
        self.speed = self.cfg.speed_for(self.score);
        self.scroll_ground(dt);

        if self.spawn_counter > self.cfg.spawn_interval_frames {
            self.pipes.push_back(Pipe::new(&self.cfg, self.speed, rng));
            self.spawn_counter = 0;
        }
        self.spawn_counter += 1;

        let bird_left = self.bird.rect.left();
        for i in 0..self.pipes.len() {
            let pipe = &mut self.pipes[i];
            pipe.update(dt);
            if self.mode != Mode::Playing || pipe.passed || pipe.right() >= bird_left {
                continue;
            }
            pipe.passed = true;
            self.score += 1;
            events.push(GameEvent::Scored(self.score));
            if self.score >= self.cfg.win_score {
                self.win(events);
            }
        }

        if self.pipes.front().is_some_and(Pipe::off_screen) {
            self.pipes.pop_front();
        }

        self.bird.update(dt);
    }

    fn scroll_ground(&mut self, dt: f64) {
        let dx = self.speed * dt;
        for seg in &mut self.ground {
            seg.x -= dx;
        }
        if self.ground[0].right() < 0.0 {
            self.ground[0].x = self.ground[1].right();
        }
        if self.ground[1].right() < 0.0 {
            self.ground[1].x = self.ground[0].right();
        }
    }

    fn check_collision(&mut self, events: &mut Vec<GameEvent>) {
        if !self.is_playing() {
            return;
        }
        let bird = self.bird.rect;
        if bird.bottom() > self.cfg.ground_y || self.pipes.iter().any(|p| p.hits(&bird)) {
            self.game_over(events);
        }
    }

    fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        info!(score = self.score, "bird crashed");
        self.mode = Mode::Dead;
        self.bird.active = false;
        events.push(GameEvent::Died);
        self.record_high_score(events);
    }

    fn win(&mut self, events: &mut Vec<GameEvent>) {
        info!(score = self.score, "round won");
        self.mode = Mode::Won;
        self.bird.active = false;
        events.push(GameEvent::Won);
        self.record_high_score(events);
    }

    fn record_high_score(&mut self, events: &mut Vec<GameEvent>) {
        if self.score > self.high_score {
            debug!(old = self.high_score, new = self.score, "new high score");
            self.high_score = self.score;
            events.push(GameEvent::NewHighScore(self.score));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f64 = 1.0 / 60.0;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1234)
    }

    fn playing() -> Game {
        let mut game = Game::new(GameConfig::default(), 0);
        game.reset();
        game
    }

    /// A pipe whose opening is centred on the bird, `x` units right of it.
    fn safe_pipe(game: &Game, x: f64) -> Pipe {
        let (_, cy) = game.bird.rect.center();
        Pipe::at(&game.cfg, x, cy + game.cfg.pipe_gap / 2.0, game.speed)
    }

    #[test]
    fn test_new_game_is_frozen() {
        let mut game = Game::new(GameConfig::default(), 9);
        let mut rng = rng();
        assert_eq!(game.mode(), Mode::NotStarted);
        assert_eq!(game.high_score, 9);
        let bird = game.bird.rect;
        for _ in 0..200 {
            assert!(game.step(DT, &mut rng).is_empty());
        }
        assert!(game.pipes.is_empty());
        assert_eq!(game.bird.rect, bird);
        assert_eq!(game.ground[0].x, 0.0);
    }

    #[test]
    fn test_flap_only_while_playing() {
        let mut game = Game::new(GameConfig::default(), 0);
        assert!(!game.flap());
        game.reset();
        assert!(game.flap());
        assert_eq!(game.bird.velocity, game.cfg.flap_velocity);
    }

    #[test]
    fn test_first_pipe_on_second_frame() {
        let mut game = playing();
        let mut rng = rng();
        game.step(DT, &mut rng);
        assert!(game.pipes.is_empty());
        game.step(DT, &mut rng);
        assert_eq!(game.pipes.len(), 1);
    }

    #[test]
    fn test_spawn_cadence_in_frames() {
        let mut game = playing();
        let mut rng = rng();
        let mut spawn_frames = Vec::new();
        for frame in 1..=150u32 {
            // Park the bird mid-air and move every pipe out of its way.
            game.bird.rect.set_center(150.0, 100.0);
            game.bird.velocity = 0.0;
            for p in game.pipes.iter_mut() {
                p.upper.y = -10_000.0;
                p.lower.y = 10_000.0;
            }
            game.step(DT, &mut rng);
            let spawn_x = game.cfg.world_width - game.speed * DT;
            if game.pipes.back().is_some_and(|p| p.upper.x >= spawn_x - 1e-9) {
                spawn_frames.push(frame);
            }
        }
        assert_eq!(spawn_frames, vec![2, 73, 144]);
    }

    #[test]
    fn test_pipe_passed_scores_once() {
        let mut game = playing();
        let mut rng = rng();
        let bird_left = game.bird.rect.left();
        let pipe = safe_pipe(&game, bird_left - game.cfg.pipe_width + 2.0);
        game.pipes.push_back(pipe);

        let mut scored = 0;
        for _ in 0..20 {
            game.bird.rect.set_center(150.0, game.pipes[0].gap_center());
            game.bird.velocity = 0.0;
            for e in game.step(DT, &mut rng) {
                if let GameEvent::Scored(_) = e {
                    scored += 1;
                }
            }
        }
        assert_eq!(scored, 1);
        assert_eq!(game.score, 1);
        assert!(game.pipes[0].passed);
    }

    #[test]
    fn test_speed_follows_score() {
        let mut game = playing();
        let mut rng = rng();
        game.score = 50;
        game.bird.rect.set_center(150.0, 100.0);
        game.step(DT, &mut rng);
        assert_eq!(game.speed, 450.0);
    }

    #[test]
    fn test_win_on_hundredth_pipe() {
        let mut game = Game::new(GameConfig::default(), 40);
        game.reset();
        let mut rng = rng();
        game.score = 99;
        let bird_left = game.bird.rect.left();
        let pipe = safe_pipe(&game, bird_left - game.cfg.pipe_width + 1.0);
        game.pipes.push_back(pipe);

        let events = game.step(DT, &mut rng);
        assert_eq!(
            events,
            vec![GameEvent::Scored(100), GameEvent::Won, GameEvent::NewHighScore(100)]
        );
        assert_eq!(game.mode(), Mode::Won);
        assert!(!game.bird.active);
        assert_eq!(game.high_score, 100);

        // Frozen afterwards.
        let bird = game.bird.rect;
        assert!(game.step(DT, &mut rng).is_empty());
        assert_eq!(game.bird.rect, bird);
    }

    #[test]
    fn test_win_stops_scoring_in_same_pass() {
        let mut game = playing();
        let mut rng = rng();
        game.score = 99;
        let bird_left = game.bird.rect.left();
        for offset in [1.0, 2.0] {
            let pipe = safe_pipe(&game, bird_left - game.cfg.pipe_width + offset);
            game.pipes.push_back(pipe);
        }
        game.step(DT, &mut rng);
        assert_eq!(game.score, 100);
        assert!(game.pipes[0].passed);
        assert!(!game.pipes[1].passed);
    }

    #[test]
    fn test_ground_crash() {
        let mut game = Game::new(GameConfig::default(), 3);
        game.reset();
        let mut rng = rng();
        game.bird.rect.y = game.cfg.ground_y - game.bird.rect.h + 0.5;
        let events = game.step(DT, &mut rng);
        assert_eq!(events, vec![GameEvent::Died]);
        assert_eq!(game.mode(), Mode::Dead);
        assert_eq!(game.high_score, 3);
    }

    #[test]
    fn test_ground_line_is_strict() {
        let cfg = GameConfig {
            gravity: 0.0,
            ..GameConfig::default()
        };
        let mut game = Game::new(cfg, 0);
        game.reset();
        let mut rng = rng();
        game.bird.rect.y = game.cfg.ground_y - game.bird.rect.h;
        game.step(DT, &mut rng);
        assert_eq!(game.mode(), Mode::Playing);
    }

    #[test]
    fn test_pipe_crash() {
        let mut game = playing();
        let mut rng = rng();
        let mut pipe = safe_pipe(&game, 140.0);
        pipe.lower.y = game.bird.rect.center().1;
        game.pipes.push_back(pipe);
        let events = game.step(DT, &mut rng);
        assert_eq!(events, vec![GameEvent::Died]);
        assert_eq!(game.mode(), Mode::Dead);
        assert!(!game.bird.active);
    }

    #[test]
    fn test_crash_reports_once() {
        let mut game = playing();
        let mut rng = rng();
        game.score = 5;
        game.bird.rect.y = 600.0;
        let events = game.step(DT, &mut rng);
        assert_eq!(events, vec![GameEvent::Died, GameEvent::NewHighScore(5)]);
        for _ in 0..10 {
            assert!(game.step(DT, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_only_front_pipe_recycled() {
        let mut game = playing();
        let mut rng = rng();
        game.bird.rect.set_center(150.0, 100.0);
        let mut gone = safe_pipe(&game, -200.0);
        gone.passed = true;
        let mut also_gone = gone.clone();
        also_gone.upper.x = -300.0;
        also_gone.lower.x = -300.0;
        game.pipes.push_back(gone);
        game.pipes.push_back(also_gone);
        game.step(DT, &mut rng);
        assert_eq!(game.pipes.len(), 1);
        game.step(DT, &mut rng);
        assert!(game.pipes.iter().all(|p| !p.off_screen()));
    }

    #[test]
    fn test_ground_wraps_seamlessly() {
        let mut game = playing();
        let mut rng = rng();
        let width = game.cfg.ground_width;
        for _ in 0..600 {
            game.bird.rect.set_center(150.0, 100.0);
            game.bird.velocity = 0.0;
            game.pipes.clear();
            game.step(DT, &mut rng);
            let [a, b] = game.ground;
            let gap = (a.x - b.x).abs();
            assert!((gap - width).abs() < 1e-6);
            assert!(a.right().min(b.right()) >= -game.speed * DT);
        }
    }

    #[test]
    fn test_reset_from_every_mode() {
        let mut rng = rng();
        let mut games = vec![Game::new(GameConfig::default(), 0)];

        let mut mid = playing();
        mid.score = 12;
        mid.bird.rect.set_center(150.0, 100.0);
        for _ in 0..5 {
            mid.step(DT, &mut rng);
        }
        games.push(mid);

        let mut dead = playing();
        dead.bird.rect.y = 700.0;
        dead.step(DT, &mut rng);
        assert_eq!(dead.mode(), Mode::Dead);
        games.push(dead);

        let mut won = playing();
        won.score = 99;
        let left = won.bird.rect.left();
        let pipe = safe_pipe(&won, left - won.cfg.pipe_width + 1.0);
        won.pipes.push_back(pipe);
        won.step(DT, &mut rng);
        assert_eq!(won.mode(), Mode::Won);
        games.push(won);

        for mut game in games {
            let counter = game.spawn_counter;
            game.reset();
            assert_eq!(game.spawn_counter, counter);
            assert_eq!(game.mode(), Mode::Playing);
            assert_eq!(game.score, 0);
            assert_eq!(game.speed, 250.0);
            assert!(game.pipes.is_empty());
            assert_eq!(game.bird.rect.center(), game.cfg.bird_start);
            assert_eq!(game.bird.velocity, 0.0);
            assert!(game.bird.active);
        }
    }

    #[test]
    fn test_spawn_counter_carries_over_reset() {
        let mut game = playing();
        let mut rng = rng();
        for _ in 0..40 {
            game.bird.rect.set_center(150.0, 100.0);
            game.bird.velocity = 0.0;
            game.pipes.clear();
            game.step(DT, &mut rng);
        }
        game.bird.rect.y = 700.0;
        game.step(DT, &mut rng);
        assert_eq!(game.mode(), Mode::Dead);
        assert_eq!(game.spawn_counter, 40);

        game.reset();
        let mut first_pipe = None;
        for frame in 1..=40u32 {
            game.bird.rect.set_center(150.0, 100.0);
            game.bird.velocity = 0.0;
            game.step(DT, &mut rng);
            if !game.pipes.is_empty() {
                first_pipe = Some(frame);
                break;
            }
        }
        // The counter climbs from 40 and spawns once it exceeds 70.
        assert_eq!(first_pipe, Some(32));
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut game = playing();
        let mut rng = rng();
        game.score = 8;
        game.bird.rect.y = 700.0;
        game.step(DT, &mut rng);
        game.reset();
        assert_eq!(game.high_score, 8);
    }
}
