//! Tunables and on-disk locations.
//!
//! Every gameplay constant lives in [`GameConfig`] so tests can build a game
//! with the exact numbers the real binary uses. Sprite sizes are the classic
//! artwork dimensions multiplied by [`SCALE_FACTOR`].

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Uniform scale applied to the classic sprite artwork.
pub const SCALE_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    // World
    pub world_width: f64,
    pub world_height: f64,
    /// Bird bottom strictly below this line is a crash.
    pub ground_y: f64,
    pub ground_width: f64,
    pub ground_height: f64,

    // Bird
    pub bird_width: f64,
    pub bird_height: f64,
    pub bird_start: (f64, f64),
    /// Downward acceleration, units/s².
    pub gravity: f64,
    /// Velocity set by a flap, units/s (negative = up).
    pub flap_velocity: f64,

    // Pipes
    pub pipe_width: f64,
    pub pipe_height: f64,
    /// Vertical opening between the upper and lower pipe.
    pub pipe_gap: f64,
    /// Range for the lower pipe's top edge.
    pub gap_top_min: f64,
    pub gap_top_max: f64,
    /// A pipe spawns once the frame counter exceeds this.
    pub spawn_interval_frames: u32,

    // Speed ramp
    pub base_speed: f64,
    pub speed_per_point: f64,
    pub max_speed: f64,

    pub win_score: u32,

    // Loop pacing
    pub frame_rate: u32,
    pub max_frame_dt: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 600.0,
            world_height: 768.0,
            ground_y: 568.0,
            ground_width: 336.0 * SCALE_FACTOR,
            ground_height: 112.0 * SCALE_FACTOR,

            bird_width: 34.0 * SCALE_FACTOR,
            bird_height: 24.0 * SCALE_FACTOR,
            bird_start: (150.0, 350.0),
            gravity: 600.0,
            flap_velocity: -250.0,

            pipe_width: 52.0 * SCALE_FACTOR,
            pipe_height: 320.0 * SCALE_FACTOR,
            pipe_gap: 200.0,
            gap_top_min: 250.0,
            gap_top_max: 520.0,
            spawn_interval_frames: 70,

            base_speed: 250.0,
            speed_per_point: 4.0,
            max_speed: 550.0,

            win_score: 100,

            frame_rate: 60,
            max_frame_dt: 0.1,
        }
    }
}

impl GameConfig {
    /// Scroll speed for a given score: linear ramp, clamped.
    pub fn speed_for(&self, score: u32) -> f64 {
        (self.base_speed + score as f64 * self.speed_per_point).min(self.max_speed)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }
}

/// Files the game reads and writes, resolved once at start-up.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub high_score_file: PathBuf,
    pub log_file: PathBuf,
}

impl AppPaths {
    /// Uses the platform data directory, creating it if needed.
    pub fn discover() -> io::Result<Self> {
        let dirs = ProjectDirs::from("", "", "flappy-arcade").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;
        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            high_score_file: data_dir.join("highscore.txt"),
            log_file: data_dir.join("flappy-arcade.log"),
        })
    }
}
