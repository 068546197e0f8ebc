use crate::config::GameConfig;
use crate::geometry::Rect;
use rand::Rng;

/// An upper/lower obstacle pair scrolling left at the speed it was spawned with.
#[derive(Debug, Clone)]
pub struct Pipe {
    pub upper: Rect,
    pub lower: Rect,
    pub speed: f64,
    /// Set once the bird has cleared this pipe.
    pub passed: bool,
}

impl Pipe {
    /// Spawns at the right edge of the world with a random gap.
    pub fn new<R: Rng>(cfg: &GameConfig, speed: f64, rng: &mut R) -> Self {
        let gap_top = rng.gen_range(cfg.gap_top_min..=cfg.gap_top_max);
        Self::at(cfg, cfg.world_width, gap_top, speed)
    }

    /// `lower_top` is the y of the lower pipe's top edge; the opening sits above it.
    pub fn at(cfg: &GameConfig, x: f64, lower_top: f64, speed: f64) -> Self {
        let upper_bottom = lower_top - cfg.pipe_gap;
        Self {
            upper: Rect::new(x, upper_bottom - cfg.pipe_height, cfg.pipe_width, cfg.pipe_height),
            lower: Rect::new(x, lower_top, cfg.pipe_width, cfg.pipe_height),
            speed,
            passed: false,
        }
    }

    pub fn update(&mut self, dt: f64) {
        let dx = self.speed * dt;
        self.upper.x -= dx;
        self.lower.x -= dx;
    }

    pub fn right(&self) -> f64 {
        self.upper.right()
    }

    pub fn hits(&self, r: &Rect) -> bool {
        r.intersects(&self.upper) || r.intersects(&self.lower)
    }

    /// Vertical centre of the opening.
    pub fn gap_center(&self) -> f64 {
        (self.upper.bottom() + self.lower.top()) / 2.0
    }

    pub fn off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_spawns_at_right_edge() {
        let cfg = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pipe = Pipe::new(&cfg, 250.0, &mut rng);
        assert_eq!(pipe.upper.x, 600.0);
        assert_eq!(pipe.lower.x, 600.0);
        assert_eq!(pipe.upper.w, 78.0);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_gap_within_range() {
        let cfg = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let pipe = Pipe::new(&cfg, 250.0, &mut rng);
            assert!(pipe.lower.top() >= 250.0 && pipe.lower.top() <= 520.0);
            assert!((pipe.lower.top() - pipe.upper.bottom() - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_update_scrolls_both_rects() {
        let cfg = GameConfig::default();
        let mut pipe = Pipe::at(&cfg, 600.0, 400.0, 300.0);
        let (uy, ly) = (pipe.upper.y, pipe.lower.y);
        pipe.update(0.5);
        assert_eq!(pipe.upper.x, 450.0);
        assert_eq!(pipe.lower.x, 450.0);
        assert_eq!(pipe.upper.y, uy);
        assert_eq!(pipe.lower.y, ly);
    }

    #[test]
    fn test_geometry() {
        let cfg = GameConfig::default();
        let pipe = Pipe::at(&cfg, 100.0, 400.0, 250.0);
        assert_eq!(pipe.upper.bottom(), 200.0);
        assert_eq!(pipe.upper.top(), -280.0);
        assert_eq!(pipe.lower.bottom(), 880.0);
        assert_eq!(pipe.gap_center(), 300.0);
        assert_eq!(pipe.right(), 178.0);
    }

    #[test]
    fn test_hits() {
        let cfg = GameConfig::default();
        let pipe = Pipe::at(&cfg, 100.0, 400.0, 250.0);
        assert!(pipe.hits(&Rect::new(110.0, 410.0, 10.0, 10.0)));
        assert!(pipe.hits(&Rect::new(110.0, 150.0, 10.0, 10.0)));
        assert!(!pipe.hits(&Rect::new(110.0, 300.0, 10.0, 10.0)));
        assert!(!pipe.hits(&Rect::new(300.0, 410.0, 10.0, 10.0)));
    }

    #[test]
    fn test_off_screen() {
        let cfg = GameConfig::default();
        let mut pipe = Pipe::at(&cfg, 0.0, 400.0, 78.0);
        assert!(!pipe.off_screen());
        pipe.update(1.0);
        assert!(!pipe.off_screen());
        pipe.update(0.01);
        assert!(pipe.off_screen());
    }
}
