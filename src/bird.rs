use crate::config::GameConfig;
use crate::geometry::Rect;

/// Physics updates between wing frames.
const WING_PERIOD: u32 = 5;

#[derive(Debug, Clone)]
pub struct Bird {
    pub rect: Rect,
    /// Vertical velocity in units/s (positive = downward).
    pub velocity: f64,
    /// Physics only runs while active.
    pub active: bool,
    gravity: f64,
    flap_velocity: f64,
    start: (f64, f64),
    anim_tick: u32,
}

impl Bird {
    pub fn new(cfg: &GameConfig) -> Self {
        let (cx, cy) = cfg.bird_start;
        Self {
            rect: Rect::from_center(cx, cy, cfg.bird_width, cfg.bird_height),
            velocity: 0.0,
            active: false,
            gravity: cfg.gravity,
            flap_velocity: cfg.flap_velocity,
            start: cfg.bird_start,
            anim_tick: 0,
        }
    }

    /// Back to the start position, at rest, physics on.
    pub fn reset(&mut self) {
        self.rect.set_center(self.start.0, self.start.1);
        self.velocity = 0.0;
        self.active = true;
        self.anim_tick = 0;
    }

    /// Overrides the velocity with the flap impulse. Returns false when frozen.
    pub fn flap(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.velocity = self.flap_velocity;
        true
    }

    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.anim_tick = self.anim_tick.wrapping_add(1);
        self.velocity += self.gravity * dt;
        self.rect.y += self.velocity * dt;

        // Ceiling
        if self.rect.y < 0.0 {
            self.rect.y = 0.0;
            self.velocity = self.velocity.max(0.0);
        }
    }

    /// Which of the two wing sprites to draw.
    pub fn wing_up(&self) -> bool {
        (self.anim_tick / WING_PERIOD) % 2 == 0
    }
}
