//! Sound effects and music, synthesised once at start-up.

use fundsp::prelude::*;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Clone, Copy)]
enum Wave {
    Sine,
    Square,
    Saw,
}

fn oscillator(wave: Wave, pitch: &Shared) -> Box<dyn AudioUnit> {
    match wave {
        Wave::Sine => Box::new(var(pitch) >> sine::<f32>()),
        Wave::Square => Box::new(var(pitch) >> square()),
        Wave::Saw => Box::new(var(pitch) >> saw()),
    }
}

/// Renders `secs` of `wave` with time-varying pitch (Hz) and gain.
fn sweep(
    wave: Wave,
    secs: f64,
    freq: impl Fn(f64) -> f64,
    gain: impl Fn(f64) -> f64,
) -> Vec<f32> {
    let pitch = shared(freq(0.0) as f32);
    let mut unit = oscillator(wave, &pitch);
    let n = (secs * SAMPLE_RATE as f64) as usize;
    (0..n)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            pitch.set_value(freq(t) as f32);
            AudioUnit::get_mono(&mut *unit) as f32 * gain(t) as f32
        })
        .collect()
}

/// Plays `notes` back to back, each with a short attack and decay.
fn melody(wave: Wave, notes: &[(f64, f64)], level: f64) -> Vec<f32> {
    let mut out = Vec::new();
    for &(hz, secs) in notes {
        out.extend(sweep(
            wave,
            secs,
            |_| hz,
            |t| {
                let attack = (t / 0.01).min(1.0);
                let decay = lerp(1.0, 0.2, (t / secs).min(1.0));
                level * attack * decay
            },
        ));
    }
    out
}

/// Every sound the game plays, as mono sample buffers at [`SAMPLE_RATE`].
pub struct SoundBank {
    pub flap: Vec<f32>,
    pub score: Vec<f32>,
    pub game_over: Vec<f32>,
    pub winner: Vec<f32>,
    pub music: Vec<f32>,
}

impl SoundBank {
    pub fn synthesize() -> Self {
        Self {
            flap: flap(),
            score: score(),
            game_over: game_over(),
            winner: winner(),
            music: music(),
        }
    }
}

fn flap() -> Vec<f32> {
    sweep(
        Wave::Sine,
        0.09,
        |t| lerp(300.0, 750.0, (t / 0.09).min(1.0)),
        |t| lerp(0.25, 0.0, (t / 0.09).min(1.0)),
    )
}

fn score() -> Vec<f32> {
    melody(Wave::Square, &[(880.0, 0.07), (1320.0, 0.11)], 0.12)
}

fn game_over() -> Vec<f32> {
    // 400 Hz down to 80 Hz over 0.4s, fading out over 0.5s.
    sweep(
        Wave::Saw,
        0.5,
        |t| lerp(400.0, 80.0, (t / 0.4).min(1.0)),
        |t| lerp(0.15, 0.0, (t / 0.5).min(1.0)),
    )
}

fn winner() -> Vec<f32> {
    melody(
        Wave::Square,
        &[(523.25, 0.12), (659.25, 0.12), (783.99, 0.12), (1046.5, 0.4)],
        0.12,
    )
}

fn music() -> Vec<f32> {
    const BEAT: f64 = 0.2;
    let notes = [
        (392.0, BEAT),
        (523.25, BEAT),
        (659.25, BEAT),
        (523.25, BEAT),
        (587.33, BEAT),
        (493.88, BEAT),
        (392.0, BEAT * 2.0),
        (440.0, BEAT),
        (523.25, BEAT),
        (659.25, BEAT),
        (783.99, BEAT),
        (659.25, BEAT),
        (587.33, BEAT),
        (523.25, BEAT * 2.0),
    ];
    melody(Wave::Sine, &notes, 0.1)
}
