use crate::synth::{SAMPLE_RATE, SoundBank};
use rodio::buffer::SamplesBuffer;
use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{info, warn};

const MUSIC_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    Flap,
    Score,
    GameOver,
    Winner,
}

struct Output {
    stream: OutputStream,
    bank: SoundBank,
    music: Option<Sink>,
}

impl Output {
    fn mixer(&self) -> &Mixer {
        self.stream.mixer()
    }
}

/// Audio context. Without an output device every call is a no-op.
pub struct Audio {
    output: Option<Output>,
}

impl Audio {
    /// Opens the default output device, falling back to silence.
    pub fn open() -> Self {
        match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                stream.log_on_drop(false);
                info!("audio output opened");
                Self {
                    output: Some(Output {
                        stream,
                        bank: SoundBank::synthesize(),
                        music: None,
                    }),
                }
            }
            Err(e) => {
                warn!(error = %e, "no audio output, running silent");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self { output: None }
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none()
    }

    /// Fire and forget.
    pub fn play(&self, sfx: Sfx) {
        let Some(out) = &self.output else {
            return;
        };
        let samples = match sfx {
            Sfx::Flap => &out.bank.flap,
            Sfx::Score => &out.bank.score,
            Sfx::GameOver => &out.bank.game_over,
            Sfx::Winner => &out.bank.winner,
        };
        let sink = Sink::connect_new(out.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
        sink.detach();
    }

    /// (Re)starts the looping track from the beginning.
    pub fn start_music(&mut self) {
        let Some(out) = &mut self.output else {
            return;
        };
        let sink = Sink::connect_new(out.mixer());
        sink.set_volume(MUSIC_VOLUME);
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, out.bank.music.clone()).repeat_infinite());
        // Replacing the old sink drops it, which silences it.
        out.music = Some(sink);
    }

    pub fn stop_music(&mut self) {
        if let Some(out) = &mut self.output {
            out.music = None;
        }
    }

    #[cfg(test)]
    fn music_playing(&self) -> bool {
        self.output.as_ref().is_some_and(|o| o.music.is_some())
    }
}
