use anyhow::Result;

use crate::audio::Audio;
use crate::geometry::Cell;
use crate::term::TermRenderer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Ding,
    Crash,
}

/// Where the game sends its pictures and sounds.
///
/// Drawing may fail and ends the game loop with an error. Sound never fails:
/// implementations swallow and log their own problems.
pub trait Sink {
    fn draw_frame(&mut self, segments: &[Cell], apple: Cell, score: usize) -> Result<()>;
    fn show_game_over(&mut self, score: usize) -> Result<()>;
    fn play_sound(&mut self, cue: Cue);
    fn play_background_music_loop(&mut self);
}

/// Terminal drawing plus audio.
pub struct TermSink {
    renderer: TermRenderer,
    audio: Audio,
}

impl TermSink {
    pub fn new(renderer: TermRenderer, audio: Audio) -> Self {
        TermSink { renderer, audio }
    }
}

impl Sink for TermSink {
    fn draw_frame(&mut self, segments: &[Cell], apple: Cell, score: usize) -> Result<()> {
        self.renderer.draw_frame(segments, apple, score)
    }

    fn show_game_over(&mut self, score: usize) -> Result<()> {
        self.renderer.show_game_over(score)
    }

    fn play_sound(&mut self, cue: Cue) {
        self.audio.play_cue(cue);
    }

    fn play_background_music_loop(&mut self) {
        self.audio.play_background_loop();
    }
}
