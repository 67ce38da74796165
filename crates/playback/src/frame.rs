use crate::caption::CaptionLine;
use crate::state::PlayerState;

/// Everything a renderer needs for the current moment of playback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerFrame {
    pub state: PlayerState,
    pub clip_count: usize,
    pub url: Option<String>,
    /// `None` when the current clip carries no subtitle.
    pub caption: Option<CaptionLine>,
    pub active_word: Option<usize>,
    pub clock_ms: i64,
}

impl PlayerFrame {
    pub fn clip_index(&self) -> Option<usize> {
        self.state.index()
    }
}
