use reel_clip_interface::ClipResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Empty,
    Loading,
    Playing {
        index: usize,
    },
    /// A query finished with nothing playable. No clip is ever selected.
    Unavailable,
}

impl PlayerState {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Playing { index } => Some(*index),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading => "loading",
            Self::Playing { .. } => "playing",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Identifies one clip change within one query.
///
/// Media events are tagged with the token of the clip they belong to, so an
/// `ended` arriving after the engine already moved on is recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipToken {
    pub generation: u64,
    pub sequence: u64,
}

/// Issued when a query starts loading. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub(crate) generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    QueueLoaded {
        ticket: LoadTicket,
        clips: Vec<ClipResult>,
    },
    ClipEnded(ClipToken),
    ClipErrored(ClipToken),
    ClockTick {
        token: ClipToken,
        ms: i64,
    },
}
