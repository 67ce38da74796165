mod caption;
mod client;
mod engine;
mod frame;
mod sink;
mod state;

pub use caption::{CaptionLine, CaptionSpan};
pub use client::{ClientError, ClipsClient};
pub use engine::PlaybackEngine;
pub use frame::PlayerFrame;
pub use sink::MediaSink;
pub use state::{ClipToken, LoadTicket, PlayerEvent, PlayerState};

pub use reel_clip_interface::{ClipResult, Subtitle, Word};
