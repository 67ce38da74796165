mod config;
mod error;
pub mod extract;
mod search;
mod session;
mod upstream;

pub use config::UpstreamConfig;
pub use error::{Error, Result};
pub use search::{ClipSearch, RESULT_CAP};
pub use session::{
    ConfiguredSession, LiveSession, Session, SessionProvider, SessionSource, find_csrf_token,
};
pub use upstream::UpstreamClient;

pub use reel_clip_interface::{ClipResult, Subtitle, Word};
