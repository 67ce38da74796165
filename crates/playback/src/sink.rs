use crate::state::ClipToken;

/// Whatever actually plays the media.
///
/// The sink reports back through [`crate::PlayerEvent`]s carrying the token it
/// was handed in [`MediaSink::load`].
pub trait MediaSink {
    fn load(&mut self, url: &str, token: ClipToken);

    fn stop(&mut self);
}
