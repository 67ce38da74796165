use reel_clip_interface::ClipResult;

use crate::caption::CaptionLine;
use crate::frame::PlayerFrame;
use crate::sink::MediaSink;
use crate::state::{ClipToken, LoadTicket, PlayerEvent, PlayerState};

/// Sequential autoplay over a fixed clip queue, looping forever.
///
/// All transitions happen on the caller's thread through `&mut self`; the
/// engine never spawns or locks. Events from the media sink and results of
/// queue fetches are matched against the current [`ClipToken`] /
/// [`LoadTicket`], and stale ones are dropped.
pub struct PlaybackEngine<M> {
    sink: M,
    state: PlayerState,
    queue: Vec<ClipResult>,
    active_word: Option<usize>,
    clock_ms: i64,
    generation: u64,
    sequence: u64,
}

impl<M: MediaSink> PlaybackEngine<M> {
    pub fn new(sink: M) -> Self {
        Self {
            sink,
            state: PlayerState::Empty,
            queue: Vec::new(),
            active_word: None,
            clock_ms: 0,
            generation: 0,
            sequence: 0,
        }
    }

    pub fn sink(&self) -> &M {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut M {
        &mut self.sink
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn queue(&self) -> &[ClipResult] {
        &self.queue
    }

    pub fn active_word(&self) -> Option<usize> {
        self.active_word
    }

    pub fn current_clip(&self) -> Option<&ClipResult> {
        self.state.index().and_then(|i| self.queue.get(i))
    }

    /// Token of the clip currently handed to the sink.
    pub fn current_token(&self) -> Option<ClipToken> {
        self.current_clip().map(|_| ClipToken {
            generation: self.generation,
            sequence: self.sequence,
        })
    }

    /// Drops the current query and waits for a new queue.
    ///
    /// Any earlier ticket, and every token issued before this call, is stale
    /// from here on.
    pub fn begin_loading(&mut self) -> LoadTicket {
        self.reset();
        self.state = PlayerState::Loading;

        tracing::debug!(generation = self.generation, "playback_loading");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Completes a load started by [`Self::begin_loading`]. Returns `false`
    /// when the ticket belongs to a superseded query.
    pub fn finish_loading(&mut self, ticket: LoadTicket, clips: Vec<ClipResult>) -> bool {
        if ticket.generation != self.generation || self.state != PlayerState::Loading {
            tracing::debug!(
                ticket = ticket.generation,
                generation = self.generation,
                "stale_queue_ignored"
            );
            return false;
        }

        self.queue = clips.into_iter().filter(ClipResult::is_playable).collect();

        if self.queue.is_empty() {
            self.state = PlayerState::Unavailable;
            tracing::info!("playback_unavailable");
        } else {
            tracing::info!(clip_count = self.queue.len(), "playback_queue_loaded");
            self.start_clip(0);
        }
        true
    }

    /// Replaces the whole playback state with a fresh queue.
    pub fn load_queue(&mut self, clips: Vec<ClipResult>) {
        let ticket = self.begin_loading();
        self.finish_loading(ticket, clips);
    }

    /// Advances to the next clip, wrapping to the first after the last.
    pub fn on_clip_finished(&mut self) {
        let Some(index) = self.state.index() else {
            return;
        };
        self.start_clip((index + 1) % self.queue.len());
    }

    /// Playback errors are never terminal: the broken clip is skipped.
    pub fn on_clip_errored(&mut self) {
        if let Some(clip) = self.current_clip() {
            tracing::warn!(url = %clip.url, "clip_playback_failed");
        }
        self.on_clip_finished();
    }

    pub fn on_clock_tick(&mut self, ms: i64) {
        if self.state.index().is_none() {
            return;
        }
        self.clock_ms = ms;
        self.active_word = self
            .current_clip()
            .and_then(|clip| clip.subtitle.as_ref())
            .and_then(|subtitle| subtitle.word_at(ms));
    }

    /// Applies one external event. Returns `false` if it was stale.
    pub fn handle(&mut self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::QueueLoaded { ticket, clips } => self.finish_loading(ticket, clips),
            PlayerEvent::ClipEnded(token) => self.if_current(token, Self::on_clip_finished),
            PlayerEvent::ClipErrored(token) => self.if_current(token, Self::on_clip_errored),
            PlayerEvent::ClockTick { token, ms } => {
                self.if_current(token, |engine| engine.on_clock_tick(ms))
            }
        }
    }

    pub fn frame(&self) -> PlayerFrame {
        let clip = self.current_clip();

        PlayerFrame {
            state: self.state,
            clip_count: self.queue.len(),
            url: clip.map(|c| c.url.clone()),
            caption: clip
                .and_then(|c| c.subtitle.as_ref())
                .map(|subtitle| CaptionLine::new(subtitle, self.active_word)),
            active_word: self.active_word,
            clock_ms: self.clock_ms,
        }
    }

    fn if_current(&mut self, token: ClipToken, apply: impl FnOnce(&mut Self)) -> bool {
        if self.current_token() != Some(token) {
            tracing::trace!(?token, "stale_media_event_ignored");
            return false;
        }
        apply(self);
        true
    }

    fn start_clip(&mut self, index: usize) {
        self.sequence += 1;
        self.state = PlayerState::Playing { index };
        self.active_word = None;
        self.clock_ms = 0;

        let token = ClipToken {
            generation: self.generation,
            sequence: self.sequence,
        };
        let url = self.queue[index].url.clone();
        tracing::debug!(index, url = %url, "clip_started");
        self.sink.load(&url, token);
    }

    fn reset(&mut self) {
        if self.state.index().is_some() {
            self.sink.stop();
        }
        self.generation += 1;
        self.sequence = 0;
        self.state = PlayerState::Empty;
        self.queue.clear();
        self.active_word = None;
        self.clock_ms = 0;
    }
}
