use reel_playback::{ClipToken, MediaSink, PlayerEvent};

/// Stand-in for a video element: a clock that runs while a clip is loaded.
#[derive(Debug, Default)]
pub struct SimulatedSink {
    current: Option<ClipToken>,
    position_ms: i64,
    pub paused: bool,
    pub url: Option<String>,
}

impl SimulatedSink {
    /// Moves the clock forward and reports what a real player would emit.
    pub fn advance(&mut self, elapsed_ms: i64, duration_ms: i64) -> Vec<PlayerEvent> {
        let Some(token) = self.current else {
            return Vec::new();
        };
        if self.paused {
            return Vec::new();
        }

        self.position_ms += elapsed_ms;
        let mut events = vec![PlayerEvent::ClockTick {
            token,
            ms: self.position_ms,
        }];

        if self.position_ms > duration_ms {
            self.current = None;
            events.push(PlayerEvent::ClipEnded(token));
        }
        events
    }

    pub fn skip(&mut self) -> Option<PlayerEvent> {
        self.current.take().map(PlayerEvent::ClipEnded)
    }

    pub fn fail(&mut self) -> Option<PlayerEvent> {
        self.current.take().map(PlayerEvent::ClipErrored)
    }
}

impl MediaSink for SimulatedSink {
    fn load(&mut self, url: &str, token: ClipToken) {
        self.current = Some(token);
        self.position_ms = 0;
        self.url = Some(url.to_string());
    }

    fn stop(&mut self) {
        self.current = None;
        self.position_ms = 0;
        self.url = None;
    }
}
