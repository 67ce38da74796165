use crossterm::event::{KeyCode, KeyEvent};
use reel_clip_interface::ClipResult;
use reel_playback::{LoadTicket, PlaybackEngine, PlayerEvent};

use crate::event::FetchOutcome;
use crate::sink::SimulatedSink;

/// Clips without word timing still play for a while.
pub const DEFAULT_CLIP_MS: i64 = 4_000;

pub struct App {
    pub phrase: String,
    pub language: String,
    pub engine: PlaybackEngine<SimulatedSink>,
    pub error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(phrase: String, language: String) -> Self {
        Self {
            phrase,
            language,
            engine: PlaybackEngine::new(SimulatedSink::default()),
            error: None,
            should_quit: false,
        }
    }

    pub fn begin_query(&mut self) -> LoadTicket {
        self.error = None;
        self.engine.begin_loading()
    }

    pub fn handle_fetched(&mut self, outcome: FetchOutcome) {
        let clips = match outcome.result {
            Ok(clips) => clips,
            Err(e) => {
                self.error = Some(e.to_string());
                Vec::new()
            }
        };
        self.engine.handle(PlayerEvent::QueueLoaded {
            ticket: outcome.ticket,
            clips,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let event = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char(' ') => {
                let sink = self.engine.sink_mut();
                sink.paused = !sink.paused;
                None
            }
            KeyCode::Char('n') => self.engine.sink_mut().skip(),
            KeyCode::Char('e') => self.engine.sink_mut().fail(),
            _ => None,
        };

        if let Some(event) = event {
            self.engine.handle(event);
        }
    }

    pub fn tick(&mut self, elapsed_ms: i64) {
        let duration = self
            .engine
            .current_clip()
            .map(clip_duration)
            .unwrap_or(DEFAULT_CLIP_MS);

        for event in self.engine.sink_mut().advance(elapsed_ms, duration) {
            self.engine.handle(event);
        }
    }

    pub fn paused(&self) -> bool {
        self.engine.sink().paused
    }
}

/// Length implied by the subtitle timing, falling back to [`DEFAULT_CLIP_MS`].
pub fn clip_duration(clip: &ClipResult) -> i64 {
    clip.subtitle
        .as_ref()
        .map(|s| s.duration_ms())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_CLIP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use reel_clip_interface::{Subtitle, Word};
    use reel_playback::PlayerState;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn loaded(clips: Vec<ClipResult>) -> App {
        let mut app = App::new("hello".into(), "en".into());
        let ticket = app.begin_query();
        app.handle_fetched(FetchOutcome {
            ticket,
            result: Ok(clips),
        });
        app
    }

    fn short_clip(url: &str) -> ClipResult {
        ClipResult::new(url).with_subtitle(
            Subtitle::new("hi").with_words(vec![Word::new("hi", 0, 300)]),
        )
    }

    #[test]
    fn clock_runs_clips_back_to_back() {
        let mut app = loaded(vec![short_clip("https://cdn/a.mp4"), short_clip("https://cdn/b.mp4")]);

        app.tick(100);
        assert_eq!(app.engine.active_word(), Some(0));

        app.tick(250);
        assert_eq!(app.engine.state(), PlayerState::Playing { index: 1 });
        assert_eq!(app.engine.sink().url.as_deref(), Some("https://cdn/b.mp4"));

        app.tick(400);
        assert_eq!(app.engine.state(), PlayerState::Playing { index: 0 });
    }

    #[test]
    fn keys_skip_fail_pause_and_quit() {
        let mut app = loaded(vec![short_clip("https://cdn/a.mp4"), short_clip("https://cdn/b.mp4")]);

        app.handle_key(key('n'));
        assert_eq!(app.engine.state(), PlayerState::Playing { index: 1 });
        app.handle_key(key('e'));
        assert_eq!(app.engine.state(), PlayerState::Playing { index: 0 });

        app.handle_key(key(' '));
        assert!(app.paused());
        app.tick(10_000);
        assert_eq!(app.engine.state(), PlayerState::Playing { index: 0 });

        app.handle_key(key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn failed_fetch_is_unavailable_with_message() {
        let mut app = App::new("hello".into(), "en".into());
        let ticket = app.begin_query();
        app.handle_fetched(FetchOutcome {
            ticket,
            result: Err(reel_playback::ClientError::Api {
                status: 500,
                message: "Failed to fetch clips from the video service".into(),
            }),
        });

        assert_eq!(app.engine.state(), PlayerState::Unavailable);
        assert!(app.error.as_deref().is_some_and(|e| e.contains("500")));
    }

    #[test]
    fn duration_prefers_timing_then_default() {
        assert_eq!(clip_duration(&short_clip("u")), 300);
        assert_eq!(clip_duration(&ClipResult::new("u")), DEFAULT_CLIP_MS);
    }

    #[test]
    fn source_window_does_not_stretch_the_clip() {
        let clip = ClipResult::new("https://cdn/a.mp4").with_subtitle(
            Subtitle::new("hello world")
                .with_window(3_600_000, 3_601_000)
                .with_words(vec![Word::new("hello", 0, 400), Word::new("world", 450, 900)]),
        );
        assert_eq!(clip_duration(&clip), 900);

        let mut app = loaded(vec![clip, short_clip("https://cdn/b.mp4")]);
        app.tick(1_000);
        assert_eq!(app.engine.state(), PlayerState::Playing { index: 1 });
    }
}
