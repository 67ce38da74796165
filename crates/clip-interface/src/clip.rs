use crate::common_derives;

common_derives! {
    /// One timed word of a caption. Timing is relative to clip start and
    /// inclusive on both bounds.
    pub struct Word {
        pub text: String,
        #[serde(rename = "start")]
        pub start_ms: i64,
        #[serde(rename = "end")]
        pub end_ms: i64,
    }
}

impl Word {
    pub fn new(text: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }

    pub fn contains(&self, time_ms: i64) -> bool {
        self.start_ms <= time_ms && time_ms <= self.end_ms
    }
}

common_derives! {
    pub struct Subtitle {
        pub text: String,
        #[serde(rename = "start", default)]
        pub start_ms: i64,
        #[serde(rename = "end", default)]
        pub end_ms: i64,
        #[serde(default)]
        pub words: Vec<Word>,
    }
}

impl Subtitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_ms: 0,
            end_ms: 0,
            words: Vec::new(),
        }
    }

    pub fn with_window(mut self, start_ms: i64, end_ms: i64) -> Self {
        self.start_ms = start_ms;
        self.end_ms = end_ms;
        self
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }

    /// Index of the first word, in list order, whose window contains `time_ms`.
    pub fn word_at(&self, time_ms: i64) -> Option<usize> {
        self.words.iter().position(|w| w.contains(time_ms))
    }

    /// Clip-relative length implied by the timing: the latest word end, or
    /// the width of the caption window when there are no words. The window
    /// position itself is source timing and never used as a clip offset.
    pub fn duration_ms(&self) -> i64 {
        match self.words.iter().map(|w| w.end_ms).max() {
            Some(end) => end.max(0),
            None => (self.end_ms - self.start_ms).max(0),
        }
    }
}

common_derives! {
    /// One playable unit.
    pub struct ClipResult {
        pub url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub subtitle: Option<Subtitle>,
    }
}

impl ClipResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            subtitle: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: Subtitle) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn is_playable(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
