use std::fmt;

use reel_clip_interface::{Subtitle, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionSpan {
    pub text: String,
    /// Index into [`Subtitle::words`] when this span is a timed word.
    pub word: Option<usize>,
    pub active: bool,
}

impl CaptionSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            word: None,
            active: false,
        }
    }
}

/// A caption split into spans so the active word can be styled.
///
/// Words are located in the caption text ignoring case and surrounding
/// punctuation, and the spans then reproduce the caption text unchanged. When
/// some word cannot be located, the spans are built from the word list instead.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptionLine {
    pub spans: Vec<CaptionSpan>,
}

struct Token {
    start: usize,
    end: usize,
    key: String,
}

impl CaptionLine {
    pub fn new(subtitle: &Subtitle, active_word: Option<usize>) -> Self {
        match locate_words(&subtitle.text, &subtitle.words) {
            Some(ranges) => Self::from_caption(&subtitle.text, &ranges, active_word),
            None => Self::from_words(subtitle, active_word),
        }
    }

    fn from_caption(
        text: &str,
        ranges: &[(usize, usize, usize)],
        active_word: Option<usize>,
    ) -> Self {
        let mut spans = Vec::new();
        let mut cursor = 0;

        for &(index, start, end) in ranges {
            if start > cursor {
                spans.push(CaptionSpan::plain(&text[cursor..start]));
            }
            spans.push(CaptionSpan {
                text: text[start..end].to_string(),
                word: Some(index),
                active: active_word == Some(index),
            });
            cursor = end;
        }

        if cursor < text.len() {
            spans.push(CaptionSpan::plain(&text[cursor..]));
        }

        Self { spans }
    }

    fn from_words(subtitle: &Subtitle, active_word: Option<usize>) -> Self {
        tracing::debug!(caption = %subtitle.text, "caption_words_unaligned");

        let mut spans = Vec::new();
        for (index, word) in subtitle.words.iter().enumerate() {
            if index > 0 {
                spans.push(CaptionSpan::plain(" "));
            }
            spans.push(CaptionSpan {
                text: word.text.clone(),
                word: Some(index),
                active: active_word == Some(index),
            });
        }

        Self { spans }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn active_span(&self) -> Option<&CaptionSpan> {
        self.spans.iter().find(|s| s.active)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Byte range of every word inside `text`, in word order, as
/// `(word_index, start, end)`. `None` if any word has no matching token.
fn locate_words(text: &str, words: &[Word]) -> Option<Vec<(usize, usize, usize)>> {
    let tokens = tokenize(text);
    let mut next = 0;
    let mut ranges = Vec::with_capacity(words.len());

    for (index, word) in words.iter().enumerate() {
        let key = match_key(&word.text);
        if key.is_empty() {
            continue;
        }
        let offset = tokens[next..].iter().position(|t| t.key == key)?;
        let token = &tokens[next + offset];
        ranges.push((index, token.start, token.end));
        next += offset + 1;
    }

    Some(ranges)
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                let raw = &text[s..i];
                let core = trim_punctuation(raw);
                if !core.is_empty() {
                    let lead = raw.len() - raw.trim_start_matches(is_punctuation).len();
                    tokens.push(Token {
                        start: s + lead,
                        end: s + lead + core.len(),
                        key: core.to_lowercase(),
                    });
                }
                start = None;
            }
            _ => {}
        }
    }
    tokens
}

fn match_key(word: &str) -> String {
    trim_punctuation(word.trim()).to_lowercase()
}

fn trim_punctuation(s: &str) -> &str {
    s.trim_matches(is_punctuation)
}

fn is_punctuation(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Plain rendering with the active word in brackets.
impl fmt::Display for CaptionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            if span.active {
                write!(f, "[{}]", span.text)?;
            } else {
                f.write_str(&span.text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_world() -> Subtitle {
        Subtitle::new("Well, hello world!").with_words(vec![
            Word::new("hello", 0, 400),
            Word::new("world", 450, 900),
        ])
    }

    #[test]
    fn test_highlight_rendering() {
        let subtitle = hello_world();

        insta::assert_snapshot!(CaptionLine::new(&subtitle, Some(1)), @"Well, hello [world]!");
        insta::assert_snapshot!(CaptionLine::new(&subtitle, None), @"Well, hello world!");
    }

    #[test]
    fn test_spans_preserve_full_text() {
        let subtitle = hello_world();
        let line = CaptionLine::new(&subtitle, Some(0));

        assert_eq!(line.text(), subtitle.text);
        assert_eq!(line.active_span().map(|s| s.text.as_str()), Some("hello"));
        assert_eq!(line.active_span().and_then(|s| s.word), Some(0));
    }

    #[test]
    fn test_plain_caption_without_words() {
        let line = CaptionLine::new(&Subtitle::new("just text"), None);

        assert_eq!(line.spans, vec![CaptionSpan::plain("just text")]);
        assert!(line.active_span().is_none());
    }

    #[test]
    fn test_repeated_word_matches_in_order() {
        let subtitle = Subtitle::new("no no no").with_words(vec![
            Word::new("no", 0, 100),
            Word::new("no", 150, 250),
            Word::new("no", 300, 400),
        ]);

        insta::assert_snapshot!(CaptionLine::new(&subtitle, Some(1)), @"no [no] no");
    }

    #[test]
    fn test_case_and_punctuation_are_ignored() {
        let subtitle = Subtitle::new("Hello world.").with_words(vec![
            Word::new("hello", 0, 400),
            Word::new("World!", 450, 900),
        ]);

        insta::assert_snapshot!(CaptionLine::new(&subtitle, Some(0)), @"[Hello] world.");
        insta::assert_snapshot!(CaptionLine::new(&subtitle, Some(1)), @"Hello [world].");
    }

    #[test]
    fn test_unaligned_words_fall_back_to_word_list() {
        let subtitle = Subtitle::new("hello world").with_words(vec![
            Word::new("goodbye", 0, 100),
            Word::new("world", 150, 250),
        ]);
        let line = CaptionLine::new(&subtitle, Some(0));

        assert_eq!(line.text(), "goodbye world");
        assert_eq!(line.active_span().map(|s| s.text.as_str()), Some("goodbye"));
    }
}
