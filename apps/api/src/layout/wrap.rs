//! Greedy word wrap over mixed-style runs.
//!
//! A paragraph is a slice of `Run`s. Words never cross a run boundary, so a
//! bold title followed by a regular " at Company" keeps both styles on the
//! same line until the width is exhausted. Whitespace between words belongs to
//! the following word and is measured in its style. `\n` forces a break.

use super::error::RenderError;
use super::font_metrics::{get_metrics, line_height};
use super::style::TextStyle;

/// Slack for float accumulation when comparing against the line width.
const WIDTH_EPSILON: f32 = 1e-3;

/// A span of text in a single style.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    pub text: &'a str,
    pub style: TextStyle,
}

impl<'a> Run<'a> {
    pub fn new(text: &'a str, style: TextStyle) -> Self {
        Self { text, style }
    }
}

/// Consecutive words of one style on one line, positioned relative to the line start.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: TextStyle,
    pub offset: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub segments: Vec<Segment>,
    pub width: f32,
    /// Largest font size on the line; drives line height and baseline.
    pub size: f32,
}

impl Line {
    pub fn height(&self) -> f32 {
        line_height(self.size)
    }

    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

enum Token<'a> {
    Word {
        text: &'a str,
        style: TextStyle,
        space_before: bool,
    },
    Break(TextStyle),
}

fn tokenize<'a>(runs: &[Run<'a>]) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    for run in runs {
        for (i, piece) in run.text.split('\n').enumerate() {
            if i > 0 {
                tokens.push(Token::Break(run.style));
            }
            let leading_space = piece.starts_with(char::is_whitespace);
            for (j, word) in piece.split_whitespace().enumerate() {
                tokens.push(Token::Word {
                    text: word,
                    style: run.style,
                    space_before: j > 0 || leading_space,
                });
            }
        }
    }
    tokens
}

#[derive(Default)]
struct LineBuilder {
    segments: Vec<Segment>,
    width: f32,
    size: f32,
}

impl LineBuilder {
    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, word: &str, style: TextStyle, with_space: bool, advance: f32) {
        self.size = self.size.max(style.size);
        match self.segments.last_mut() {
            Some(last) if last.style == style => {
                if with_space {
                    last.text.push(' ');
                }
                last.text.push_str(word);
                last.width += advance;
            }
            _ => {
                let text = if with_space {
                    format!(" {word}")
                } else {
                    word.to_string()
                };
                self.segments.push(Segment {
                    text,
                    style,
                    offset: self.width,
                    width: advance,
                });
            }
        }
        self.width += advance;
    }

    fn finish(&mut self, fallback_size: f32) -> Line {
        let builder = std::mem::take(self);
        Line {
            size: if builder.segments.is_empty() {
                fallback_size
            } else {
                builder.size
            },
            segments: builder.segments,
            width: builder.width,
        }
    }
}

/// Breaks `runs` into lines no wider than `max_width` points.
pub fn wrap_runs(runs: &[Run<'_>], max_width: f32) -> Result<Vec<Line>, RenderError> {
    if !max_width.is_finite() || max_width <= 0.0 {
        return Err(RenderError::InvalidGeometry(format!(
            "text width must be positive, got {max_width}"
        )));
    }

    let mut lines = Vec::new();
    let mut builder = LineBuilder::default();

    for token in tokenize(runs) {
        match token {
            Token::Break(style) => lines.push(builder.finish(style.size)),
            Token::Word {
                text,
                style,
                space_before,
            } => {
                let metrics = get_metrics(style.font);
                let word_w = metrics.measure_str(text, style.size);
                let mut space_w = if space_before && !builder.is_empty() {
                    metrics.measure_str(" ", style.size)
                } else {
                    0.0
                };

                if !builder.is_empty() && builder.width + space_w + word_w > max_width + WIDTH_EPSILON
                {
                    lines.push(builder.finish(style.size));
                    space_w = 0.0;
                }

                if builder.is_empty() && word_w > max_width + WIDTH_EPSILON {
                    // Hard-break an overlong word (URLs, hashes) by character.
                    let mut chunk = String::new();
                    let mut chunk_w = 0.0;
                    for c in text.chars() {
                        let c_w = metrics.char_width(c) as f32 * style.size / 1000.0;
                        if !chunk.is_empty() && chunk_w + c_w > max_width + WIDTH_EPSILON {
                            builder.push(&chunk, style, false, chunk_w);
                            lines.push(builder.finish(style.size));
                            chunk.clear();
                            chunk_w = 0.0;
                        }
                        chunk.push(c);
                        chunk_w += c_w;
                    }
                    builder.push(&chunk, style, false, chunk_w);
                } else {
                    builder.push(text, style, space_w > 0.0, space_w + word_w);
                }
            }
        }
    }

    if !builder.is_empty() {
        let size = builder.size;
        lines.push(builder.finish(size));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::{BODY, ENTRY_SUBTITLE, ENTRY_TITLE};

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_runs(&[Run::new("", BODY)], 100.0).unwrap().is_empty());
        assert!(wrap_runs(&[Run::new("   ", BODY)], 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_runs(&[Run::new("Rust, Go, Python", BODY)], 230.0).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Rust, Go, Python");
        assert!(lines[0].width <= 230.0);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Architected a distributed caching layer using consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load across three regions";
        let lines = wrap_runs(&[Run::new(text, BODY)], 230.0).unwrap();
        assert!(lines.len() >= 2, "expected wrap, got {} lines", lines.len());
        for line in &lines {
            assert!(line.width <= 230.0 + WIDTH_EPSILON, "line too wide: {}", line.width);
        }
        let rejoined: Vec<String> = lines.iter().map(|l| l.text()).collect();
        assert_eq!(rejoined.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_mixed_runs_share_a_line() {
        let runs = [
            Run::new("Engineer", ENTRY_TITLE),
            Run::new(" at Initech", ENTRY_SUBTITLE),
        ];
        let lines = wrap_runs(&runs, 230.0).unwrap();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.segments.len(), 2);
        assert_eq!(line.segments[0].text, "Engineer");
        assert_eq!(line.segments[1].text, " at Initech");
        assert!((line.segments[1].offset - line.segments[0].width).abs() < 1e-4);
        assert_eq!(line.size, ENTRY_TITLE.size);
    }

    #[test]
    fn test_newline_forces_break() {
        let lines = wrap_runs(&[Run::new("first\nsecond", BODY)], 400.0).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].text(), "second");
    }

    #[test]
    fn test_overlong_word_is_hard_broken() {
        let url = "https://example.com/".to_string() + &"a".repeat(120);
        let lines = wrap_runs(&[Run::new(&url, BODY)], 100.0).unwrap();
        assert!(lines.len() > 1);
        assert_eq!(lines.iter().map(|l| l.text()).collect::<String>(), url);
        for line in &lines {
            assert!(line.width <= 100.0 + WIDTH_EPSILON);
        }
    }

    #[test]
    fn test_non_positive_width_is_rejected() {
        assert!(matches!(
            wrap_runs(&[Run::new("x", BODY)], 0.0),
            Err(RenderError::InvalidGeometry(_))
        ));
    }
}
