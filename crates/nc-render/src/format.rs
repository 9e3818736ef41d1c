//! Text formatting: raw node text → styled lines.
//!
//! The renderer only needs `(text, style)` pairs; which markers are
//! recognised is up to the [`LineFormatter`]. The default
//! [`MarkerFormatter`] handles a small Markdown-like subset, parsed one
//! line at a time with `winnow`:
//!
//! - `#` to `######` followed by a space: heading levels 1 to 6
//! - `-`, `*` or `+` followed by a space: bullet item
//! - `1.` followed by a space: ordered item
//! - `>`: quote
//! - a line starting with three backticks toggles code mode

use winnow::ascii::{digit1, space0, space1};
use winnow::combinator::{alt, preceded};
use winnow::prelude::*;
use winnow::token::{one_of, rest, take_while};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Body,
    /// Heading level 1 to 6.
    Heading(u8),
    Bullet,
    Ordered,
    Quote,
    Code,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Turns raw node text into styled lines.
pub trait LineFormatter {
    fn format(&self, text: &str) -> Vec<StyledLine>;
}

/// No markers at all: every line is body text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl LineFormatter for PlainFormatter {
    fn format(&self, text: &str) -> Vec<StyledLine> {
        text.lines()
            .map(|line| {
                let style = if line.trim().is_empty() { LineStyle::Blank } else { LineStyle::Body };
                StyledLine::new(line, style)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerFormatter;

impl LineFormatter for MarkerFormatter {
    fn format(&self, text: &str) -> Vec<StyledLine> {
        let mut out = Vec::new();
        let mut in_code = false;

        for raw in text.lines() {
            let mut input = raw.trim_start();
            let parsed = marker.parse_next(&mut input).ok();

            if in_code {
                if matches!(parsed, Some(Marker::Fence)) {
                    in_code = false;
                } else {
                    out.push(StyledLine::new(raw, LineStyle::Code));
                }
                continue;
            }

            let line = match parsed {
                Some(Marker::Fence) => {
                    in_code = true;
                    continue;
                }
                Some(Marker::Heading(level, body)) => StyledLine::new(body.trim_end(), LineStyle::Heading(level)),
                Some(Marker::Bullet(body)) => StyledLine::new(format!("• {body}"), LineStyle::Bullet),
                Some(Marker::Ordered(n, body)) => StyledLine::new(format!("{n}. {body}"), LineStyle::Ordered),
                Some(Marker::Quote(body)) => StyledLine::new(body, LineStyle::Quote),
                None if raw.trim().is_empty() => StyledLine::new("", LineStyle::Blank),
                None => StyledLine::new(raw, LineStyle::Body),
            };
            out.push(line);
        }
        out
    }
}

// ─── Line parsers ────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Marker<'a> {
    Heading(u8, &'a str),
    Bullet(&'a str),
    Ordered(&'a str, &'a str),
    Quote(&'a str),
    Fence,
}

fn marker<'a>(input: &mut &'a str) -> ModalResult<Marker<'a>> {
    alt((
        "```".map(|_| Marker::Fence),
        heading.map(|(level, body)| Marker::Heading(level, body)),
        bullet.map(Marker::Bullet),
        ordered.map(|(n, body)| Marker::Ordered(n, body)),
        quote.map(Marker::Quote),
    ))
    .parse_next(input)
}

fn heading<'a>(input: &mut &'a str) -> ModalResult<(u8, &'a str)> {
    (take_while(1..=6, '#'), preceded(space1, rest))
        .map(|(hashes, body): (&str, &str)| (hashes.len() as u8, body))
        .parse_next(input)
}

fn bullet<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded((one_of(['-', '*', '+']), space1), rest).parse_next(input)
}

fn ordered<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    (digit1, preceded(('.', space1), rest)).parse_next(input)
}

fn quote<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    preceded(('>', space0), rest).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styles(text: &str) -> Vec<LineStyle> {
        MarkerFormatter.format(text).into_iter().map(|l| l.style).collect()
    }

    #[test]
    fn recognises_markers() {
        let lines = MarkerFormatter.format("# Title\n- one\n2. two\n> said\nplain\n\n### Small");
        assert_eq!(
            lines,
            vec![
                StyledLine::new("Title", LineStyle::Heading(1)),
                StyledLine::new("• one", LineStyle::Bullet),
                StyledLine::new("2. two", LineStyle::Ordered),
                StyledLine::new("said", LineStyle::Quote),
                StyledLine::new("plain", LineStyle::Body),
                StyledLine::new("", LineStyle::Blank),
                StyledLine::new("Small", LineStyle::Heading(3)),
            ]
        );
    }

    #[test]
    fn hashes_without_space_or_too_many_are_body() {
        assert_eq!(styles("#tag\n####### seven"), vec![LineStyle::Body, LineStyle::Body]);
    }

    #[test]
    fn code_fence_suspends_markers() {
        let lines = MarkerFormatter.format("```rust\n# not a heading\n- nor a bullet\n```\n- bullet");
        assert_eq!(
            lines.iter().map(|l| l.style).collect::<Vec<_>>(),
            vec![LineStyle::Code, LineStyle::Code, LineStyle::Bullet]
        );
        assert_eq!(lines[0].text, "# not a heading");
    }

    #[test]
    fn horizontal_rule_is_not_a_bullet() {
        assert_eq!(styles("---"), vec![LineStyle::Body]);
    }
}
