//! Minimal BBCode token layer.
//!
//! Chat text and the LevelDrain catalogues share a small tag vocabulary
//! (`[b]`, `[i]`, `[u]`, `[color=NAME]`, `[sup]`, `[sub]`, ...). This module
//! splits such text into tokens once so callers can operate on tags and text
//! runs instead of slicing raw strings around `[` and `]`.
//!
//! Anything between brackets that is not a well-formed tag (for example
//! `[ 1 ]` or an unterminated `[b`) is kept as plain text.

use std::fmt;

/// A single piece of BBCode text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Opening tag such as `[b]` or `[color=red]`
    Open {
        name: &'a str,
        arg: Option<&'a str>,
        raw: &'a str,
    },
    /// Closing tag such as `[/b]`
    Close { name: &'a str, raw: &'a str },
    /// Text between tags
    Text(&'a str),
}

impl<'a> Token<'a> {
    /// The source text this token was read from.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Open { raw, .. } | Token::Close { raw, .. } => *raw,
            Token::Text(text) => *text,
        }
    }

    /// True if this is an opening tag with the given name (case-insensitive).
    pub fn opens(&self, tag: &str) -> bool {
        matches!(self, Token::Open { name, .. } if name.eq_ignore_ascii_case(tag))
    }
}

/// Split `input` into tags and text runs.
///
/// Concatenating [`Token::as_str`] over the result reproduces `input` exactly.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = input[pos..].find('[') {
        let open = pos + offset;
        match parse_tag(&input[open..]) {
            Some((tag, len)) => {
                if open > text_start {
                    tokens.push(Token::Text(&input[text_start..open]));
                }
                tokens.push(tag);
                pos = open + len;
                text_start = pos;
            }
            None => pos = open + 1,
        }
    }

    if text_start < input.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }

    tokens
}

/// Parse a tag at the start of `s` (which begins with `[`).
///
/// Returns the token and its byte length.
fn parse_tag(s: &str) -> Option<(Token<'_>, usize)> {
    let end = s.find(']')?;
    let inner = &s[1..end];
    if inner.contains('[') {
        return None;
    }

    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };
    let (name, arg) = match body.split_once('=') {
        Some((name, arg)) => (name, Some(arg)),
        None => (body, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let raw = &s[..=end];
    let token = if closing {
        if arg.is_some() {
            return None;
        }
        Token::Close { name, raw }
    } else {
        Token::Open { name, arg, raw }
    };

    Some((token, end + 1))
}

/// Remove every tag, keeping only the text runs.
pub fn strip_tags(input: &str) -> String {
    tokenize(input)
        .into_iter()
        .filter_map(|token| match token {
            Token::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// The argument of the first `[color=...]` tag, if any.
pub fn first_color(input: &str) -> Option<&str> {
    tokenize(input).into_iter().find_map(|token| match token {
        Token::Open {
            name,
            arg: Some(arg),
            ..
        } if name.eq_ignore_ascii_case("color") => Some(arg.trim()),
        _ => None,
    })
}

/// Wrap the first non-blank text run in `[u]...[/u]`, leaving all tags in place.
///
/// `[color=red]Agile[/color]` becomes `[color=red][u]Agile[/u][/color]`.
pub fn underline_first_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 7);
    let mut done = false;

    for token in tokenize(input) {
        match token {
            Token::Text(text) if !done && !text.trim().is_empty() => {
                out.push_str(&Style::Underline.open());
                out.push_str(text);
                out.push_str(Style::Underline.close());
                done = true;
            }
            other => out.push_str(other.as_str()),
        }
    }

    out
}

/// Inline styles the formatter can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style<'a> {
    Bold,
    Italic,
    Underline,
    Color(&'a str),
}

impl Style<'_> {
    /// Opening tag text, e.g. `[b]` or `[color=red]`.
    pub fn open(&self) -> String {
        match self {
            Style::Bold => "[b]".to_string(),
            Style::Italic => "[i]".to_string(),
            Style::Underline => "[u]".to_string(),
            Style::Color(color) => format!("[color={}]", color),
        }
    }

    /// Closing tag text.
    pub fn close(&self) -> &'static str {
        match self {
            Style::Bold => "[/b]",
            Style::Italic => "[/i]",
            Style::Underline => "[/u]",
            Style::Color(_) => "[/color]",
        }
    }
}

impl fmt::Display for Style<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.open())
    }
}
