//! The book record

use serde::{Deserialize, Serialize};
use std::fmt;

/// A page count as the user typed it or as it was persisted.
///
/// Form input always produces text; older stores may hold plain numbers.
/// Both survive a save/load cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pages {
    /// A JSON number
    Number(serde_json::Number),
    /// Raw text, not necessarily numeric
    Text(String),
}

impl Pages {
    /// Numeric reading of the page count.
    ///
    /// Text is read the way JavaScript's `Number()` reads a string: it is
    /// trimmed, empty text is zero, `Infinity` may carry a sign, and
    /// unsigned `0x`/`0o`/`0b` literals are accepted. Returns `None` for
    /// anything else.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Pages::Number(n) => n.as_f64(),
            Pages::Text(s) => parse_number(s),
        }
    }

    /// Whether the count calls for the plural "pages".
    pub fn is_plural(&self) -> bool {
        self.as_f64().map_or(false, |n| n > 1.0)
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }
    // Rust's float grammar also takes "inf", "nan" and friends; Number() does not.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pages::Number(n) => write!(f, "{}", n),
            Pages::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Pages {
    fn from(s: &str) -> Self {
        Pages::Text(s.to_string())
    }
}

impl From<String> for Pages {
    fn from(s: String) -> Self {
        Pages::Text(s)
    }
}

impl From<u64> for Pages {
    fn from(n: u64) -> Self {
        Pages::Number(n.into())
    }
}

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Title as entered
    pub title: String,

    /// Author as entered
    pub author: String,

    /// Page count, text or number
    pub pages: Pages,

    /// Whether the book has been read
    pub have_read: bool,
}

impl Book {
    /// Create a new book.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        pages: impl Into<Pages>,
        have_read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            pages: pages.into(),
            have_read,
        }
    }

    /// One-line summary, e.g. `Dune by Herbert, 412 pages, have read`.
    pub fn info(&self) -> String {
        let unit = if self.pages.is_plural() { "pages" } else { "page" };
        let status = if self.have_read {
            "have read"
        } else {
            "not read yet"
        };
        format!(
            "{} by {}, {} {}, {}",
            self.title, self.author, self.pages, unit, status
        )
    }

    /// Flip the read flag.
    pub fn toggle_read(&mut self) {
        self.have_read = !self.have_read;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.info())
    }
}
