//! Console report builder
//!
//! Reports are built as values and written in one go, so labels and their
//! order stay fixed per command and tests can assert on the rendered text.

use std::fmt;
use std::io::{self, Write};

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Blank,
    Text { indent: usize, text: String },
    Field { indent: usize, label: String, value: String },
}

/// A sequence of report lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<Line>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank line followed by `title:`
    pub fn section(self, title: impl fmt::Display) -> Self {
        self.blank().text(format!("{}:", title))
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(Line::Blank);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.text_at(0, text)
    }

    pub fn text_at(mut self, indent: usize, text: impl Into<String>) -> Self {
        self.lines.push(Line::Text {
            indent,
            text: text.into(),
        });
        self
    }

    /// `label: value`
    pub fn add(self, label: impl Into<String>, value: impl fmt::Display) -> Self {
        self.add_at(0, label, value)
    }

    pub fn add_at(mut self, indent: usize, label: impl Into<String>, value: impl fmt::Display) -> Self {
        self.lines.push(Line::Field {
            indent,
            label: label.into(),
            value: value.to_string(),
        });
        self
    }

    /// Append another report's lines
    pub fn extend(mut self, other: Report) -> Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Blank => writeln!(f)?,
                Line::Text { indent, text } => writeln!(f, "{}{}", INDENT.repeat(*indent), text)?,
                Line::Field {
                    indent,
                    label,
                    value,
                } => writeln!(f, "{}{}: {}", INDENT.repeat(*indent), label, value)?,
            }
        }
        Ok(())
    }
}
