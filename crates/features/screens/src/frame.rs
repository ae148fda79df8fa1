use std::fmt;

/// One row of a [`Frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Plain text.
    Text(String),
    /// A list row, keyed by the stable id of the message it shows.
    Row { id: u64, text: String },
    /// A button or navigation entry.
    Action(String),
}

/// Renderable snapshot of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub title: String,
    pub lines: Vec<Line>,
}

impl Frame {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), lines: Vec::new() }
    }

    #[must_use]
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    /// Texts of the [`Line::Row`] entries, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::Row { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Captions of the [`Line::Action`] entries.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::Action(caption) => Some(caption.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for line in &self.lines {
            match line {
                Line::Text(text) => writeln!(f, "{text}")?,
                Line::Row { id, text } => writeln!(f, "  #{id:<3} {text}")?,
                Line::Action(caption) => writeln!(f, "[ {caption} ]")?,
            }
        }
        Ok(())
    }
}
