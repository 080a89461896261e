//! Plain-text adapter for the `PageSource` port.
//!
//! Serves a captured page body (a saved text file, or text piped through
//! the CLI) as one fragment per non-empty line. Line numbers stand in for
//! element selectors as the source reference.

use std::fs;
use std::io;
use std::path::Path;

use crate::ports::page::{PageSource, TextFragment};

/// Page source over plain text, one fragment per line.
pub struct PlainTextPage {
    lines: Vec<String>,
    url: Option<String>,
    title: String,
}

impl PlainTextPage {
    /// Creates a page from already-loaded text.
    #[must_use]
    pub fn from_text(text: &str, url: Option<String>, title: String) -> Self {
        Self { lines: text.lines().map(str::to_string).collect(), url, title }
    }

    /// Loads a page body from a file. The title defaults to the file name
    /// when none is given.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn from_file(
        path: &Path,
        url: Option<String>,
        title: Option<String>,
    ) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let title = title.unwrap_or_else(|| {
            path.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned())
        });
        Ok(Self::from_text(&text, url, title))
    }
}

impl PageSource for PlainTextPage {
    fn fragments(&self) -> Vec<TextFragment> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| TextFragment {
                text: line.clone(),
                source_ref: format!("line:{}", i + 1),
                is_content: true,
            })
            .collect()
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}
