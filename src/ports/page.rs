//! Page source port — the core's only view of a document.

/// One atomic text node from the page.
///
/// The segmenter never splits inside a fragment; a fragment longer than the
/// chunk cap becomes a single over-cap chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    /// The fragment's text content.
    pub text: String,
    /// Opaque identity of the element the fragment came from (a selector in
    /// the browser adapter). Lets a task point back to its source location
    /// without the core depending on document APIs.
    pub source_ref: String,
    /// False for script/style-equivalent regions, which are excluded before
    /// chunk accumulation.
    pub is_content: bool,
}

/// Provides the linear text stream and metadata of one page.
pub trait PageSource: Send + Sync {
    /// Returns the page's atomic text fragments in document order.
    fn fragments(&self) -> Vec<TextFragment>;

    /// The page URL, if the source has one.
    fn url(&self) -> Option<String>;

    /// The page title.
    fn title(&self) -> String;
}
