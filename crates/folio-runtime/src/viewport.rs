//! Viewport dimensions and media-query matching.
//!
//! Sessions are initialized for a concrete viewport (a preview window, a
//! headless build, a test). Capability checks are expressed as media queries
//! evaluated against that viewport instead of being probed from a live
//! display.

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Evaluate a media query against this viewport.
    pub fn matches(&self, query: MediaQuery) -> bool {
        match query {
            MediaQuery::MinWidth(px) => self.width >= px,
            MediaQuery::MaxWidth(px) => self.width <= px,
        }
    }
}

impl Default for Viewport {
    /// A typical desktop preview window.
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

/// A media query over viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaQuery {
    /// Matches viewports at least this wide, like CSS `(min-width: Npx)`.
    MinWidth(u32),

    /// Matches viewports at most this wide, like CSS `(max-width: Npx)`.
    MaxWidth(u32),
}
