//! Component trait and identity hashing.
//!
//! A component turns a property bag into markup. Implementations come from
//! bundles; the runtime only sees them through [`Component`] and the
//! [`Constructor`] function type stored in registries.

use sha2::{Digest, Sha256};

use crate::props::{html_escape, Props};

/// A renderable UI component.
pub trait Component: Send + Sync {
    /// Stable component name (e.g., "dark-mode-switch").
    fn name(&self) -> &'static str;

    /// Render the component to HTML.
    fn render(&self) -> String;
}

/// Constructs a component instance from its mount props.
///
/// Construction is infallible: components take the props they understand and
/// ignore the rest.
pub type Constructor = fn(Props) -> Box<dyn Component>;

/// Derive the registry hash for a component.
///
/// Hashes are content identities, not names: the same component name in two
/// bundle versions hashes differently, so a page built against one bundle
/// never silently picks up another's implementation. The digest is truncated
/// to 16 hex characters, plenty for registries of this size.
pub fn component_hash(name: &str, version: &str) -> String {
    let digest = Sha256::digest(format!("{name}@{version}").as_bytes());
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// Render a custom element with attributes drawn from `props`.
///
/// The shared shape for standard components: every prop becomes an attribute
/// so the exact mount props survive into the output.
pub fn render_element(tag: &str, props: &Props, children: Option<&str>) -> String {
    let attrs = props.to_attributes(&[]);
    match children {
        Some(inner) => format!("<{tag}{attrs}>{inner}</{tag}>"),
        None => format!("<{tag}{attrs}></{tag}>"),
    }
}

/// Escape text for use inside an element body.
pub fn text(content: &str) -> String {
    html_escape(content)
}
