//! The standard component set shipped with every bundle.
//!
//! These are the enhancement widgets documentation pages mount by default.
//! Each renders an inert custom element carrying its mount props as
//! attributes; page scripts and stylesheets give the elements behavior.

use serde_json::Value;

use crate::component::{render_element, text, Component, Constructor};
use crate::props::{html_escape, Props};

/// Name and constructor for every standard component, in bundle order.
pub const STANDARD: [(&str, Constructor); 7] = [
    ("toc-prevnext", |props| Box::new(TocPrevNext::new(props))),
    ("collapse-control", |props| {
        Box::new(CollapseControl::new(props))
    }),
    ("github-search", |props| Box::new(GithubSearch::new(props))),
    ("toc-toggle", |props| Box::new(TocToggle::new(props))),
    ("dark-mode-switch", |props| {
        Box::new(DarkModeSwitch::new(props))
    }),
    ("config-transport", |props| {
        Box::new(ConfigTransport::new(props))
    }),
    ("tab-selector", |props| Box::new(TabSelector::new(props))),
];

/// Previous/next page navigation rendered at the bottom of a page.
///
/// Expects `prev` and `next` props of the form `{"title": ..., "url": ...}`.
/// Either side may be absent (first and last pages).
#[derive(Debug)]
pub struct TocPrevNext {
    props: Props,
}

impl TocPrevNext {
    pub fn new(props: Props) -> Self {
        Self { props }
    }

    fn link(&self, key: &str, rel: &str) -> Option<String> {
        let entry = self.props.get(key)?;
        let title = entry.get("title").and_then(Value::as_str)?;
        let url = entry.get("url").and_then(Value::as_str)?;

        Some(format!(
            r#"<a rel="{rel}" href="{}">{}</a>"#,
            html_escape(url),
            text(title)
        ))
    }
}

impl Component for TocPrevNext {
    fn name(&self) -> &'static str {
        "toc-prevnext"
    }

    fn render(&self) -> String {
        let mut children = String::new();
        if let Some(link) = self.link("prev", "prev") {
            children.push_str(&link);
        }
        if let Some(link) = self.link("next", "next") {
            children.push_str(&link);
        }

        let attrs = self.props.to_attributes(&["prev", "next"]);
        format!("<folio-toc-prevnext{attrs}>{children}</folio-toc-prevnext>")
    }
}

/// Expand/collapse control for long navigation trees.
#[derive(Debug)]
pub struct CollapseControl {
    props: Props,
}

impl CollapseControl {
    pub fn new(props: Props) -> Self {
        Self { props }
    }
}

impl Component for CollapseControl {
    fn name(&self) -> &'static str {
        "collapse-control"
    }

    fn render(&self) -> String {
        render_element("folio-collapse-control", &self.props, None)
    }
}

/// Search box backed by the GitHub code search API.
#[derive(Debug)]
pub struct GithubSearch {
    props: Props,
}

impl GithubSearch {
    pub fn new(props: Props) -> Self {
        Self { props }
    }
}

impl Component for GithubSearch {
    fn name(&self) -> &'static str {
        "github-search"
    }

    fn render(&self) -> String {
        render_element("folio-github-search", &self.props, None)
    }
}

/// Button that shows or hides the table-of-contents panel.
#[derive(Debug)]
pub struct TocToggle {
    props: Props,
}

impl TocToggle {
    pub fn new(props: Props) -> Self {
        Self { props }
    }
}

impl Component for TocToggle {
    fn name(&self) -> &'static str {
        "toc-toggle"
    }

    fn render(&self) -> String {
        render_element("folio-toc-toggle", &self.props, None)
    }
}

/// Light/dark theme switch.
#[derive(Debug)]
pub struct DarkModeSwitch {
    props: Props,
}

impl DarkModeSwitch {
    pub fn new(props: Props) -> Self {
        Self { props }
    }
}

impl Component for DarkModeSwitch {
    fn name(&self) -> &'static str {
        "dark-mode-switch"
    }

    fn render(&self) -> String {
        render_element("folio-dark-mode-switch", &self.props, None)
    }
}

/// Embeds site configuration as JSON for page scripts to read.
///
/// Renders a data script rather than a visible element. The payload is the
/// raw prop bag with `<` escaped so it can never terminate the script early.
#[derive(Debug)]
pub struct ConfigTransport {
    props: Props,
}

impl ConfigTransport {
    pub fn new(props: Props) -> Self {
        Self { props }
    }
}

impl Component for ConfigTransport {
    fn name(&self) -> &'static str {
        "config-transport"
    }

    fn render(&self) -> String {
        let payload = serde_json::to_string(&self.props.to_value())
            .unwrap_or_else(|_| "{}".to_string())
            .replace('<', "\\u003c");
        format!(r#"<script type="application/json" data-folio-config>{payload}</script>"#)
    }
}

/// Tab strip for switching between alternative content blocks.
#[derive(Debug)]
pub struct TabSelector {
    props: Props,
}

impl TabSelector {
    pub fn new(props: Props) -> Self {
        Self { props }
    }
}

impl Component for TabSelector {
    fn name(&self) -> &'static str {
        "tab-selector"
    }

    fn render(&self) -> String {
        render_element("folio-tab-selector", &self.props, None)
    }
}
