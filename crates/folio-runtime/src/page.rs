//! Page documents and the mount placeholder protocol.
//!
//! Generated pages carry inert placeholder elements where components should
//! mount:
//!
//! ```html
//! <script type="application/folio" id="f2" data-component="93b1c077e9f2aa68">
//! {"user": "octocat", "repo": "hello-world"}
//! </script>
//! ```
//!
//! A parsed page is a sequence of segments: literal markup interleaved with
//! placeholders. Mounting inserts rendered output immediately after the
//! placeholder and removes the placeholder itself; unmatched placeholders
//! survive serialization byte-for-byte so a later pass can still claim them.

use std::sync::LazyLock;

use regex::Regex;

use crate::props::Props;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<script\s+type="application/folio"\s+id="([^"]+)"\s+data-component="([^"]+)"\s*>(.*?)</script>"#,
    )
    .expect("Invalid placeholder regex")
});

static BODY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<body\b[^>]*>").expect("Invalid body tag regex"));

static BODY_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class\s*=\s*"([^"]*)""#).expect("Invalid class attr regex"));

/// Errors from page mutations.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("No placeholder with id: {id}")]
    TargetMissing { id: String },
}

/// One piece of a parsed page.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal markup, emitted unchanged.
    Markup(String),

    /// A component mount point.
    Placeholder(Placeholder),
}

/// A mount placeholder extracted from the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Element id, unique within the page.
    pub id: String,

    /// Component hash to resolve against loaded registries.
    pub component: String,

    /// Mount props parsed from the element body.
    pub props: Props,

    /// Original markup, kept so unmatched placeholders serialize unchanged.
    raw: String,
}

/// A parsed page: markup segments interleaved with mount placeholders.
#[derive(Debug, Clone)]
pub struct PageDocument {
    segments: Vec<Segment>,
}

impl PageDocument {
    /// Parse page markup, extracting mount placeholders.
    ///
    /// A placeholder whose props are not valid JSON is logged and kept as
    /// literal markup; one broken mount never takes down the page.
    pub fn parse(html: &str) -> Self {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in PLACEHOLDER_RE.captures_iter(html) {
            let Some(whole) = caps.get(0) else { continue };

            if whole.start() > cursor {
                segments.push(Segment::Markup(html[cursor..whole.start()].to_string()));
            }
            cursor = whole.end();

            let id = caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string();
            let component = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
            let body = caps.get(3).map(|m| m.as_str()).unwrap_or("");

            match Props::parse(body) {
                Ok(props) => segments.push(Segment::Placeholder(Placeholder {
                    id,
                    component,
                    props,
                    raw: whole.as_str().to_string(),
                })),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "placeholder props are not valid JSON; leaving element as-is");
                    segments.push(Segment::Markup(whole.as_str().to_string()));
                }
            }
        }

        if cursor < html.len() {
            segments.push(Segment::Markup(html[cursor..].to_string()));
        }

        Self { segments }
    }

    /// Remaining mount placeholders, in document order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Markup(_) => None,
        })
    }

    /// Find a placeholder by element id.
    pub fn find_placeholder(&self, id: &str) -> Option<&Placeholder> {
        self.placeholders().find(|p| p.id == id)
    }

    /// Mount rendered output at the placeholder with the given id.
    ///
    /// The output is inserted immediately after the placeholder, then the
    /// placeholder is removed.
    pub fn mount(&mut self, id: &str, rendered: &str) -> Result<(), PageError> {
        let index = self
            .segments
            .iter()
            .position(|s| matches!(s, Segment::Placeholder(p) if p.id == id))
            .ok_or_else(|| PageError::TargetMissing { id: id.to_string() })?;

        self.segments
            .insert(index + 1, Segment::Markup(rendered.to_string()));
        self.segments.remove(index);
        Ok(())
    }

    /// Insert a fragment just before `</head>`.
    ///
    /// Pages without a head (fragments, test fixtures) get the fragment
    /// prepended instead so it still ships.
    pub fn inject_head(&mut self, fragment: &str) {
        for segment in &mut self.segments {
            let Segment::Markup(html) = segment else { continue };
            if let Some(pos) = html.find("</head>") {
                html.insert_str(pos, &format!("{fragment}\n"));
                return;
            }
        }

        self.segments
            .insert(0, Segment::Markup(format!("{fragment}\n")));
    }

    /// Add a class to the `<body>` tag, if the page has one.
    pub fn add_body_class(&mut self, class: &str) {
        for segment in &mut self.segments {
            let Segment::Markup(html) = segment else { continue };
            let Some(tag_match) = BODY_TAG_RE.find(html) else {
                continue;
            };

            let range = tag_match.range();
            let tag = tag_match.as_str().to_string();

            let updated = if let Some(caps) = BODY_CLASS_RE.captures(&tag) {
                let existing = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                if existing.split_whitespace().any(|c| c == class) {
                    return;
                }
                tag.replace(&caps[0], &format!(r#"class="{existing} {class}""#))
            } else {
                format!(r#"{} class="{class}">"#, &tag[..tag.len() - 1])
            };

            html.replace_range(range, &updated);
            return;
        }

        tracing::debug!(class, "page has no <body> tag; class not added");
    }

    /// Serialize the page back to markup.
    ///
    /// Unmatched placeholders are emitted exactly as they were parsed.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Markup(s) => out.push_str(s),
                Segment::Placeholder(p) => out.push_str(&p.raw),
            }
        }
        out
    }
}
