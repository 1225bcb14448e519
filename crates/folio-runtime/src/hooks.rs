//! Initialization hooks run once per page session.
//!
//! Hooks are the part of a bundle that runs before any component mounts:
//! seeding preferences, injecting theme assets, tagging the body for CSS.
//! Each hook is isolated; a failing hook is logged and skipped so the rest
//! of initialization still happens.

use crate::page::PageDocument;
use crate::prefs::open_toc_on_desktop;
use crate::store::{PreferenceStore, StoreError};
use crate::viewport::Viewport;

/// Route the dev server serves the live-reload client from. The
/// `reload-on-change` hook references it from injected pages.
pub const RELOAD_SCRIPT_PATH: &str = "/__folio.js";

/// Site-level context exposed to hooks.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    /// Theme name, resolved to `assets/theme-<name>.css`.
    pub theme: String,

    /// URL prefix the site is served under.
    pub namespace: String,

    /// Base title documents append to their own.
    pub title_base: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            theme: "slate".to_string(),
            namespace: "/".to_string(),
            title_base: "Documentation".to_string(),
        }
    }
}

/// Everything a hook may touch during one page session.
pub struct SessionContext<'a> {
    pub viewport: Viewport,
    pub store: &'a dyn PreferenceStore,
    pub doc: &'a mut PageDocument,
    pub site: &'a SiteInfo,
}

/// Errors surfaced by hooks.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Hook failed: {0}")]
    Failed(String),
}

/// An initialization hook.
pub type HookFn = fn(&mut SessionContext) -> Result<(), HookError>;

/// A hook with the name it was registered under.
#[derive(Debug, Clone)]
pub struct NamedHook {
    pub name: String,
    pub run: HookFn,
}

impl NamedHook {
    pub fn new(name: impl Into<String>, run: HookFn) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }
}

/// Look up a built-in hook by its configuration name.
pub fn builtin_hook(name: &str) -> Option<HookFn> {
    match name {
        "install-theme" => Some(install_theme),
        "smooth-loading" => Some(smooth_loading),
        "toc-default-open" => Some(toc_default_open),
        "reload-on-change" => Some(reload_on_change),
        _ => None,
    }
}

/// Hooks every bundle starts with.
pub fn default_hooks() -> Vec<NamedHook> {
    vec![
        NamedHook::new("install-theme", install_theme),
        NamedHook::new("smooth-loading", smooth_loading),
    ]
}

/// Resolve configured hook names to built-ins, skipping unknown names.
pub fn resolve_hooks(names: &[String]) -> Vec<NamedHook> {
    names
        .iter()
        .filter_map(|name| match builtin_hook(name) {
            Some(run) => Some(NamedHook::new(name, run)),
            None => {
                tracing::warn!(hook = %name, "unknown init hook in configuration; skipping");
                None
            }
        })
        .collect()
}

/// Run hooks in order, isolating failures.
///
/// Returns how many hooks failed. A failure never stops the hooks after it.
pub fn run_hooks(hooks: &[NamedHook], ctx: &mut SessionContext) -> usize {
    let mut failures = 0;
    for hook in hooks {
        if let Err(e) = (hook.run)(ctx) {
            tracing::warn!(hook = %hook.name, error = %e, "init hook failed; continuing");
            failures += 1;
        }
    }
    failures
}

/// Link the configured theme stylesheet into the page head.
fn install_theme(ctx: &mut SessionContext) -> Result<(), HookError> {
    let href = format!(
        "{}/assets/theme-{}.css",
        ctx.site.namespace.trim_end_matches('/'),
        ctx.site.theme
    );
    ctx.doc
        .inject_head(&format!(r#"<link rel="stylesheet" href="{href}">"#));
    Ok(())
}

/// Tag the body so the theme can fade content in once fonts are ready.
fn smooth_loading(ctx: &mut SessionContext) -> Result<(), HookError> {
    ctx.doc.add_body_class("folio-smooth");
    Ok(())
}

/// Seed the table-of-contents preference to open on desktop viewports.
fn toc_default_open(ctx: &mut SessionContext) -> Result<(), HookError> {
    open_toc_on_desktop(ctx.viewport, ctx.store)?;
    Ok(())
}

/// Inject the live-reload client during `folio dev`.
fn reload_on_change(ctx: &mut SessionContext) -> Result<(), HookError> {
    ctx.doc
        .inject_head(&format!(r#"<script src="{RELOAD_SCRIPT_PATH}" defer></script>"#));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{SEEDED, TOC_ACTIVE_KEY};
    use crate::store::MemoryStore;

    fn context<'a>(
        store: &'a MemoryStore,
        doc: &'a mut PageDocument,
        site: &'a SiteInfo,
    ) -> SessionContext<'a> {
        SessionContext {
            viewport: Viewport::new(1280, 800),
            store,
            doc,
            site,
        }
    }

    #[test]
    fn builtin_lookup_knows_all_shipped_hooks() {
        for name in [
            "install-theme",
            "smooth-loading",
            "toc-default-open",
            "reload-on-change",
        ] {
            assert!(builtin_hook(name).is_some(), "missing builtin: {name}");
        }
        assert!(builtin_hook("does-not-exist").is_none());
    }

    #[test]
    fn unknown_names_are_skipped_during_resolution() {
        let hooks = resolve_hooks(&[
            "toc-default-open".to_string(),
            "definitely-not-real".to_string(),
        ]);

        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].name, "toc-default-open");
    }

    #[test]
    fn failing_hook_does_not_stop_later_hooks() {
        fn boom(_: &mut SessionContext) -> Result<(), HookError> {
            Err(HookError::Failed("boom".to_string()))
        }

        let store = MemoryStore::new();
        let mut doc = PageDocument::parse("<head></head><body></body>");
        let site = SiteInfo::default();
        let mut ctx = context(&store, &mut doc, &site);

        let hooks = vec![
            NamedHook::new("boom", boom),
            NamedHook::new("toc-default-open", toc_default_open),
        ];
        let failures = run_hooks(&hooks, &mut ctx);

        assert_eq!(failures, 1);
        assert_eq!(
            store.get(TOC_ACTIVE_KEY).unwrap(),
            Some(SEEDED.to_string())
        );
    }

    #[test]
    fn install_theme_links_the_stylesheet_under_the_namespace() {
        let store = MemoryStore::new();
        let mut doc = PageDocument::parse("<head><title>x</title></head>");
        let site = SiteInfo {
            theme: "slate".to_string(),
            namespace: "/docs".to_string(),
            title_base: "Folio Docs".to_string(),
        };
        let mut ctx = context(&store, &mut doc, &site);

        install_theme(&mut ctx).unwrap();

        assert!(doc
            .to_html()
            .contains(r#"<link rel="stylesheet" href="/docs/assets/theme-slate.css">"#));
    }

    #[test]
    fn root_namespace_does_not_double_the_slash() {
        let store = MemoryStore::new();
        let mut doc = PageDocument::parse("<head></head>");
        let site = SiteInfo::default();
        let mut ctx = context(&store, &mut doc, &site);

        install_theme(&mut ctx).unwrap();

        assert!(doc.to_html().contains(r#"href="/assets/theme-slate.css""#));
    }

    #[test]
    fn smooth_loading_tags_the_body() {
        let store = MemoryStore::new();
        let mut doc = PageDocument::parse("<body><p>x</p></body>");
        let site = SiteInfo::default();
        let mut ctx = context(&store, &mut doc, &site);

        smooth_loading(&mut ctx).unwrap();

        assert!(doc.to_html().contains(r#"<body class="folio-smooth">"#));
    }

    #[test]
    fn reload_hook_injects_the_client_script() {
        let store = MemoryStore::new();
        let mut doc = PageDocument::parse("<head></head><body></body>");
        let site = SiteInfo::default();
        let mut ctx = context(&store, &mut doc, &site);

        reload_on_change(&mut ctx).unwrap();

        assert!(doc
            .to_html()
            .contains(r#"<script src="/__folio.js" defer></script>"#));
    }
}
