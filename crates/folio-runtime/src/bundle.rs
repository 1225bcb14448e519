//! Bundles and the runtime that loads them.
//!
//! A bundle is what a site ships to enhance its pages: a component registry
//! plus the init hooks those components rely on. The [`Runtime`] holds every
//! loaded bundle, layering their registries so later bundles win hash
//! conflicts, and drives the per-page session: hooks first, then hydration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::{component_hash, Constructor};
use crate::dispatch::{hydrate, HydrateReport};
use crate::hooks::{default_hooks, run_hooks, NamedHook, SessionContext, SiteInfo};
use crate::page::PageDocument;
use crate::registry::{ComponentRegistry, RegistryStack};
use crate::standard::STANDARD;
use crate::store::PreferenceStore;
use crate::viewport::Viewport;

/// Version stamped into standard component hashes.
pub const BUNDLE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A deployable set of components and init hooks.
#[derive(Debug)]
pub struct Bundle {
    name: String,
    version: String,
    registry: ComponentRegistry,
    hooks: Vec<NamedHook>,
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registry: ComponentRegistry::new(),
            hooks: Vec::new(),
        }
    }

    /// The standard bundle: every stock component under its derived hash,
    /// plus the default init hooks.
    pub fn standard() -> Self {
        let mut bundle = Self::new("folio-standard", BUNDLE_VERSION);
        for (name, constructor) in STANDARD {
            bundle.register_component(name, constructor);
        }
        bundle.hooks = default_hooks();
        bundle
    }

    /// Register a component under the hash derived from its name and this
    /// bundle's version.
    pub fn register_component(&mut self, name: &str, constructor: Constructor) -> &mut Self {
        let hash = component_hash(name, &self.version);
        self.registry.register(hash, name, constructor);
        self
    }

    /// Register a component under an explicit hash.
    pub fn register_component_with_hash(
        &mut self,
        hash: impl Into<String>,
        name: impl Into<String>,
        constructor: Constructor,
    ) -> &mut Self {
        self.registry.register(hash, name, constructor);
        self
    }

    /// Append an init hook.
    pub fn with_hook(mut self, hook: NamedHook) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Snapshot of the bundle's identity and component table.
    pub fn manifest(&self) -> BundleManifest {
        BundleManifest {
            bundle: self.name.clone(),
            version: self.version.clone(),
            components: self
                .registry
                .entries()
                .map(|(hash, entry)| (hash.to_string(), entry.name.clone()))
                .collect(),
        }
    }
}

/// Serialized description of a loaded bundle, emitted next to built sites so
/// page authors can see which hashes resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleManifest {
    pub bundle: String,
    pub version: String,

    /// Component hash to component name, sorted by hash.
    pub components: BTreeMap<String, String>,
}

/// The loaded-bundle runtime driving page sessions.
#[derive(Debug, Default)]
pub struct Runtime {
    stack: RegistryStack,
    hooks: Vec<NamedHook>,
    manifests: Vec<BundleManifest>,
}

impl Runtime {
    /// A runtime with no bundles loaded. Sessions on it are no-ops.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime with the standard bundle already loaded.
    pub fn with_standard() -> Self {
        let mut runtime = Self::new();
        runtime.load(Bundle::standard());
        runtime
    }

    /// Load a bundle: its registry becomes the newest resolution layer and
    /// its hooks run after those already registered.
    pub fn load(&mut self, bundle: Bundle) {
        tracing::debug!(
            bundle = %bundle.name,
            version = %bundle.version,
            components = bundle.registry.len(),
            "loading bundle"
        );
        self.manifests.push(bundle.manifest());
        self.stack.push(bundle.registry);
        self.hooks.extend(bundle.hooks);
    }

    /// Append hooks outside any bundle (configured extras, dev-only hooks).
    pub fn append_hooks(&mut self, hooks: Vec<NamedHook>) {
        self.hooks.extend(hooks);
    }

    /// Run every registered init hook once for this session.
    pub fn initialize(&self, ctx: &mut SessionContext) {
        run_hooks(&self.hooks, ctx);
    }

    /// Mount every placeholder the loaded bundles recognize.
    pub fn hydrate(&self, doc: &mut PageDocument) -> HydrateReport {
        hydrate(doc, &self.stack)
    }

    /// One full page session: init hooks, then hydration.
    pub fn enhance(
        &self,
        doc: &mut PageDocument,
        viewport: Viewport,
        store: &dyn PreferenceStore,
        site: &SiteInfo,
    ) -> HydrateReport {
        let mut ctx = SessionContext {
            viewport,
            store,
            doc: &mut *doc,
            site,
        };
        self.initialize(&mut ctx);
        self.hydrate(doc)
    }

    /// Manifests of loaded bundles, in load order.
    pub fn manifests(&self) -> &[BundleManifest] {
        &self.manifests
    }

    pub fn stack(&self) -> &RegistryStack {
        &self.stack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::props::Props;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_bundle_registers_every_stock_component() {
        let bundle = Bundle::standard();
        let manifest = bundle.manifest();

        assert_eq!(manifest.components.len(), 7);
        for (name, _) in STANDARD {
            let hash = component_hash(name, BUNDLE_VERSION);
            assert_eq!(manifest.components.get(&hash), Some(&name.to_string()));
        }
    }

    #[test]
    fn later_bundles_shadow_earlier_hashes() {
        struct Replacement;

        impl Component for Replacement {
            fn name(&self) -> &'static str {
                "toc-toggle"
            }

            fn render(&self) -> String {
                "<custom-toggle></custom-toggle>".to_string()
            }
        }

        let mut custom = Bundle::new("site-overrides", BUNDLE_VERSION);
        custom.register_component_with_hash(
            component_hash("toc-toggle", BUNDLE_VERSION),
            "toc-toggle",
            |_| Box::new(Replacement),
        );

        let mut runtime = Runtime::with_standard();
        runtime.load(custom);

        let hash = component_hash("toc-toggle", BUNDLE_VERSION);
        let entry = runtime.stack().resolve(&hash).unwrap();
        let rendered = (entry.constructor)(Props::new()).render();

        assert_eq!(rendered, "<custom-toggle></custom-toggle>");
    }

    #[test]
    fn enhance_runs_hooks_then_mounts() {
        let hash = component_hash("dark-mode-switch", BUNDLE_VERSION);
        let page = format!(
            r#"<html><head></head><body><script type="application/folio" id="f1" data-component="{hash}">{{}}</script></body></html>"#
        );

        let mut doc = PageDocument::parse(&page);
        let store = MemoryStore::new();
        let runtime = Runtime::with_standard();

        let report = runtime.enhance(
            &mut doc,
            Viewport::default(),
            &store,
            &SiteInfo::default(),
        );

        assert_eq!(report.mounted, 1);
        let html = doc.to_html();
        assert!(html.contains(r#"href="/assets/theme-slate.css""#));
        assert!(html.contains(r#"<body class="folio-smooth">"#));
        assert!(html.contains("<folio-dark-mode-switch></folio-dark-mode-switch>"));
    }

    #[test]
    fn manifest_serializes_sorted_by_hash() {
        let manifest = Bundle::standard().manifest();
        let json = serde_json::to_string_pretty(&manifest).unwrap();

        let hashes: Vec<&String> = manifest.components.keys().collect();
        let mut sorted = hashes.clone();
        sorted.sort();

        assert_eq!(hashes, sorted);
        assert!(json.contains("\"bundle\": \"folio-standard\""));
    }

    #[test]
    fn empty_runtime_sessions_are_no_ops() {
        let page = r#"<script type="application/folio" id="f1" data-component="abcd">{}</script>"#;
        let mut doc = PageDocument::parse(page);
        let store = MemoryStore::new();
        let runtime = Runtime::new();

        let report = runtime.enhance(
            &mut doc,
            Viewport::default(),
            &store,
            &SiteInfo::default(),
        );

        assert_eq!(
            report,
            HydrateReport {
                mounted: 0,
                unmatched: 1,
                failed: 0
            }
        );
    }
}
