//! Client bundle runtime for generated documentation sites.
//!
//! This crate is the part of folio that runs "inside" a page: it seeds
//! first-visit reader preferences, resolves component mount placeholders
//! against the loaded bundles, and swaps rendered components into the page.
//! It knows nothing about files or servers; those live in `folio-static`
//! and `folio-server`.

pub mod bundle;
pub mod component;
pub mod dispatch;
pub mod hooks;
pub mod page;
pub mod prefs;
pub mod props;
pub mod registry;
pub mod standard;
pub mod store;
pub mod viewport;

pub use bundle::{Bundle, BundleManifest, Runtime, BUNDLE_VERSION};
pub use component::{component_hash, Component, Constructor};
pub use dispatch::{dispatch, hydrate, DispatchError, DispatchOutcome, HydrateReport};
pub use hooks::{
    builtin_hook, default_hooks, resolve_hooks, run_hooks, HookError, HookFn, NamedHook,
    SessionContext, SiteInfo, RELOAD_SCRIPT_PATH,
};
pub use page::{PageDocument, PageError, Placeholder, Segment};
pub use prefs::{open_toc_on_desktop, DESKTOP_MIN_WIDTH, SEEDED, TOC_ACTIVE_KEY};
pub use props::Props;
pub use registry::{ComponentRegistry, RegistryEntry, RegistryStack};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError};
pub use viewport::{MediaQuery, Viewport};
