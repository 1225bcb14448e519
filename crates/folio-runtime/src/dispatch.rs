//! Mount dispatch: resolving placeholders against loaded bundles.
//!
//! Every mount request carries a target element id, a component hash, and a
//! prop bag. Dispatch resolves the hash against the registry stack; a hit
//! renders the component into the page, a miss leaves the placeholder alone
//! for whoever does know the hash. A miss is the designed fallthrough path,
//! so it produces an outcome, not an error.

use crate::page::{PageDocument, PageError};
use crate::props::Props;
use crate::registry::RegistryStack;

/// What a single dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A bundle claimed the hash; output is mounted and the placeholder is gone.
    Mounted,

    /// No loaded bundle knows the hash; the page is untouched.
    Unmatched,
}

/// Errors from a dispatch that did match.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Page(#[from] PageError),
}

/// Totals from hydrating one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrateReport {
    /// Placeholders rendered and replaced.
    pub mounted: usize,

    /// Placeholders no loaded bundle recognized.
    pub unmatched: usize,

    /// Matched placeholders whose mount failed.
    pub failed: usize,
}

/// Dispatch one mount request against the registry stack.
///
/// The constructor receives the props exactly as given; dispatch adds,
/// removes, and reorders nothing.
pub fn dispatch(
    doc: &mut PageDocument,
    stack: &RegistryStack,
    id: &str,
    hash: &str,
    props: Props,
) -> Result<DispatchOutcome, DispatchError> {
    let Some(entry) = stack.resolve(hash) else {
        tracing::debug!(id, hash, "no loaded bundle claims this component hash");
        return Ok(DispatchOutcome::Unmatched);
    };

    let component = (entry.constructor)(props);
    let rendered = component.render();
    doc.mount(id, &rendered)?;

    tracing::debug!(component = %entry.name, id, "mounted component");
    Ok(DispatchOutcome::Mounted)
}

/// Dispatch every placeholder on the page.
///
/// Failures are isolated per mount: one bad placeholder is logged and
/// counted, and the rest of the page still hydrates.
pub fn hydrate(doc: &mut PageDocument, stack: &RegistryStack) -> HydrateReport {
    let pending: Vec<(String, String, Props)> = doc
        .placeholders()
        .map(|p| (p.id.clone(), p.component.clone(), p.props.clone()))
        .collect();

    let mut report = HydrateReport::default();
    for (id, hash, props) in pending {
        match dispatch(doc, stack, &id, &hash, props) {
            Ok(DispatchOutcome::Mounted) => report.mounted += 1,
            Ok(DispatchOutcome::Unmatched) => report.unmatched += 1,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "mount failed; skipping placeholder");
                report.failed += 1;
            }
        }
    }
    report
}
