//! Seeding rules for reader preferences.
//!
//! First-visit defaults live here. Each rule decides whether a preference
//! key should be seeded for the current session and writes a sentinel value
//! if so. Rules only ever fill in absent keys; a stored value records a
//! choice (the reader's or an earlier session's) and is never overwritten.

use crate::store::{PreferenceStore, StoreError};
use crate::viewport::{MediaQuery, Viewport};

/// Preference key for the table-of-contents panel state.
pub const TOC_ACTIVE_KEY: &str = "folio.toc-active";

/// Sentinel written when a preference is seeded. Consumers key on the
/// presence of the entry, not this value.
pub const SEEDED: &str = "true";

/// Viewports at least this wide get the table of contents opened by default.
pub const DESKTOP_MIN_WIDTH: u32 = 800;

/// Seed the table-of-contents preference to "open" on desktop-sized viewports.
///
/// On viewports narrower than [`DESKTOP_MIN_WIDTH`] the store is not touched
/// at all. On desktop viewports the sentinel is written only when the key is
/// absent; sessions sharing a store race safely because the check and the
/// write happen atomically. Returns `Ok(true)` when this call created the
/// entry.
pub fn open_toc_on_desktop(
    viewport: Viewport,
    store: &dyn PreferenceStore,
) -> Result<bool, StoreError> {
    if !viewport.matches(MediaQuery::MinWidth(DESKTOP_MIN_WIDTH)) {
        return Ok(false);
    }

    let seeded = store.set_if_absent(TOC_ACTIVE_KEY, SEEDED)?;
    if seeded {
        tracing::debug!(key = TOC_ACTIVE_KEY, "seeded preference for desktop viewport");
    }
    Ok(seeded)
}
