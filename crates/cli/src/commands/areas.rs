//! Content area listing.

use cms_admin_core::{AreaKind, ContentArea};

/// Log every content area, grouped by kind.
pub fn list() {
    for (kind, heading) in [
        (AreaKind::Section, "Editable sections"),
        (AreaKind::Listing, "Inbound listings"),
    ] {
        tracing::info!("{heading}:");
        for area in ContentArea::of_kind(kind) {
            tracing::info!(
                "  {:<18} {:<22} /{}",
                area.slug(),
                area.title(),
                area.api_path().trim_start_matches('/')
            );
        }
    }
}
