//! Shareable viewer links.

/// Build the canonical viewer URL for a created card: `{origin}/card/{id}`.
///
/// The id is taken as-is; it is a byproduct of a successful create and
/// needs no validation beyond presence. A trailing slash on the origin is
/// tolerated.
pub fn build_viewer_link(base_origin: &str, card_id: &str) -> String {
    format!("{}/card/{}", base_origin.trim_end_matches('/'), card_id)
}
