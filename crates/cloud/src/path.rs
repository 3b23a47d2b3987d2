//! Object path generation.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the random suffix in generated paths.
const RANDOM_SUFFIX_LEN: usize = 12;

/// Generate a collision-resistant object path:
/// `{unix_millis}-{random}.{extension}`.
///
/// Collision probability is negligible but not cryptographically
/// guaranteed; paths are per-submission names, not security tokens. The
/// store refuses overwrites, so the unlikely collision fails loudly.
pub fn object_path(extension: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{millis}-{suffix}.{extension}")
}
