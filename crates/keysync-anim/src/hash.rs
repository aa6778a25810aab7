//! Scene content hashing.

use crate::error::AnimResult;
use crate::scene::Scene;

/// Computes the BLAKE3 hash of a scene's canonical JSON form.
///
/// Curves and channels serialize in sorted order, and going through
/// `serde_json::Value` sorts every object key, so equal scenes always hash
/// equally.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn scene_hash(scene: &Scene) -> AnimResult<String> {
    let value = serde_json::to_value(scene)?;
    let canonical = serde_json::to_string(&value)?;
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}
