//! Identifier generation for manifest records.

use uuid::Uuid;

/// Generate a fresh random (v4) identifier.
///
/// The manifest needs two of these per pack, one for the header and one for
/// the `skin_pack` module. The two values are unrelated.
pub fn new_id() -> Uuid {
    let id = Uuid::new_v4();
    tracing::debug!("generated uuid {id}");
    id
}
