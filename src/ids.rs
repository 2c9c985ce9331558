//! Identifier generation for plans and their entities

/// Generate a fresh identifier for a new plan or entity.
///
/// A random 128-bit value rendered as 32 lowercase hex characters. Callers only
/// rely on it being unique within the collection it is inserted into.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
