//! Unique identifiers for staged downloads.

use uuid::Uuid;

/// Produces fresh unique identifiers.
pub trait IdProvider {
    /// Returns an identifier never returned before.
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdProvider for F
where
    F: Fn() -> String,
{
    fn next_id(&self) -> String {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_provider_is_unique() {
        let ids = UuidProvider;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_closure_provider() {
        let ids = || "fixed".to_string();
        assert_eq!(ids.next_id(), "fixed");
    }
}
