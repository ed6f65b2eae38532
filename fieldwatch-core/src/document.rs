//! Typed document field sets.

/// A record type with a known set of top-level fields.
///
/// Usually derived with `#[derive(Document)]`, which lists the serialized
/// field names (honoring `#[serde(rename)]` and `#[serde(skip)]`).
///
/// Handler maps built with `FieldHandlers::for_document::<D>()` reject
/// handlers for fields `D` does not declare.
pub trait Document {
    /// The document type name, used in error messages.
    const NAME: &'static str;

    /// The serialized names of the document's fields.
    const FIELDS: &'static [&'static str];

    /// Whether `field` is one of the document's fields.
    fn has_field(field: &str) -> bool {
        Self::FIELDS.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct User;

    impl Document for User {
        const NAME: &'static str = "User";
        const FIELDS: &'static [&'static str] = &["name", "age"];
    }

    #[test]
    fn test_has_field() {
        assert!(User::has_field("name"));
        assert!(!User::has_field("email"));
    }
}
