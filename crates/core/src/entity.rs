//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record kept by the service is identified by a natural key taken from
/// its own fields (a user's name, a blog's title). Keys are compared exactly:
/// case-sensitive, no trimming.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Human-readable kind name, used in messages ("user", "blog").
    fn kind() -> &'static str;
}
