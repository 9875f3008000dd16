//! Tag entity.

/// A recipe tag. Reference data, not mutated by normal traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}
