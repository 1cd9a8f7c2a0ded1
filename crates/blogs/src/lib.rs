//! Blogs domain module (blog posts keyed by title).
//!
//! Pure domain logic: the blog record, its validation rules and the posts the
//! service starts with.

pub mod blog;

pub use blog::{Blog, seed_blogs, validate_blog};
