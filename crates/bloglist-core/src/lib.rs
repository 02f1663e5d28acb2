//! Bloglist core types and list aggregation helpers.
//!
//! Everything in this crate is pure: records come in as read-only slices and
//! summaries come out as freshly allocated values.

pub mod list_helper;
pub mod record;

pub use list_helper::{
    dummy, favorite_blog, most_blogs, most_likes, total_likes, AuthorBlogs, AuthorLikes,
    FavoriteBlog,
};
pub use record::BlogRecord;
