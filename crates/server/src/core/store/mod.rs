//! Blog storage
//!
//! One JSON document per blog, cached in memory.

pub mod json_store;

pub use json_store::JsonBlogStore;
