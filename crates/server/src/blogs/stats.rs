use bloglist_core::{AuthorBlogs, AuthorLikes, BlogRecord, FavoriteBlog};
use serde::{Deserialize, Serialize};

/// Summary of every stored blog, computed by the list helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    pub fn from_records(records: &[BlogRecord]) -> Self {
        Self {
            total_likes: bloglist_core::total_likes(records),
            favorite_blog: bloglist_core::favorite_blog(records),
            most_blogs: bloglist_core::most_blogs(records),
            most_likes: bloglist_core::most_likes(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_serialize_as_null() {
        let stats = BlogStats::from_records(&[]);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalLikes"], 0);
        assert!(value["favoriteBlog"].is_null());
        assert!(value["mostBlogs"].is_null());
        assert!(value["mostLikes"].is_null());
    }

    #[test]
    fn test_stats_from_records() {
        let records = vec![
            BlogRecord::new("A", "X", "u", 5),
            BlogRecord::new("B", "X", "u", 10),
            BlogRecord::new("C", "Y", "u", 12),
        ];
        let stats = BlogStats::from_records(&records);
        assert_eq!(stats.total_likes, 27);
        assert_eq!(stats.favorite_blog.unwrap().title, "C");
        assert_eq!(stats.most_blogs.unwrap().author, "X");
        assert_eq!(stats.most_likes.unwrap().likes, 15);
    }
}
