//! Summary statistics over a list of blogs.
//!
//! Every helper that picks a "best" entry breaks ties by input order: the
//! first blog, or the first author to appear, wins. Empty input yields `None`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::BlogRecord;

/// Projection of the most liked blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: u64,
}

/// Author with the most blogs, and how many they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: u64,
}

/// Author whose blogs collected the most likes, and the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// Diagnostic probe: `1` whenever a list is supplied, `0` otherwise.
pub fn dummy(blogs: Option<&[BlogRecord]>) -> u32 {
    match blogs {
        Some(_) => 1,
        None => 0,
    }
}

/// Sum of likes across all blogs, saturating at `u64::MAX`.
pub fn total_likes(blogs: &[BlogRecord]) -> u64 {
    blogs
        .iter()
        .map(|blog| blog.likes)
        .fold(0u64, u64::saturating_add)
}

/// The first blog carrying the highest like count.
pub fn favorite_blog(blogs: &[BlogRecord]) -> Option<FavoriteBlog> {
    first_max(blogs, |blog: &&BlogRecord| blog.likes).map(|blog| FavoriteBlog {
        title: blog.title.clone(),
        author: blog.author.clone(),
        likes: blog.likes,
    })
}

/// The author with the most blogs.
pub fn most_blogs(blogs: &[BlogRecord]) -> Option<AuthorBlogs> {
    let counts = group_by_author(blogs, |_| 1);
    first_max(counts, |&(_, count): &(&str, u64)| count).map(|(author, blogs)| AuthorBlogs {
        author: author.to_string(),
        blogs,
    })
}

/// The author whose blogs have the highest summed likes.
pub fn most_likes(blogs: &[BlogRecord]) -> Option<AuthorLikes> {
    let sums = group_by_author(blogs, |blog| blog.likes);
    first_max(sums, |&(_, likes): &(&str, u64)| likes).map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Accumulate `weight` per author, keeping authors in first-encounter order.
/// Totals saturate at `u64::MAX`.
fn group_by_author<F>(blogs: &[BlogRecord], weight: F) -> Vec<(&str, u64)>
where
    F: Fn(&BlogRecord) -> u64,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, u64)> = Vec::new();

    for blog in blogs {
        let author = blog.author.as_str();
        match positions.get(author) {
            Some(&pos) => {
                let total = &mut groups[pos].1;
                *total = total.saturating_add(weight(blog));
            }
            None => {
                positions.insert(author, groups.len());
                groups.push((author, weight(blog)));
            }
        }
    }

    groups
}

/// Single pass fold that only replaces the current best on strict improvement,
/// so the earliest item wins ties. `Iterator::max_by_key` keeps the last.
fn first_max<I, K, F>(items: I, key: F) -> Option<I::Item>
where
    I: IntoIterator,
    K: Ord,
    F: Fn(&I::Item) -> K,
{
    items
        .into_iter()
        .fold(None, |best: Option<(I::Item, K)>, item| {
            let value = key(&item);
            match best {
                Some((current, current_value)) if current_value >= value => {
                    Some((current, current_value))
                }
                _ => Some((item, value)),
            }
        })
        .map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(title: &str, author: &str, likes: u64) -> BlogRecord {
        BlogRecord::new(title, author, "www.fullstackopen.com", likes)
    }

    fn sample_blogs() -> Vec<BlogRecord> {
        vec![
            blog("React patterns", "Michael Chan", 7),
            blog("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            blog("Canonical string reduction", "Edsger W. Dijkstra", 12),
            blog("First class tests", "Robert C. Martin", 10),
            blog("TDD harms architecture", "Robert C. Martin", 0),
            blog("Type wars", "Robert C. Martin", 2),
        ]
    }

    #[test]
    fn test_dummy_returns_one_for_any_list() {
        let empty: Vec<BlogRecord> = Vec::new();
        assert_eq!(dummy(Some(empty.as_slice())), 1);
        assert_eq!(dummy(Some(sample_blogs().as_slice())), 1);
        assert_eq!(dummy(None), 0);
    }

    #[test]
    fn test_total_likes() {
        let blogs = vec![
            blog("Blog test", "Isaac Newton", 91),
            blog("Blog test 2", "Charles Darwin", 12),
        ];
        assert_eq!(total_likes(&blogs), 103);
        assert_eq!(total_likes(&sample_blogs()), 36);
    }

    #[test]
    fn test_total_likes_empty_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn test_total_likes_single_blog() {
        assert_eq!(total_likes(&[blog("only", "X", 5)]), 5);
    }

    #[test]
    fn test_favorite_blog_picks_highest_likes() {
        let blogs = vec![blog("A", "X", 5), blog("B", "Y", 12)];
        assert_eq!(
            favorite_blog(&blogs),
            Some(FavoriteBlog {
                title: "B".to_string(),
                author: "Y".to_string(),
                likes: 12,
            })
        );
    }

    #[test]
    fn test_favorite_blog_tie_keeps_first() {
        let blogs = vec![blog("A", "X", 3), blog("B", "Y", 9), blog("C", "Z", 9)];
        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.title, "B");
        assert_eq!(favorite.author, "Y");
    }

    #[test]
    fn test_favorite_blog_all_zero_likes() {
        let blogs = vec![blog("A", "X", 0), blog("B", "Y", 0)];
        assert_eq!(favorite_blog(&blogs).unwrap().title, "A");
    }

    #[test]
    fn test_favorite_blog_empty_is_none() {
        assert_eq!(favorite_blog(&[]), None);
    }

    #[test]
    fn test_most_blogs() {
        let blogs = vec![blog("1", "X", 0), blog("2", "X", 0), blog("3", "Y", 0)];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "X".to_string(),
                blogs: 2,
            })
        );

        let result = most_blogs(&sample_blogs()).unwrap();
        assert_eq!(result.author, "Robert C. Martin");
        assert_eq!(result.blogs, 3);
    }

    #[test]
    fn test_most_blogs_tie_keeps_first_author_seen() {
        let blogs = vec![
            blog("1", "Y", 0),
            blog("2", "X", 0),
            blog("3", "X", 0),
            blog("4", "Y", 0),
        ];
        let result = most_blogs(&blogs).unwrap();
        assert_eq!(result.author, "Y");
        assert_eq!(result.blogs, 2);
    }

    #[test]
    fn test_most_blogs_author_match_is_exact() {
        let blogs = vec![blog("1", "x", 0), blog("2", "X", 0), blog("3", "X ", 0)];
        let result = most_blogs(&blogs).unwrap();
        assert_eq!(result.author, "x");
        assert_eq!(result.blogs, 1);
    }

    #[test]
    fn test_most_blogs_empty_is_none() {
        assert_eq!(most_blogs(&[]), None);
    }

    #[test]
    fn test_most_likes() {
        let blogs = vec![blog("1", "X", 5), blog("2", "X", 10), blog("3", "Y", 12)];
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "X".to_string(),
                likes: 15,
            })
        );

        let result = most_likes(&sample_blogs()).unwrap();
        assert_eq!(result.author, "Edsger W. Dijkstra");
        assert_eq!(result.likes, 17);
    }

    #[test]
    fn test_most_likes_tie_keeps_first_author_seen() {
        let blogs = vec![blog("1", "Y", 4), blog("2", "X", 8), blog("3", "Y", 4)];
        let result = most_likes(&blogs).unwrap();
        assert_eq!(result.author, "Y");
        assert_eq!(result.likes, 8);
    }

    #[test]
    fn test_most_likes_empty_is_none() {
        assert_eq!(most_likes(&[]), None);
    }

    #[test]
    fn test_huge_like_counts_saturate() {
        let blogs = vec![
            blog("max", "X", u64::MAX),
            blog("one more", "X", 1),
            blog("other", "Y", u64::MAX - 1),
        ];

        assert_eq!(total_likes(&blogs), u64::MAX);
        assert_eq!(favorite_blog(&blogs).unwrap().title, "max");

        let result = most_likes(&blogs).unwrap();
        assert_eq!(result.author, "X");
        assert_eq!(result.likes, u64::MAX);
    }

    #[test]
    fn test_saturated_author_totals_tie_keeps_first() {
        let blogs = vec![
            blog("1", "Y", u64::MAX),
            blog("2", "X", u64::MAX),
            blog("3", "X", u64::MAX),
        ];
        let result = most_likes(&blogs).unwrap();
        assert_eq!(result.author, "Y");
        assert_eq!(result.likes, u64::MAX);
    }

    #[test]
    fn test_aggregates_are_repeatable() {
        let blogs = sample_blogs();
        assert_eq!(total_likes(&blogs), total_likes(&blogs));
        assert_eq!(favorite_blog(&blogs), favorite_blog(&blogs));
        assert_eq!(most_blogs(&blogs), most_blogs(&blogs));
        assert_eq!(most_likes(&blogs), most_likes(&blogs));
    }
}
