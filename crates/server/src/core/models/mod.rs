use bloglist_core::BlogRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::auth::UserInfo;

/// A blog document as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// Id of the user who created the blog
    #[serde(default)]
    pub user: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(new_blog: NewBlog) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: new_blog.title,
            author: new_blog.author,
            url: new_blog.url,
            likes: new_blog.likes,
            user: new_blog.user,
            created_at: Utc::now(),
        }
    }

    /// Snapshot used by the list aggregation helpers
    pub fn record(&self) -> BlogRecord {
        BlogRecord::new(&self.title, &self.author, &self.url, self.likes)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user.as_deref() == Some(user_id)
    }
}

/// Fields needed to create a blog
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<String>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl BlogUpdate {
    pub fn apply(self, blog: &mut Blog) {
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(url) = self.url {
            blog.url = url;
        }
        if let Some(likes) = self.likes {
            blog.likes = likes;
        }
    }
}

/// Owner fields shown alongside a blog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogOwner {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<&UserInfo> for BlogOwner {
    fn from(user: &UserInfo) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// Blog as returned by the API, with its owner populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub user: Option<BlogOwner>,
    pub created_at: DateTime<Utc>,
}

impl BlogView {
    pub fn new(blog: Blog, owner: Option<&UserInfo>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner.map(BlogOwner::from),
            created_at: blog.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Blog {
        Blog::new(NewBlog {
            title: "Blog test".into(),
            author: "Isaac Newton".into(),
            url: "www.fullstackopen.com".into(),
            likes: 91,
            user: Some("u1".into()),
        })
    }

    #[test]
    fn test_update_keeps_missing_fields() {
        let mut blog = sample();
        BlogUpdate {
            likes: Some(92),
            ..Default::default()
        }
        .apply(&mut blog);

        assert_eq!(blog.likes, 92);
        assert_eq!(blog.title, "Blog test");
        assert_eq!(blog.url, "www.fullstackopen.com");
    }

    #[test]
    fn test_ownership() {
        let blog = sample();
        assert!(blog.is_owned_by("u1"));
        assert!(!blog.is_owned_by("u2"));
    }

    #[test]
    fn test_serialized_key_is_id() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("id").is_some());
        assert!(value.get("_id").is_none());
    }
}
