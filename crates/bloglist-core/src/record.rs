use serde::{Deserialize, Serialize};

/// A single blog entry as seen by the aggregation helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub title: String,
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
}

impl BlogRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        likes: u64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
            likes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_likes_defaults_to_zero() {
        let record: BlogRecord = serde_json::from_str(
            r#"{"title":"Blog without likes","author":"Charles Darwin","url":"www.fullstackopen.com"}"#,
        )
        .unwrap();
        assert_eq!(record.likes, 0);
        assert_eq!(record.author, "Charles Darwin");
    }

    #[test]
    fn test_negative_likes_rejected() {
        let parsed = serde_json::from_str::<BlogRecord>(
            r#"{"title":"t","author":"a","url":"u","likes":-1}"#,
        );
        assert!(parsed.is_err());
    }
}
