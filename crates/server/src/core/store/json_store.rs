//! JSON document storage for blogs
//!
//! Each blog lives in `<blogs_dir>/<id>.json`. Writes go through a temp file
//! and a rename so a crash never leaves a half-written document behind.

use crate::core::config::ServerConfig;
use crate::core::models::{Blog, BlogUpdate, NewBlog};
use anyhow::{Context, Result};
use bloglist_core::BlogRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// JSON-file blog store with an in-memory cache
pub struct JsonBlogStore {
    config: ServerConfig,
    /// All loaded blogs keyed by id
    blogs: RwLock<HashMap<String, Blog>>,
}

impl JsonBlogStore {
    /// Create the store and load every blog already on disk
    pub async fn new(config: ServerConfig) -> Result<Self> {
        config.ensure_dirs().await?;

        let store = Self {
            config,
            blogs: RwLock::new(HashMap::new()),
        };

        store.load_existing_blogs().await?;

        info!(
            "[Blogs] JSON store initialized with {} blogs",
            store.blogs.read().await.len()
        );

        Ok(store)
    }

    fn blog_path(&self, id: &str) -> PathBuf {
        self.config.blogs_dir.join(format!("{}.json", id))
    }

    async fn load_existing_blogs(&self) -> Result<()> {
        let mut entries = fs::read_dir(&self.config.blogs_dir).await?;
        let mut loaded = HashMap::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match Self::load_blog_from_disk(&path).await {
                Ok(blog) => {
                    loaded.insert(blog.id.clone(), blog);
                }
                Err(e) => {
                    warn!("[Blogs] Skipping unreadable document {:?}: {:#}", path, e);
                }
            }
        }

        info!("[Blogs] Loaded {} existing blogs from disk", loaded.len());
        *self.blogs.write().await = loaded;
        Ok(())
    }

    async fn load_blog_from_disk(path: &Path) -> Result<Blog> {
        let content = fs::read_to_string(path).await?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse blog {:?}", path))
    }

    async fn save_blog_to_disk(&self, blog: &Blog) -> Result<()> {
        let path = self.blog_path(&blog.id);
        let temp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(blog)?;
        fs::write(&temp_path, json)
            .await
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &path).await?;

        Ok(())
    }

    /// All blogs, oldest first
    pub async fn list(&self) -> Vec<Blog> {
        let mut blogs: Vec<Blog> = self.blogs.read().await.values().cloned().collect();
        blogs.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        blogs
    }

    /// Records for the aggregation helpers, in listing order
    pub async fn records(&self) -> Vec<BlogRecord> {
        self.list().await.iter().map(Blog::record).collect()
    }

    pub async fn get(&self, id: &str) -> Option<Blog> {
        self.blogs.read().await.get(id).cloned()
    }

    /// Ids of every owned blog, grouped by owner id, in listing order
    pub async fn blog_ids_by_owner(&self) -> HashMap<String, Vec<String>> {
        let mut owned: HashMap<String, Vec<String>> = HashMap::new();
        for blog in self.list().await {
            if let Some(user) = blog.user {
                owned.entry(user).or_default().push(blog.id);
            }
        }
        owned
    }

    pub async fn insert(&self, new_blog: NewBlog) -> Result<Blog> {
        let blog = Blog::new(new_blog);

        let mut blogs = self.blogs.write().await;
        self.save_blog_to_disk(&blog).await?;
        blogs.insert(blog.id.clone(), blog.clone());

        info!("[Blogs] Created blog {} ({})", blog.id, blog.title);

        Ok(blog)
    }

    /// Apply `update` to a blog; `None` when no blog has that id
    pub async fn update(&self, id: &str, update: BlogUpdate) -> Result<Option<Blog>> {
        let mut blogs = self.blogs.write().await;
        let Some(current) = blogs.get(id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        update.apply(&mut updated);
        self.save_blog_to_disk(&updated).await?;
        blogs.insert(updated.id.clone(), updated.clone());

        info!("[Blogs] Updated blog {}", id);

        Ok(Some(updated))
    }

    /// Remove a blog; `false` when no blog has that id
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut blogs = self.blogs.write().await;
        if !blogs.contains_key(id) {
            return Ok(false);
        }

        let path = self.blog_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("[Blogs] Document for {} already gone", id);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to delete {:?}", path));
            }
        }
        blogs.remove(id);

        info!("[Blogs] Deleted blog {}", id);

        Ok(true)
    }
}
