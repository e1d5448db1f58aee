//! Demo persistence for likes: a JSON map of post id to liked state in localStorage.
//! Stands in for the external like service the host normally provides.

use std::collections::BTreeMap;

use lookbook_core::Post;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "lookbook.likes";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LikeStore {
    /// Every post the viewer has toggled, liked or not.
    liked: BTreeMap<String, bool>,
}

impl LikeStore {
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable like store: {}", e);
            Self::default()
        })
    }

    pub fn set(&mut self, post_id: &str, liked: bool) {
        self.liked.insert(post_id.to_string(), liked);
    }

    /// Overlay stored likes onto freshly loaded posts. Posts the viewer
    /// never toggled keep the document's value.
    pub fn apply(&self, posts: &mut [Post]) {
        for post in posts {
            if let Some(&liked) = self.liked.get(&post.id) {
                post.is_liked = liked;
            }
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load() -> LikeStore {
    storage()
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
        .map(|json| LikeStore::from_json(&json))
        .unwrap_or_default()
}

/// Record a like. `Err` means the caller must revert its optimistic flip.
pub fn persist(post_id: &str, liked: bool) -> Result<(), String> {
    let storage = storage().ok_or("localStorage unavailable")?;
    let mut store = load();
    store.set(post_id, liked);
    let json = serde_json::to_string(&store).map_err(|e| e.to_string())?;
    storage
        .set_item(STORAGE_KEY, &json)
        .map_err(|e| format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookbook_core::{AspectRatio, ContentType};

    fn post(id: &str, is_liked: bool) -> Post {
        Post {
            id: id.to_string(),
            image: format!("{}.jpg", id),
            title: String::new(),
            description: None,
            aspect_ratio: AspectRatio::Square,
            content_type: ContentType::Default,
            content: None,
            is_liked,
        }
    }

    #[test]
    fn test_apply_marks_stored_posts() {
        let mut store = LikeStore::default();
        store.set("b", true);
        store.set("c", true);
        store.set("c", false);

        let mut posts = vec![post("a", true), post("b", false), post("c", false)];
        store.apply(&mut posts);
        let liked: Vec<bool> = posts.iter().map(|p| p.is_liked).collect();
        assert_eq!(liked, vec![true, true, false]);
    }

    #[test]
    fn test_unlike_overrides_document() {
        let mut store = LikeStore::default();
        store.set("a", false);
        let reloaded = LikeStore::from_json(&serde_json::to_string(&store).unwrap());

        let mut posts = vec![post("a", true), post("b", true)];
        reloaded.apply(&mut posts);
        assert!(!posts[0].is_liked);
        assert!(posts[1].is_liked);
    }

    #[test]
    fn test_unreadable_store_is_empty() {
        assert_eq!(LikeStore::from_json("not json"), LikeStore::default());
        let store = LikeStore::from_json(r#"{"liked":{"x":true}}"#);
        let mut posts = vec![post("x", false)];
        store.apply(&mut posts);
        assert!(posts[0].is_liked);
    }
}
