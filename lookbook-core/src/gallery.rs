//! Gallery document: the posts, header text and viewer context handed to a track.

use std::collections::HashSet;

use serde::Deserialize;

use crate::config::TrackConfig;
use crate::error::GalleryError;
use crate::types::{CollectionInfo, ContentType, Post};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    #[serde(default)]
    pub collection: CollectionInfo,
    /// Display-only attribution.
    #[serde(default)]
    pub user_to_view: Option<String>,
    #[serde(default)]
    pub is_logged_in: bool,
    pub posts: Vec<Post>,
    #[serde(default)]
    pub track: TrackConfig,
}

impl Gallery {
    /// Parse and validate a gallery document.
    pub fn from_json(json: &str) -> Result<Self, GalleryError> {
        let mut gallery: Gallery = serde_json::from_str(json)?;
        gallery.validate()?;
        Ok(gallery)
    }

    fn validate(&mut self) -> Result<(), GalleryError> {
        let mut seen = HashSet::new();
        for post in &mut self.posts {
            if !seen.insert(post.id.clone()) {
                return Err(GalleryError::DuplicateId { id: post.id.clone() });
            }
            if post.image.trim().is_empty() {
                return Err(GalleryError::MissingImage { id: post.id.clone() });
            }
            let has_content = post.content.as_deref().is_some_and(|c| !c.trim().is_empty());
            match post.content_type {
                ContentType::Default => {
                    if post.content.take().is_some() {
                        log::warn!("Post {} has content but no content type, ignoring it", post.id);
                    }
                }
                ContentType::Mp4 if !has_content => {
                    return Err(GalleryError::MissingContent { id: post.id.clone(), content_type: "mp4" });
                }
                ContentType::Mp3 if !has_content => {
                    return Err(GalleryError::MissingContent { id: post.id.clone(), content_type: "mp3" });
                }
                _ => {}
            }
        }
        log::debug!("Gallery validated: {} posts", self.posts.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AspectRatio;

    #[test]
    fn test_parses_full_document() {
        let json = r#"{
            "collection": {"title": "Coast", "subtitle": "2024"},
            "userToView": "mira",
            "isLoggedIn": true,
            "posts": [
                {"id": "a", "image": "a.jpg", "aspectRatio": "1:1"},
                {"id": "b", "image": "b.jpg", "aspectRatio": "16:9", "contentType": "mp3", "content": "b.mp3"}
            ],
            "track": {"resizeDebounceMs": 250}
        }"#;
        let gallery = Gallery::from_json(json).unwrap();
        assert_eq!(gallery.collection.title, "Coast");
        assert_eq!(gallery.user_to_view.as_deref(), Some("mira"));
        assert!(gallery.is_logged_in);
        assert_eq!(gallery.posts.len(), 2);
        assert_eq!(gallery.posts[1].aspect_ratio, AspectRatio::Wide);
        assert_eq!(gallery.track.resize_debounce_ms, 250);
        assert_eq!(gallery.track.drag_settle_ms, 1200);
    }

    #[test]
    fn test_rejects_missing_media_source() {
        let json = r#"{"posts": [{"id": "a", "image": "a.jpg", "aspectRatio": "1:1", "contentType": "mp4"}]}"#;
        let err = Gallery::from_json(json).unwrap_err();
        assert!(matches!(err, GalleryError::MissingContent { ref id, content_type: "mp4" } if id == "a"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{"posts": [
            {"id": "a", "image": "a.jpg", "aspectRatio": "1:1"},
            {"id": "a", "image": "b.jpg", "aspectRatio": "1:1"}
        ]}"#;
        assert!(matches!(Gallery::from_json(json), Err(GalleryError::DuplicateId { .. })));
    }

    #[test]
    fn test_rejects_blank_image() {
        let json = r#"{"posts": [{"id": "a", "image": "  ", "aspectRatio": "1:1"}]}"#;
        assert!(matches!(Gallery::from_json(json), Err(GalleryError::MissingImage { .. })));
    }

    #[test]
    fn test_drops_stray_content() {
        let json = r#"{"posts": [{"id": "a", "image": "a.jpg", "aspectRatio": "1:1", "content": "x.mp4"}]}"#;
        let gallery = Gallery::from_json(json).unwrap();
        assert!(gallery.posts[0].content.is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Gallery::from_json("{"), Err(GalleryError::Json(_))));
    }
}
