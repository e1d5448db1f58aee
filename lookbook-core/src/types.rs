use serde::{Deserialize, Serialize};

/// Shape of a post's still image. Picks both the idle thumbnail shape and
/// the expanded layout branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Wide => 16.0 / 9.0,
        }
    }
}

/// Secondary media mounted when a post is expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Default,
    Mp4,
    Mp3,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub content_type: ContentType,
    /// Present iff `content_type != Default`.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub is_liked: bool,
}

impl Post {
    /// Source of the secondary media element, if this post has one.
    pub fn media_source(&self) -> Option<&str> {
        match self.content_type {
            ContentType::Default => None,
            ContentType::Mp4 | ContentType::Mp3 => self.content.as_deref().filter(|c| !c.is_empty()),
        }
    }

    pub fn info(&self) -> InfoText {
        InfoText {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

/// Header text for the collection being browsed. No behavioural effect on the track.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Text shown in the info panel of the expanded post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoText {
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_parses_camel_case() {
        let json = r#"{
            "id": "p1",
            "image": "a.jpg",
            "title": "Dusk",
            "aspectRatio": "16:9",
            "contentType": "mp4",
            "content": "a.mp4",
            "isLiked": true
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.aspect_ratio, AspectRatio::Wide);
        assert_eq!(post.content_type, ContentType::Mp4);
        assert_eq!(post.media_source(), Some("a.mp4"));
        assert!(post.is_liked);
        assert!(post.description.is_none());
    }

    #[test]
    fn test_default_content_type_has_no_media() {
        let json = r#"{"id": "p2", "image": "b.jpg", "aspectRatio": "1:1", "content": "stray.mp3"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.content_type, ContentType::Default);
        assert_eq!(post.media_source(), None);
    }

    #[test]
    fn test_info_uses_empty_description() {
        let json = r#"{"id": "p3", "image": "c.jpg", "title": "Tide", "aspectRatio": "1:1"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        let info = post.info();
        assert_eq!(info.title, "Tide");
        assert_eq!(info.description, "");
    }

    #[test]
    fn test_wide_ratio() {
        assert!((AspectRatio::Wide.ratio() - 1.777_777).abs() < 1e-5);
        assert_eq!(AspectRatio::Square.ratio(), 1.0);
    }
}
