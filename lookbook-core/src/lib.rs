//! Host-independent core of the LookBook image track: data model, gesture
//! handling, expand/collapse sequencing and expanded-layout geometry.

pub mod config;
pub mod drag;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod machine;
pub mod media;
pub mod schedule;
pub mod surface;
pub mod track;
pub mod types;

pub use config::TrackConfig;
pub use error::{GalleryError, Rejection};
pub use gallery::Gallery;
pub use geometry::{Orientation, Point, Rect, Size, Viewport};
pub use media::MediaKind;
pub use schedule::Millis;
pub use surface::TrackSurface;
pub use track::TrackController;
pub use types::{AspectRatio, CollectionInfo, ContentType, InfoText, Post};
