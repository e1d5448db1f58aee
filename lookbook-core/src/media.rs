//! The one secondary media element (video or audio) an expanded post may own.

use crate::geometry::Rect;
use crate::surface::TrackSurface;
use crate::types::ContentType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Positioned over the expanded image, appended to the document body.
    Video,
    /// Lives inside the info panel at 80% of its width.
    Audio,
}

impl MediaKind {
    pub fn for_content(content_type: ContentType) -> Option<Self> {
        match content_type {
            ContentType::Default => None,
            ContentType::Mp4 => Some(MediaKind::Video),
            ContentType::Mp3 => Some(MediaKind::Audio),
        }
    }
}

#[derive(Debug)]
pub enum MediaSlot<M> {
    Empty,
    Video(M),
    Audio(M),
}

impl<M> Default for MediaSlot<M> {
    fn default() -> Self {
        MediaSlot::Empty
    }
}

impl<M> MediaSlot<M> {
    pub fn is_empty(&self) -> bool {
        matches!(self, MediaSlot::Empty)
    }

    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            MediaSlot::Empty => None,
            MediaSlot::Video(_) => Some(MediaKind::Video),
            MediaSlot::Audio(_) => Some(MediaKind::Audio),
        }
    }

    /// Mount a new element, replacing whatever was there.
    pub fn mount<S>(&mut self, surface: &mut S, kind: MediaKind, src: &str, frame: Rect) -> bool
    where
        S: TrackSurface<Media = M>,
    {
        self.teardown(surface);
        match surface.mount_media(kind, src, frame) {
            Some(handle) => {
                *self = match kind {
                    MediaKind::Video => MediaSlot::Video(handle),
                    MediaKind::Audio => MediaSlot::Audio(handle),
                };
                true
            }
            None => {
                log::warn!("Failed to mount {:?} for {}", kind, src);
                false
            }
        }
    }

    pub fn place<S>(&self, surface: &mut S, frame: Rect)
    where
        S: TrackSurface<Media = M>,
    {
        match self {
            MediaSlot::Empty => {}
            MediaSlot::Video(m) => surface.place_media(m, MediaKind::Video, frame),
            MediaSlot::Audio(m) => surface.place_media(m, MediaKind::Audio, frame),
        }
    }

    /// Remove the element if there is one. Safe to call any number of times.
    pub fn teardown<S>(&mut self, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        match std::mem::replace(self, MediaSlot::Empty) {
            MediaSlot::Empty => {}
            MediaSlot::Video(m) | MediaSlot::Audio(m) => surface.unmount_media(m),
        }
    }
}
