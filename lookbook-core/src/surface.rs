use crate::geometry::{Point, Rect, Size};
use crate::media::MediaKind;

/// What the track needs from the view it drives.
///
/// Every index is a position in the mounted post list. Durations of zero
/// mean "apply immediately". Implementations treat a missing element as a
/// no-op.
pub trait TrackSurface {
    /// Handle to a mounted video or audio element.
    type Media;

    /// Translate the whole strip horizontally by `percent` of its own width.
    fn translate_track(&mut self, percent: f64, duration_ms: u32);
    /// Parallax: move every idle thumbnail's focal point to `percent`.
    fn shift_focal_points(&mut self, percent: f64, duration_ms: u32);
    fn set_header_opacity(&mut self, opacity: f64, duration_ms: u32);

    /// Absolute translation of one thumbnail relative to its slot.
    fn translate_item(&mut self, index: usize, offset: Point, duration_ms: u32);
    fn resize_item(&mut self, index: usize, size: Size, duration_ms: u32);
    /// Current on-screen box of a thumbnail.
    fn item_rect(&self, index: usize) -> Option<Rect>;
    /// Translation last applied through `translate_item`.
    fn item_offset(&self, index: usize) -> Point;
    /// Hand a restored thumbnail's size back to the stylesheet.
    fn release_item(&mut self, index: usize);

    /// Size (when given) and fade the info panel.
    fn set_info_panel(&mut self, size: Option<Size>, opacity: f64, duration_ms: u32);

    fn mount_media(&mut self, kind: MediaKind, src: &str, frame: Rect) -> Option<Self::Media>;
    fn place_media(&mut self, media: &Self::Media, kind: MediaKind, frame: Rect);
    fn unmount_media(&mut self, media: Self::Media);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Test double that records every surface call.

    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Call {
        TranslateTrack(f64, u32),
        ShiftFocal(f64, u32),
        HeaderOpacity(f64, u32),
        TranslateItem(usize, Point, u32),
        ResizeItem(usize, Size, u32),
        ReleaseItem(usize),
        InfoPanel(Option<Size>, f64, u32),
        MountMedia(MediaKind, String, Rect),
        PlaceMedia(u32, MediaKind, Rect),
        UnmountMedia(u32),
    }

    /// Items are laid out as a row of fixed slots; `item_rect` reflects the
    /// last size and translation applied, like a browser would.
    #[derive(Debug)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
        pub slots: Vec<Rect>,
        pub sizes: HashMap<usize, Size>,
        pub offsets: HashMap<usize, Point>,
        pub live_media: Vec<u32>,
        next_media: u32,
    }

    impl RecordingSurface {
        pub fn new(count: usize) -> Self {
            let slots = (0..count)
                .map(|i| Rect::new(100.0 + i as f64 * 400.0, 270.0, 360.0, 360.0))
                .collect();
            Self {
                calls: Vec::new(),
                slots,
                sizes: HashMap::new(),
                offsets: HashMap::new(),
                live_media: Vec::new(),
                next_media: 1,
            }
        }

        pub fn take_calls(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl TrackSurface for RecordingSurface {
        type Media = u32;

        fn translate_track(&mut self, percent: f64, duration_ms: u32) {
            self.calls.push(Call::TranslateTrack(percent, duration_ms));
        }

        fn shift_focal_points(&mut self, percent: f64, duration_ms: u32) {
            self.calls.push(Call::ShiftFocal(percent, duration_ms));
        }

        fn set_header_opacity(&mut self, opacity: f64, duration_ms: u32) {
            self.calls.push(Call::HeaderOpacity(opacity, duration_ms));
        }

        fn translate_item(&mut self, index: usize, offset: Point, duration_ms: u32) {
            self.offsets.insert(index, offset);
            self.calls.push(Call::TranslateItem(index, offset, duration_ms));
        }

        fn resize_item(&mut self, index: usize, size: Size, duration_ms: u32) {
            self.sizes.insert(index, size);
            self.calls.push(Call::ResizeItem(index, size, duration_ms));
        }

        fn item_rect(&self, index: usize) -> Option<Rect> {
            let slot = self.slots.get(index)?;
            let size = self.sizes.get(&index).copied().unwrap_or(Size::new(slot.width, slot.height));
            let offset = self.item_offset(index);
            Some(Rect::new(slot.x + offset.x, slot.y + offset.y, size.width, size.height))
        }

        fn item_offset(&self, index: usize) -> Point {
            self.offsets.get(&index).copied().unwrap_or(Point::ZERO)
        }

        fn release_item(&mut self, index: usize) {
            self.sizes.remove(&index);
            self.calls.push(Call::ReleaseItem(index));
        }

        fn set_info_panel(&mut self, size: Option<Size>, opacity: f64, duration_ms: u32) {
            self.calls.push(Call::InfoPanel(size, opacity, duration_ms));
        }

        fn mount_media(&mut self, kind: MediaKind, src: &str, frame: Rect) -> Option<u32> {
            let id = self.next_media;
            self.next_media += 1;
            self.live_media.push(id);
            self.calls.push(Call::MountMedia(kind, src.to_string(), frame));
            Some(id)
        }

        fn place_media(&mut self, media: &u32, kind: MediaKind, frame: Rect) {
            self.calls.push(Call::PlaceMedia(*media, kind, frame));
        }

        fn unmount_media(&mut self, media: u32) {
            self.live_media.retain(|m| *m != media);
            self.calls.push(Call::UnmountMedia(media));
        }
    }
}
