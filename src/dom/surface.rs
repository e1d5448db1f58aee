use lookbook_core::geometry::{Point, Rect, Size};
use lookbook_core::{MediaKind, TrackSurface};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::style::{self, Transitions};

struct Item {
    image: HtmlElement,
    offset: Point,
    transitions: Transitions,
}

/// Browser implementation of [`TrackSurface`]: CSS transitions on elements
/// the track component rendered and handed over at mount.
pub struct DomSurface {
    track: HtmlElement,
    track_transitions: Transitions,
    header: HtmlElement,
    info_panel: HtmlElement,
    info_transitions: Transitions,
    /// Audio players are appended here, inside the info panel.
    audio_host: HtmlElement,
    items: Vec<Item>,
}

impl DomSurface {
    pub fn new(
        track: HtmlElement,
        header: HtmlElement,
        info_panel: HtmlElement,
        audio_host: HtmlElement,
        images: Vec<HtmlElement>,
    ) -> Self {
        let items = images
            .into_iter()
            .map(|image| Item { image, offset: Point::ZERO, transitions: Transitions::default() })
            .collect();
        Self {
            track,
            track_transitions: Transitions::default(),
            header,
            info_panel,
            info_transitions: Transitions::default(),
            audio_host,
            items,
        }
    }

    fn item_mut(&mut self, index: usize) -> Option<&mut Item> {
        let item = self.items.get_mut(index);
        if item.is_none() {
            log::warn!("No track item #{}", index);
        }
        item
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("Failed to set {}: {:?}", property, e);
    }
}

fn remove_style(el: &HtmlElement, property: &str) {
    if let Err(e) = el.style().remove_property(property) {
        log::warn!("Failed to clear {}: {:?}", property, e);
    }
}

fn set_transition(el: &HtmlElement, transitions: &mut Transitions, property: &'static str, duration_ms: u32) {
    transitions.set(property, duration_ms);
    set_style(el, "transition", &transitions.css());
}

fn page_offset() -> Point {
    let Some(window) = web_sys::window() else { return Point::ZERO };
    Point::new(window.scroll_x().unwrap_or(0.0), window.scroll_y().unwrap_or(0.0))
}

fn place_over(el: &HtmlElement, frame: Rect) {
    let scroll = page_offset();
    set_style(el, "left", &style::px(frame.x + scroll.x));
    set_style(el, "top", &style::px(frame.y + scroll.y));
    set_style(el, "width", &style::px(frame.width));
    set_style(el, "height", &style::px(frame.height));
}

fn create_element(tag: &str) -> Option<HtmlElement> {
    let document = web_sys::window()?.document()?;
    match document.create_element(tag) {
        Ok(el) => el.dyn_into::<HtmlElement>().ok(),
        Err(e) => {
            log::error!("Failed to create <{}>: {:?}", tag, e);
            None
        }
    }
}

impl TrackSurface for DomSurface {
    type Media = HtmlElement;

    fn translate_track(&mut self, percent: f64, duration_ms: u32) {
        set_transition(&self.track, &mut self.track_transitions, "transform", duration_ms);
        set_style(&self.track, "transform", &style::track_transform(percent));
    }

    fn shift_focal_points(&mut self, percent: f64, duration_ms: u32) {
        let position = style::object_position(percent);
        for item in &mut self.items {
            set_transition(&item.image, &mut item.transitions, "object-position", duration_ms);
            set_style(&item.image, "object-position", &position);
        }
    }

    fn set_header_opacity(&mut self, opacity: f64, duration_ms: u32) {
        let transition = if duration_ms > 0 {
            format!("opacity {}ms {}", duration_ms, style::EASING)
        } else {
            "none".to_string()
        };
        set_style(&self.header, "transition", &transition);
        set_style(&self.header, "opacity", &style::opacity(opacity));
    }

    fn translate_item(&mut self, index: usize, offset: Point, duration_ms: u32) {
        let Some(item) = self.item_mut(index) else { return };
        set_transition(&item.image, &mut item.transitions, "transform", duration_ms);
        set_style(&item.image, "transform", &style::item_transform(offset));
        item.offset = offset;
    }

    fn resize_item(&mut self, index: usize, size: Size, duration_ms: u32) {
        let Some(item) = self.item_mut(index) else { return };
        item.transitions.set("width", duration_ms);
        set_transition(&item.image, &mut item.transitions, "height", duration_ms);
        for (property, value) in style::size_properties(size) {
            set_style(&item.image, property, &value);
        }
    }

    fn item_rect(&self, index: usize) -> Option<Rect> {
        let rect = self.items.get(index)?.image.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn item_offset(&self, index: usize) -> Point {
        self.items.get(index).map(|item| item.offset).unwrap_or(Point::ZERO)
    }

    fn release_item(&mut self, index: usize) {
        let Some(item) = self.item_mut(index) else { return };
        remove_style(&item.image, "width");
        remove_style(&item.image, "height");
    }

    fn set_info_panel(&mut self, size: Option<Size>, opacity: f64, duration_ms: u32) {
        let panel = &self.info_panel;
        if let Some(size) = size {
            self.info_transitions.set("width", 0);
            self.info_transitions.set("height", 0);
            for (property, value) in style::size_properties(size) {
                set_style(panel, property, &value);
            }
        }
        set_transition(panel, &mut self.info_transitions, "opacity", duration_ms);
        set_style(panel, "opacity", &style::opacity(opacity));
        set_style(panel, "pointer-events", if opacity > 0.0 { "auto" } else { "none" });
    }

    fn mount_media(&mut self, kind: MediaKind, src: &str, frame: Rect) -> Option<HtmlElement> {
        let tag = match kind {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        };
        let el = create_element(tag)?;
        let attributes = [("src", src), ("controls", ""), ("controlslist", "nodownload"), ("preload", "metadata")];
        for (name, value) in attributes {
            if let Err(e) = el.set_attribute(name, value) {
                log::warn!("Failed to set {} on <{}>: {:?}", name, tag, e);
            }
        }

        let parent = match kind {
            MediaKind::Video => {
                el.set_class_name("track-video");
                set_style(&el, "position", "absolute");
                place_over(&el, frame);
                web_sys::window()?.document()?.body()?
            }
            MediaKind::Audio => {
                el.set_class_name("track-audio");
                set_style(&el, "width", "80%");
                self.audio_host.clone()
            }
        };
        if let Err(e) = parent.append_child(&el) {
            log::error!("Failed to attach <{}>: {:?}", tag, e);
            return None;
        }
        Some(el)
    }

    fn place_media(&mut self, media: &HtmlElement, kind: MediaKind, frame: Rect) {
        // Audio follows the panel's width on its own.
        if kind == MediaKind::Video {
            place_over(media, frame);
        }
    }

    fn unmount_media(&mut self, media: HtmlElement) {
        media.remove();
    }
}
