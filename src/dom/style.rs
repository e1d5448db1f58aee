//! CSS value formatting for the track surface. Pure so it can be tested natively.

use lookbook_core::{Point, Size};

pub const EASING: &str = "cubic-bezier(0.25, 0.8, 0.25, 1)";

/// Per-element transition bookkeeping.
///
/// Several properties of one element can animate at once with different
/// durations (on close the selected image translates over 600ms while it
/// shrinks over 550ms), so the `transition` shorthand is rebuilt from every
/// property's most recent duration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transitions {
    entries: Vec<(&'static str, u32)>,
}

impl Transitions {
    pub fn set(&mut self, property: &'static str, duration_ms: u32) {
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = duration_ms,
            None => self.entries.push((property, duration_ms)),
        }
    }

    pub fn css(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, ms)| *ms > 0)
            .map(|(p, ms)| format!("{} {}ms {}", p, ms, EASING))
            .collect();
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }
}

pub fn px(value: f64) -> String {
    format!("{}px", round2(value))
}

/// Transform of the strip: horizontal percent of its own width, vertically centered.
pub fn track_transform(percent: f64) -> String {
    format!("translate({}%, -50%)", round2(percent))
}

pub fn item_transform(offset: Point) -> String {
    format!("translate({}px, {}px)", round2(offset.x), round2(offset.y))
}

pub fn object_position(percent: f64) -> String {
    format!("{}% center", round2(percent.clamp(0.0, 100.0)))
}

pub fn size_properties(size: Size) -> [(&'static str, String); 2] {
    [("width", px(size.width)), ("height", px(size.height))]
}

pub fn opacity(value: f64) -> String {
    format!("{}", round2(value.clamp(0.0, 1.0)))
}

fn round2(value: f64) -> f64 {
    let r = (value * 100.0).round() / 100.0;
    // -0.0 prints as "-0"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
