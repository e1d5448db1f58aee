//! Target sizes and offsets for the expanded post.
//!
//! Everything here is a pure function of the post's aspect ratio and the
//! viewport, so the host can call it at any point (open sequence, resize)
//! and tests can pin exact pixel values.

use crate::config::TrackConfig;
use crate::types::AspectRatio;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn square(side: f64) -> Self {
        Self { width: side, height: side }
    }
}

/// On-screen box in client pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// One percent of the smaller side, in pixels.
    pub fn vmin(&self) -> f64 {
        self.width.min(self.height) / 100.0
    }

    pub fn orientation(&self, portrait_ratio: f64) -> Orientation {
        if self.height <= 0.0 || self.width / self.height >= portrait_ratio {
            Orientation::Landscape
        } else {
            Orientation::Vertical
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Vertical,
}

/// Which expanded layout a post uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutBranch {
    /// Square image on the left, info panel on the right half.
    SideBySide,
    /// 16:9 image in the upper half, info below.
    WideStacked,
    /// Square image in the upper half of a portrait viewport.
    SquareStacked,
}

impl LayoutBranch {
    pub fn select(aspect: AspectRatio, orientation: Orientation) -> Self {
        match (aspect, orientation) {
            (AspectRatio::Square, Orientation::Landscape) => LayoutBranch::SideBySide,
            (AspectRatio::Wide, _) => LayoutBranch::WideStacked,
            (AspectRatio::Square, Orientation::Vertical) => LayoutBranch::SquareStacked,
        }
    }

    pub fn is_stacked(self) -> bool {
        !matches!(self, LayoutBranch::SideBySide)
    }
}

const SIDE_BY_SIDE_FRACTION: f64 = 0.8;
const STACKED_WIDTH_FRACTION: f64 = 0.9;
const STACKED_HEIGHT_FRACTION: f64 = 0.5;
/// Breathing room between the square image and the info panel below it.
const SQUARE_STACKED_GAP: f64 = 0.02;
/// Gap left between the side-by-side image and the viewport's centre line.
const SIDE_BY_SIDE_GAP: f64 = 0.02;
/// Vertical centre of stacked content, as a fraction of viewport height.
const STACKED_CENTER_Y: f64 = 0.33;

/// Pixel size of a post once expanded.
pub fn compute_expanded_dimensions(aspect: AspectRatio, viewport: Viewport, orientation: Orientation) -> Size {
    let (vw, vh) = (viewport.width, viewport.height);
    match LayoutBranch::select(aspect, orientation) {
        LayoutBranch::SideBySide => {
            Size::square((vw * SIDE_BY_SIDE_FRACTION).min(vh * SIDE_BY_SIDE_FRACTION))
        }
        LayoutBranch::WideStacked => {
            let ratio = AspectRatio::Wide.ratio();
            let max_w = vw * STACKED_WIDTH_FRACTION;
            let max_h = vh * STACKED_HEIGHT_FRACTION;
            if max_h <= 0.0 {
                return Size::default();
            }
            if max_w / max_h > ratio {
                // Height is the limiting bound
                Size::new(max_h * ratio, max_h)
            } else {
                Size::new(max_w, max_w / ratio)
            }
        }
        LayoutBranch::SquareStacked => {
            let max_w = vw * STACKED_WIDTH_FRACTION;
            let max_h = vh * STACKED_HEIGHT_FRACTION - vh * SQUARE_STACKED_GAP;
            Size::square(max_w.min(max_h).max(0.0))
        }
    }
}

/// Offset that moves an element currently at `current` to its expanded resting place.
///
/// The result is a delta; callers add it to whatever translation the element
/// already carries.
pub fn compute_target_translation(branch: LayoutBranch, current: Rect, viewport: Viewport) -> Point {
    match branch {
        LayoutBranch::SideBySide => {
            let target_right = viewport.width * (0.5 - SIDE_BY_SIDE_GAP);
            Point::new(target_right - current.right(), 0.0)
        }
        LayoutBranch::WideStacked | LayoutBranch::SquareStacked => {
            let center = current.center();
            Point::new(
                viewport.width / 2.0 - center.x,
                viewport.height * STACKED_CENTER_Y - center.y,
            )
        }
    }
}

/// Pixel size of a post's thumbnail while it sits in the track.
pub fn idle_dimensions(aspect: AspectRatio, viewport: Viewport, config: &TrackConfig) -> Size {
    let height = viewport.vmin() * config.thumbnail_vmin;
    Size::new(height * aspect.ratio(), height)
}

/// Header opacity for a committed or in-flight track offset (percent, `[-100, 0]`).
pub fn header_opacity(offset_percent: f64, config: &TrackConfig) -> f64 {
    if config.header_fade_span <= 0.0 {
        return 1.0;
    }
    (1.0 + offset_percent / config.header_fade_span).clamp(0.0, 1.0)
}
