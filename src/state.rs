use leptos::prelude::*;
use lookbook_core::geometry::LayoutBranch;
use lookbook_core::{InfoText, Post};

use crate::runtime;

/// Reactive mirror of the track controller, refreshed after every call into it.
#[derive(Clone, Copy)]
pub struct TrackState {
    pub posts: RwSignal<Vec<Post>>,
    /// Index shown in the breadcrumb.
    pub expanded: RwSignal<Option<usize>>,
    pub info: RwSignal<Option<InfoText>>,
    /// Layout of the expanded post, used to place the info panel.
    pub layout: RwSignal<Option<LayoutBranch>>,
    pub is_dragging: RwSignal<bool>,
    pub is_logged_in: RwSignal<bool>,
}

impl TrackState {
    pub fn new(posts: Vec<Post>, is_logged_in: bool) -> Self {
        Self {
            posts: RwSignal::new(posts),
            expanded: RwSignal::new(None),
            info: RwSignal::new(None),
            layout: RwSignal::new(None),
            is_dragging: RwSignal::new(false),
            is_logged_in: RwSignal::new(is_logged_in),
        }
    }

    pub fn handle(&self) -> TrackHandle {
        TrackHandle { expanded: self.expanded.read_only() }
    }
}

/// What the host page gets back from the track.
#[derive(Clone, Copy)]
pub struct TrackHandle {
    pub expanded: ReadSignal<Option<usize>>,
}

impl TrackHandle {
    /// Force-close the expanded post, e.g. from a back button.
    pub fn close_selected(&self) {
        runtime::close_selected();
    }

    /// Undo an optimistic like after persisting it failed.
    pub fn revert_like(&self, post_id: &str) {
        runtime::revert_like(post_id);
    }
}
