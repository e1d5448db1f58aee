//! The image track: drag-to-scroll, expand/collapse sequencing and resize
//! re-centering over a mounted list of posts.
//!
//! `TrackController` is host-agnostic. Input handlers call into it with the
//! current time and a [`TrackSurface`]; timed steps land on its agenda and run
//! from [`TrackController::tick`].

use crate::config::TrackConfig;
use crate::drag::{DragController, DragMove};
use crate::error::Rejection;
use crate::geometry::{
    compute_expanded_dimensions, compute_target_translation, header_opacity, idle_dimensions, LayoutBranch,
    Orientation, Point, Size, Viewport,
};
use crate::machine::{ExpandMachine, ExpandState};
use crate::media::{MediaKind, MediaSlot};
use crate::schedule::{Agenda, ClosePhase, Millis, OpenPhase, ResizeStep, Task};
use crate::surface::TrackSurface;
use crate::types::{InfoText, Post};

pub struct TrackController<M> {
    config: TrackConfig,
    posts: Vec<Post>,
    drag: DragController,
    machine: ExpandMachine,
    media: MediaSlot<M>,
    agenda: Agenda,
    /// Viewport the layout is computed against; adopted when a resize settles.
    viewport: Viewport,
    orientation: Orientation,
    /// Latest reported viewport, used for drag normalisation.
    live_viewport: Viewport,
    resize_generation: u64,
    info: Option<InfoText>,
    info_visible: bool,
    expanded_size: Option<Size>,
    mounted: bool,
}

impl<M> TrackController<M> {
    pub fn new(posts: Vec<Post>, viewport: Viewport, config: TrackConfig) -> Self {
        log::info!("Track mounted: {} posts, {}x{} viewport", posts.len(), viewport.width, viewport.height);
        let orientation = viewport.orientation(config.portrait_ratio);
        Self {
            config,
            posts,
            drag: DragController::default(),
            machine: ExpandMachine::default(),
            media: MediaSlot::Empty,
            agenda: Agenda::default(),
            viewport,
            orientation,
            live_viewport: viewport,
            resize_generation: 0,
            info: None,
            info_visible: false,
            expanded_size: None,
            mounted: true,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn state(&self) -> ExpandState {
        self.machine.state()
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.machine.expanded_index()
    }

    pub fn info(&self) -> Option<&InfoText> {
        self.info.as_ref()
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag.offset()
    }

    pub fn pending_drag(&self) -> f64 {
        self.drag.pending()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_expand_animating(&self) -> bool {
        self.machine.is_expand_animating()
    }

    pub fn is_collapse_animating(&self) -> bool {
        self.machine.is_collapse_animating()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// When the host should next call [`Self::tick`].
    pub fn next_due(&self) -> Option<Millis> {
        if self.mounted {
            self.agenda.next_due()
        } else {
            None
        }
    }

    fn busy(&self) -> Option<Rejection> {
        if !self.mounted {
            return Some(Rejection::Unmounted);
        }
        match self.machine.state() {
            ExpandState::Idle => None,
            ExpandState::Opening { .. } => Some(Rejection::Opening),
            ExpandState::Open { .. } => Some(Rejection::AlreadyOpen),
            ExpandState::Closing { .. } => Some(Rejection::Closing),
        }
    }

    // ── Drag ─────────────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64) -> Result<(), Rejection> {
        if let Some(reason) = self.busy() {
            log::debug!("pointer down ignored: {}", reason);
            return Err(reason);
        }
        self.drag.pointer_down(x);
        Ok(())
    }

    pub fn pointer_move<S>(&mut self, x: f64, surface: &mut S) -> DragMove
    where
        S: TrackSurface<Media = M>,
    {
        if !self.mounted || self.machine.presented_index().is_some() || self.machine.is_collapse_animating() {
            return DragMove::Ignored;
        }
        let result = self.drag.pointer_move(x, self.live_viewport.width, self.config.drag_threshold_px);
        match result {
            DragMove::Moved { percent } => self.slide_to(percent, surface),
            DragMove::Clamped { offset } => self.slide_to(offset, surface),
            DragMove::Ignored | DragMove::Jitter => {}
        }
        result
    }

    fn slide_to<S>(&mut self, percent: f64, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        let duration = self.config.drag_settle_ms;
        surface.translate_track(percent, duration);
        if percent < 0.0 {
            surface.shift_focal_points(100.0 + percent, duration);
        }
        surface.set_header_opacity(header_opacity(percent, &self.config), duration);
    }

    pub fn pointer_up(&mut self, now: Millis) {
        if !self.mounted {
            return;
        }
        if let Some(generation) = self.drag.pointer_up() {
            self.agenda
                .schedule(now + self.config.drag_settle_ms as Millis, generation, Task::DragSettle);
        }
    }

    // ── Expand / collapse ────────────────────────────────────────────────────

    /// Thumbnail click: close whatever is open, otherwise open `index`.
    pub fn click<S>(&mut self, index: usize, now: Millis, surface: &mut S) -> Result<(), Rejection>
    where
        S: TrackSurface<Media = M>,
    {
        let result = if self.machine.is_idle() {
            self.request_open(index, now, surface)
        } else {
            self.request_close(now, surface)
        };
        if let Err(reason) = result {
            log::debug!("click on #{} ignored: {}", index, reason);
        }
        result
    }

    pub fn request_open<S>(&mut self, index: usize, now: Millis, surface: &mut S) -> Result<(), Rejection>
    where
        S: TrackSurface<Media = M>,
    {
        if !self.mounted {
            return Err(Rejection::Unmounted);
        }
        let token = self
            .machine
            .request_open(index, self.posts.len(), self.drag.is_dragging())?;
        // The press that delivered this click must not turn into a drag
        self.drag.cancel();
        self.info = Some(self.posts[index].info());
        surface.set_header_opacity(0.0, 0);
        self.run_open_phase(OpenPhase::DisperseSiblings, now, token, surface);
        Ok(())
    }

    fn run_open_phase<S>(&mut self, phase: OpenPhase, at: Millis, token: u64, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        let Some(index) = self.machine.presented_index() else { return };
        log::debug!("open #{}: {:?}", index, phase);

        match phase {
            OpenPhase::DisperseSiblings => {
                let shift = self.viewport.width;
                for i in (0..self.posts.len()).filter(|&i| i != index) {
                    let dx = if i < index { -shift } else { shift };
                    surface.translate_item(i, Point::new(dx, 0.0), self.config.disperse_ms);
                }
            }
            OpenPhase::RevealSelected => {
                let size = self.expanded_dimensions(index);
                self.expanded_size = Some(size);
                surface.resize_item(index, size, self.config.reveal_ms);
            }
            OpenPhase::RepositionSelected => {
                self.reposition(index, self.config.reposition_ms, surface);
            }
            OpenPhase::RevealInfo => {
                surface.set_info_panel(self.expanded_size, 1.0, self.config.info_ms);
                self.info_visible = true;
            }
            OpenPhase::MountMedia => {
                let post = &self.posts[index];
                if let (Some(kind), Some(src)) = (MediaKind::for_content(post.content_type), post.media_source()) {
                    match surface.item_rect(index) {
                        Some(frame) => {
                            self.media.mount(surface, kind, src, frame);
                        }
                        None => log::warn!("No element for #{}, skipping {:?}", index, kind),
                    }
                }
                self.machine.finish_open(token);
            }
        }

        if let (Some(next), Some(gap)) = (phase.next(), phase.gap_to_next(&self.config)) {
            self.agenda.schedule(at + gap as Millis, token, Task::Open(next));
        }
    }

    fn expanded_dimensions(&self, index: usize) -> Size {
        compute_expanded_dimensions(self.posts[index].aspect_ratio, self.viewport, self.orientation)
    }

    /// Move the expanded item to its resting place, relative to where it is now.
    fn reposition<S>(&mut self, index: usize, duration_ms: u32, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        let branch = LayoutBranch::select(self.posts[index].aspect_ratio, self.orientation);
        let Some(rect) = surface.item_rect(index) else {
            log::warn!("No element for #{}, cannot reposition", index);
            return;
        };
        let delta = compute_target_translation(branch, rect, self.viewport);
        let base = surface.item_offset(index);
        surface.translate_item(index, base + delta, duration_ms);
    }

    pub fn request_close<S>(&mut self, now: Millis, surface: &mut S) -> Result<(), Rejection>
    where
        S: TrackSurface<Media = M>,
    {
        if !self.mounted {
            return Err(Rejection::Unmounted);
        }
        let (index, token) = self.machine.request_close()?;

        self.media.teardown(surface);

        surface.set_info_panel(None, 0.0, self.config.info_fade_ms);
        self.info_visible = false;
        self.expanded_size = None;

        for i in 0..self.posts.len() {
            surface.translate_item(i, Point::ZERO, self.config.restore_siblings_ms);
        }
        let idle = idle_dimensions(self.posts[index].aspect_ratio, self.viewport, &self.config);
        surface.resize_item(index, idle, self.config.restore_selected_ms);
        surface.set_header_opacity(header_opacity(self.drag.offset(), &self.config), self.config.restore_header_ms);

        self.agenda
            .schedule(now + self.config.release_at_ms as Millis, token, Task::Close(ClosePhase::Release));
        self.agenda
            .schedule(now + self.config.close_total_ms() as Millis, token, Task::Close(ClosePhase::Complete));
        Ok(())
    }

    /// External "back" affordance.
    pub fn close_selected<S>(&mut self, now: Millis, surface: &mut S) -> Result<(), Rejection>
    where
        S: TrackSurface<Media = M>,
    {
        self.request_close(now, surface)
    }

    // ── Resize ───────────────────────────────────────────────────────────────

    /// Record a viewport change; layout catches up once resizing goes quiet.
    pub fn on_resize(&mut self, viewport: Viewport, now: Millis) {
        if !self.mounted {
            return;
        }
        self.live_viewport = viewport;
        self.resize_generation += 1;
        self.agenda.cancel_where(|e| matches!(e.task, Task::Resize(_)));
        self.agenda.schedule(
            now + self.config.resize_debounce_ms as Millis,
            self.resize_generation,
            Task::Resize(ResizeStep::Settle),
        );
    }

    fn run_resize_step<S>(&mut self, step: ResizeStep, at: Millis, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        let token = self.resize_generation;
        if step == ResizeStep::Settle {
            self.viewport = self.live_viewport;
            self.orientation = self.viewport.orientation(self.config.portrait_ratio);
            log::debug!("viewport settled: {}x{} {:?}", self.viewport.width, self.viewport.height, self.orientation);
        }
        let Some(index) = self.machine.presented_index() else { return };

        match step {
            ResizeStep::Settle => {
                let size = self.expanded_dimensions(index);
                self.expanded_size = Some(size);
                surface.resize_item(index, size, 0);
                self.agenda.schedule(
                    at + self.config.resize_position_delay_ms as Millis,
                    token,
                    Task::Resize(ResizeStep::Reposition),
                );
            }
            ResizeStep::Reposition => {
                self.reposition(index, 0, surface);
                self.agenda.schedule(
                    at + self.config.resize_finish_delay_ms as Millis,
                    token,
                    Task::Resize(ResizeStep::Finish),
                );
            }
            ResizeStep::Finish => {
                let opacity = if self.info_visible { 1.0 } else { 0.0 };
                surface.set_info_panel(self.expanded_size, opacity, 0);
                if let Some(frame) = surface.item_rect(index) {
                    self.media.place(surface, frame);
                }
            }
        }
    }

    // ── Timers ───────────────────────────────────────────────────────────────

    /// Run every step that has come due by `now`.
    pub fn tick<S>(&mut self, now: Millis, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        while self.mounted {
            let Some(entry) = self.agenda.pop_due(now) else { break };
            match entry.task {
                Task::Open(phase) => {
                    if self.machine.is_current(entry.token) {
                        self.run_open_phase(phase, entry.due, entry.token, surface);
                    }
                }
                Task::Close(ClosePhase::Release) => {
                    if self.machine.release(entry.token) {
                        self.info = None;
                    }
                }
                Task::Close(ClosePhase::Complete) => {
                    let closing = match self.machine.state() {
                        ExpandState::Closing { index, .. } => Some(index),
                        _ => None,
                    };
                    if self.machine.finish_close(entry.token) {
                        if let Some(index) = closing {
                            surface.release_item(index);
                            log::debug!("close #{} complete", index);
                        }
                    }
                }
                Task::DragSettle => {
                    self.drag.settle(entry.token);
                }
                Task::Resize(step) => {
                    if entry.token == self.resize_generation {
                        self.run_resize_step(step, entry.due, surface);
                    }
                }
            }
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Tear down: drop pending steps, remove media, clear every flag.
    pub fn unmount<S>(&mut self, surface: &mut S)
    where
        S: TrackSurface<Media = M>,
    {
        self.media.teardown(surface);
        if !self.mounted {
            return;
        }
        self.agenda.clear();
        self.machine.reset();
        self.drag.reset();
        self.info = None;
        self.info_visible = false;
        self.expanded_size = None;
        self.mounted = false;
        log::info!("Track unmounted");
    }

    // ── Likes ────────────────────────────────────────────────────────────────

    /// Optimistically flip a post's like. Returns the id and new value for
    /// the persistence callback.
    pub fn toggle_like(&mut self, index: usize) -> Option<(String, bool)> {
        if !self.mounted {
            return None;
        }
        let post = self.posts.get_mut(index)?;
        post.is_liked = !post.is_liked;
        Some((post.id.clone(), post.is_liked))
    }

    /// Undo a toggle after the persistence callback failed.
    pub fn revert_like(&mut self, id: &str) -> Option<bool> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.is_liked = !post.is_liked;
        Some(post.is_liked)
    }
}
