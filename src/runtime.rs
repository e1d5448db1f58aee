//! Owns the mounted track: controller, DOM surface, window listeners and the
//! single wake-up timer that drives the controller's agenda.
//!
//! Web objects aren't `Send`, so everything lives in a thread-local and the
//! view only holds `Copy` signals.

use std::cell::RefCell;

use leptos::ev;
use leptos::prelude::*;
use lookbook_core::geometry::LayoutBranch;
use lookbook_core::{InfoText, Millis, TrackConfig, TrackController, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom::DomSurface;
use crate::state::TrackState;

thread_local! {
    static TRACK: RefCell<Option<TrackRuntime>> = RefCell::new(None);
}

struct TrackRuntime {
    controller: TrackController<HtmlElement>,
    surface: DomSurface,
    state: TrackState,
    listeners: Vec<WindowListenerHandle>,
    /// Bumped whenever a new wake-up is armed; older timers fire into nothing.
    wake_generation: u64,
    armed_for: Option<Millis>,
}

impl TrackRuntime {
    /// Arm a timer for the agenda's next step unless one is already set for it.
    fn rearm(&mut self) -> Option<(u64, Millis)> {
        let Some(due) = self.controller.next_due() else {
            self.armed_for = None;
            return None;
        };
        if self.armed_for == Some(due) {
            return None;
        }
        self.wake_generation += 1;
        self.armed_for = Some(due);
        Some((self.wake_generation, due))
    }
}

/// Controller values the view reflects.
struct Snapshot {
    expanded: Option<usize>,
    info: Option<InfoText>,
    layout: Option<LayoutBranch>,
    is_dragging: bool,
    likes: Vec<bool>,
}

impl Snapshot {
    fn capture(controller: &TrackController<HtmlElement>) -> Self {
        let expanded = controller.expanded_index();
        let layout = expanded
            .and_then(|i| controller.posts().get(i))
            .map(|post| LayoutBranch::select(post.aspect_ratio, controller.orientation()));
        Self {
            expanded,
            info: controller.info().cloned(),
            layout,
            is_dragging: controller.is_dragging(),
            likes: controller.posts().iter().map(|p| p.is_liked).collect(),
        }
    }

    fn apply(self, state: &TrackState) {
        if state.expanded.get_untracked() != self.expanded {
            state.expanded.set(self.expanded);
        }
        if state.info.get_untracked() != self.info {
            state.info.set(self.info);
        }
        if state.layout.get_untracked() != self.layout {
            state.layout.set(self.layout);
        }
        if state.is_dragging.get_untracked() != self.is_dragging {
            state.is_dragging.set(self.is_dragging);
        }
        let stale = state
            .posts
            .with_untracked(|posts| posts.iter().map(|p| p.is_liked).ne(self.likes.iter().copied()));
        if stale {
            state.posts.update(|posts| {
                for (post, liked) in posts.iter_mut().zip(&self.likes) {
                    post.is_liked = *liked;
                }
            });
        }
    }
}

fn now_ms() -> Millis {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now) as Millis
}

fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::new(0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(width, height)
}

/// Run `f` against the mounted track, then push the resulting state to the
/// view and re-arm the wake-up timer. `None` when nothing is mounted.
fn with_track<R>(f: impl FnOnce(&mut TrackRuntime, Millis) -> R) -> Option<R> {
    let now = now_ms();
    let (result, state, snapshot, wake) = TRACK.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            log::warn!("Track busy, dropping re-entrant call");
            return None;
        };
        let rt = slot.as_mut()?;
        let result = f(rt, now);
        let snapshot = Snapshot::capture(&rt.controller);
        Some((result, rt.state, snapshot, rt.rearm()))
    })?;

    // Signals are written outside the borrow so effects can call back in.
    snapshot.apply(&state);
    if let Some((generation, due)) = wake {
        arm_timer(generation, due.saturating_sub(now));
    }
    Some(result)
}

fn arm_timer(generation: u64, delay: Millis) {
    let Some(window) = web_sys::window() else { return };
    let cb = Closure::once_into_js(move || wake(generation));
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay as i32) {
        log::error!("setTimeout failed: {:?}", e);
    }
}

fn wake(generation: u64) {
    with_track(|rt, now| {
        if rt.wake_generation != generation {
            return;
        }
        rt.armed_for = None;
        rt.controller.tick(now, &mut rt.surface);
    });
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_mounted() -> bool {
    TRACK.with(|cell| cell.try_borrow().map(|slot| slot.is_some()).unwrap_or(true))
}

pub fn mount(state: TrackState, surface: DomSurface, config: TrackConfig) {
    unmount();
    let controller = TrackController::new(state.posts.get_untracked(), viewport(), config);
    let listeners = vec![
        window_event_listener(ev::pointerdown, |e| pointer_down(e.client_x() as f64)),
        window_event_listener(ev::pointermove, |e| pointer_move(e.client_x() as f64)),
        window_event_listener(ev::pointerup, |_| pointer_up()),
        window_event_listener(ev::pointercancel, |_| pointer_up()),
        window_event_listener(ev::resize, |_| resize()),
    ];
    TRACK.with(|cell| {
        *cell.borrow_mut() = Some(TrackRuntime {
            controller,
            surface,
            state,
            listeners,
            wake_generation: 0,
            armed_for: None,
        });
    });
}

pub fn unmount() {
    let taken = TRACK.with(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()));
    let Some(mut rt) = taken else { return };
    rt.controller.unmount(&mut rt.surface);
    for listener in rt.listeners {
        listener.remove();
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

fn pointer_down(x: f64) {
    with_track(|rt, _| {
        let _ = rt.controller.pointer_down(x);
    });
}

fn pointer_move(x: f64) {
    with_track(|rt, _| {
        rt.controller.pointer_move(x, &mut rt.surface);
    });
}

fn pointer_up() {
    with_track(|rt, now| rt.controller.pointer_up(now));
}

fn resize() {
    let vp = viewport();
    with_track(|rt, now| rt.controller.on_resize(vp, now));
}

/// Thumbnail click: opens when idle, closes otherwise.
pub fn click(index: usize) {
    with_track(|rt, now| {
        let _ = rt.controller.click(index, now, &mut rt.surface);
    });
}

pub fn close_selected() {
    with_track(|rt, now| {
        if let Err(reason) = rt.controller.close_selected(now, &mut rt.surface) {
            log::debug!("close ignored: {}", reason);
        }
    });
}

// ── Likes ────────────────────────────────────────────────────────────────────

/// Flip a post's like locally. Returns the post id and new value.
pub fn toggle_like(index: usize) -> Option<(String, bool)> {
    with_track(|rt, _| rt.controller.toggle_like(index)).flatten()
}

pub fn revert_like(post_id: &str) {
    with_track(|rt, _| {
        if rt.controller.revert_like(post_id).is_none() {
            log::warn!("Cannot revert like for unknown post {}", post_id);
        }
    });
}
