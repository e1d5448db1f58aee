use leptos::html;
use leptos::prelude::*;
use lookbook_core::geometry::LayoutBranch;

use crate::runtime;
use crate::state::TrackState;

/// Title, description and like button of the expanded post. Size and
/// opacity are driven by the track surface; audio players land in the
/// `info-media` slot.
#[component]
pub fn InfoPanel(
    panel_ref: NodeRef<html::Div>,
    audio_ref: NodeRef<html::Div>,
    on_like: Callback<String>,
) -> impl IntoView {
    let state = expect_context::<TrackState>();

    let stacked = move || state.layout.get().is_some_and(LayoutBranch::is_stacked);

    let liked = move || {
        let index = state.expanded.get()?;
        state.posts.with(|posts| posts.get(index).map(|p| p.is_liked))
    };

    let on_like_click = move |_: web_sys::MouseEvent| {
        let Some(index) = state.expanded.get_untracked() else { return };
        if let Some((post_id, _)) = runtime::toggle_like(index) {
            on_like.run(post_id);
        }
    };

    view! {
        <div class="info-panel" class:stacked=stacked node_ref=panel_ref>
            {move || {
                state.info.get().map(|info| {
                    view! {
                        <h2 class="info-title">{info.title}</h2>
                        <p class="info-description">{info.description}</p>
                    }
                })
            }}
            <Show when=move || state.is_logged_in.get() && liked().is_some()>
                <button
                    class="like-button"
                    class:liked=move || liked().unwrap_or(false)
                    on:click=on_like_click
                >
                    {move || if liked().unwrap_or(false) { "\u{2665} Liked" } else { "\u{2661} Like" }}
                </button>
            </Show>
            <div class="info-media" node_ref=audio_ref></div>
        </div>
    }
}
