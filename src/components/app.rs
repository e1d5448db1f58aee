use leptos::prelude::*;
use lookbook_core::Gallery;

use crate::components::track::Track;
use crate::likes;
use crate::state::{TrackHandle, TrackState};

const GALLERY_JSON: &str = include_str!("../../assets/gallery.json");

#[component]
pub fn App() -> impl IntoView {
    let mut gallery = match Gallery::from_json(GALLERY_JSON) {
        Ok(g) => g,
        Err(e) => {
            log::error!("Invalid gallery document: {}", e);
            return view! {
                <div class="empty-state">"Gallery unavailable"</div>
            }
            .into_any();
        }
    };
    likes::load().apply(&mut gallery.posts);

    let state = TrackState::new(gallery.posts, gallery.is_logged_in);
    provide_context(state);
    let handle = state.handle();

    let on_like = Callback::new(move |post_id: String| persist_like(state, handle, post_id));
    let collection_title = gallery.collection.title.clone();
    let theme = gallery.collection.theme.clone();

    view! {
        <div class="app" data-theme=theme>
            <Breadcrumb collection_title=collection_title handle=handle />
            <Track
                config=gallery.track
                collection=gallery.collection
                user_to_view=gallery.user_to_view
                on_like=on_like
            />
        </div>
    }
    .into_any()
}

fn persist_like(state: TrackState, handle: TrackHandle, post_id: String) {
    let liked = state
        .posts
        .with_untracked(|posts| posts.iter().find(|p| p.id == post_id).map(|p| p.is_liked));
    let Some(liked) = liked else { return };
    match likes::persist(&post_id, liked) {
        Ok(()) => log::info!("Post {} {}", post_id, if liked { "liked" } else { "unliked" }),
        Err(e) => {
            log::warn!("Could not save like for {}: {}", post_id, e);
            handle.revert_like(&post_id);
        }
    }
}

/// "Collection › Post" trail with a back button that closes the expanded post.
#[component]
fn Breadcrumb(collection_title: String, handle: TrackHandle) -> impl IntoView {
    let state = expect_context::<TrackState>();

    let current = move || {
        let index = handle.expanded.get()?;
        state.posts.with(|posts| posts.get(index).map(|p| p.title.clone()))
    };

    view! {
        <nav class="breadcrumb">
            <span class="crumb">{collection_title}</span>
            {move || current().map(|title| view! {
                <span class="crumb-sep">"\u{203a}"</span>
                <span class="crumb current">{title}</span>
                <button class="back-button" on:click=move |_| handle.close_selected()>"Back"</button>
            })}
        </nav>
    }
}
