use leptos::html;
use leptos::prelude::*;
use lookbook_core::{AspectRatio, CollectionInfo, TrackConfig};

use crate::components::header::Header;
use crate::components::info_panel::InfoPanel;
use crate::dom::DomSurface;
use crate::runtime;
use crate::state::TrackState;

#[component]
pub fn Track(
    config: TrackConfig,
    collection: CollectionInfo,
    user_to_view: Option<String>,
    /// Persist a like; receives the post id after the local flip.
    on_like: Callback<String>,
) -> impl IntoView {
    let state = expect_context::<TrackState>();

    let track_ref = NodeRef::<html::Div>::new();
    let header_ref = NodeRef::<html::Div>::new();
    let panel_ref = NodeRef::<html::Div>::new();
    let audio_ref = NodeRef::<html::Div>::new();

    // The post list is fixed for the lifetime of the track; likes only
    // update flags, so items render once.
    let posts = state.posts.get_untracked();
    let image_refs: Vec<NodeRef<html::Img>> = posts.iter().map(|_| NodeRef::new()).collect();

    let items = posts
        .into_iter()
        .zip(image_refs.iter().copied())
        .enumerate()
        .map(|(index, (post, image_ref))| {
            view! {
                <img
                    class="track-image"
                    class:wide={post.aspect_ratio == AspectRatio::Wide}
                    src=post.image
                    alt=post.title
                    draggable="false"
                    node_ref=image_ref
                    on:click=move |_| runtime::click(index)
                />
            }
        })
        .collect_view();

    // Hand the rendered elements to the runtime once they all exist
    Effect::new(move || {
        let (Some(track), Some(header), Some(panel), Some(audio)) =
            (track_ref.get(), header_ref.get(), panel_ref.get(), audio_ref.get())
        else {
            return;
        };
        let Some(images) = image_refs.iter().map(|r| r.get()).collect::<Option<Vec<_>>>() else {
            return;
        };
        if runtime::is_mounted() {
            return;
        }
        let surface = DomSurface::new(
            track.into(),
            header.into(),
            panel.into(),
            audio.into(),
            images.into_iter().map(Into::into).collect(),
        );
        runtime::mount(state, surface, config.clone());
    });

    on_cleanup(runtime::unmount);

    view! {
        <div class="lookbook" class:dragging=move || state.is_dragging.get()>
            <Header header_ref=header_ref collection=collection user_to_view=user_to_view />
            <div class="image-track" node_ref=track_ref>
                {items}
            </div>
            <InfoPanel panel_ref=panel_ref audio_ref=audio_ref on_like=on_like />
        </div>
    }
}
