use leptos::html;
use leptos::prelude::*;
use lookbook_core::CollectionInfo;

/// Collection title overlay. Its opacity belongs to the track surface: it
/// fades with scroll and hides while a post is expanded.
#[component]
pub fn Header(
    header_ref: NodeRef<html::Div>,
    collection: CollectionInfo,
    user_to_view: Option<String>,
) -> impl IntoView {
    view! {
        <div class="track-header" node_ref=header_ref>
            <h1 class="track-title">{collection.title}</h1>
            <p class="track-subtitle">{collection.subtitle}</p>
            {user_to_view.map(|user| view! { <p class="track-owner">{format!("by {user}")}</p> })}
        </div>
    }
}
