use dioxus::prelude::*;
use services::GuideState;

use crate::vm::map_progress;

/// Warns that progress is only being kept in memory.
#[component]
pub fn StorageBanner() -> Element {
    let state = use_context::<Signal<GuideState>>();
    let progress = map_progress(&state.read());

    if !progress.degraded {
        return rsx! {};
    }

    rsx! {
        p { class: "banner banner-warning", id: "storage-banner", role: "status",
            "Progress can't be saved right now. "
            "Your changes will last until you close the app."
        }
    }
}
