mod actions;
mod side_panel;
mod steps;
mod video;

use dioxus::prelude::*;
use guide_core::model::StepId;
use services::GuideState;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{map_progress, map_step_detail, map_step_tabs};

pub(crate) use actions::persist;
use side_panel::SidePanel;
use steps::{StepDetail, StepNav, StepTab};
use video::VideoModal;

#[component]
pub fn GuideView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<Signal<GuideState>>();
    let error = use_signal(|| None::<ViewError>);
    let mut show_video = use_signal(|| false);

    let (tabs, detail, progress) = {
        let guard = state.read();
        (
            map_step_tabs(&guard),
            map_step_detail(&guard),
            map_progress(&guard),
        )
    };

    let on_select = use_callback(move |id: u32| {
        let mut state = state;
        let mut error = error;
        let result = state.write().select_step(StepId::new(id));
        error.set(result.err().map(ViewError::from));
    });

    let on_toggle = {
        let store = ctx.progress_store();
        use_callback(move |id: u32| {
            let mut state = state;
            let mut error = error;
            let result = state.write().toggle_completion(StepId::new(id));
            match result {
                Ok(change) => {
                    error.set(None);
                    persist(store.clone(), state, change.pending_write);
                }
                Err(err) => error.set(Some(ViewError::from(err))),
            }
        })
    };

    let on_next = {
        let store = ctx.progress_store();
        use_callback(move |()| {
            let mut state = state;
            let step = state.write().next();
            persist(store.clone(), state, step.pending_write);
        })
    };

    let on_previous = use_callback(move |()| {
        let mut state = state;
        state.write().previous();
    });

    let on_reset = {
        let store = ctx.progress_store();
        use_callback(move |()| {
            let mut state = state;
            let snapshot = state.write().reset_progress();
            persist(store.clone(), state, snapshot);
        })
    };

    let video_title = detail.title.clone();
    let video_url = detail.video_url.clone();
    let video_prompt = detail.video_prompt.clone();

    rsx! {
        div { class: "page guide-page",
            nav { class: "step-tabs", role: "tablist", aria_label: "Registration steps",
                for tab in tabs {
                    StepTab { key: "{tab.id}", tab: tab.clone(), on_select: on_select }
                }
            }
            if let Some(err) = error() {
                p { class: "banner banner-error", role: "alert", "{err.message()}" }
            }
            div { class: "guide-layout",
                section { class: "guide-main",
                    StepDetail {
                        detail: detail.clone(),
                        on_toggle: on_toggle,
                        on_watch: move |()| show_video.set(true),
                    }
                    StepNav {
                        detail: detail.clone(),
                        on_previous: on_previous,
                        on_next: on_next,
                    }
                }
                SidePanel {
                    progress: progress.clone(),
                    content: ctx.content(),
                    on_reset: on_reset,
                }
            }
            if show_video() {
                if let Some(url) = video_url {
                    VideoModal {
                        title: video_title,
                        url,
                        prompt: video_prompt,
                        on_close: move |()| show_video.set(false),
                    }
                }
            }
        }
    }
}
