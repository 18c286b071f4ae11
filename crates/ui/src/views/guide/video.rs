use dioxus::prelude::*;

#[component]
pub(super) fn VideoModal(
    title: String,
    url: String,
    prompt: Option<String>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal video-modal",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "video-modal-title",
                header { class: "modal__header",
                    h2 { id: "video-modal-title", "Video guide: {title}" }
                    button {
                        class: "btn btn-ghost",
                        id: "video-close",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                div { class: "video-frame",
                    iframe {
                        src: "{url}",
                        title: "{title}",
                        allow: "accelerometer; autoplay; clipboard-write; encrypted-media; picture-in-picture",
                        allowfullscreen: true,
                    }
                }
                if let Some(prompt) = prompt {
                    p { class: "video-caption", "{prompt}" }
                }
            }
        }
    }
}
