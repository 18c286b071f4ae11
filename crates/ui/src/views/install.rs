use dioxus::prelude::*;

use crate::context::AppContext;

/// "Install as app" instructions for phone browsers.
#[component]
pub fn InstallDialog(on_close: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let steps = ctx.content().install_steps;

    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal install-modal",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "install-modal-title",
                header { class: "modal__header",
                    h2 { id: "install-modal-title", "Install this guide" }
                    button {
                        class: "btn btn-ghost",
                        id: "install-close",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                p { "Keep the guide one tap away on your phone:" }
                ol { class: "install-steps",
                    for (index, step) in steps.iter().enumerate() {
                        li { key: "{index}", "{step}" }
                    }
                }
            }
        }
    }
}
