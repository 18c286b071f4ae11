use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::context::AppContext;
use crate::views::{ChatWidget, GuideView, InstallDialog, StorageBanner};
use services::GuideState;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", GuideView)] Guide {},
}

/// Owns the application `GuideState` and shares it with every view below it.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    use_context_provider(|| Signal::<GuideState>::new(ctx.initial_state()));
    let mut show_install = use_signal(|| false);

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div { class: "app-header__brand",
                    span { class: "app-header__logo", "J" }
                    div {
                        h1 { "JAMB 2026 Guide" }
                        p { class: "app-header__tagline", "Step-by-step UTME registration" }
                    }
                }
                button {
                    class: "btn btn-ghost",
                    id: "install-open",
                    r#type: "button",
                    onclick: move |_| show_install.set(true),
                    "Install app"
                }
            }
            StorageBanner {}
            main { class: "content",
                Outlet::<Route> {}
            }
            ChatWidget {}
            if show_install() {
                InstallDialog { on_close: move |()| show_install.set(false) }
            }
        }
    }
}
