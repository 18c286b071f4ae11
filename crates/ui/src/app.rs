use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Title { "JAMB 2026 Registration Guide" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal", role: "alert",
                        h1 { "The guide couldn't load" }
                        p { "Restart the app. Your saved progress is kept on this device." }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
