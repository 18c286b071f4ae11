use dioxus::prelude::*;
use guide_core::catalog::GuideContent;

use crate::vm::ProgressVm;

#[component]
pub(super) fn SidePanel(
    progress: ProgressVm,
    content: GuideContent,
    on_reset: EventHandler<()>,
) -> Element {
    rsx! {
        aside { class: "side-panel",
            section { class: "panel-card progress-card",
                h3 { "Your progress" }
                div {
                    class: "progress-bar",
                    role: "progressbar",
                    aria_valuemin: "0",
                    aria_valuemax: "100",
                    aria_valuenow: "{progress.percent}",
                    div { class: "progress-bar__fill", style: "width: {progress.percent}%" }
                }
                p { class: "progress-card__percent", "{progress.percent}%" }
                p { class: "progress-card__summary", "{progress.summary()}" }
                if progress.completed > 0 {
                    button {
                        class: "btn btn-link",
                        id: "progress-reset",
                        r#type: "button",
                        onclick: move |_| on_reset.call(()),
                        "Start over"
                    }
                }
            }
            section { class: "panel-card",
                h3 { "Quick requirements" }
                ul { class: "requirements",
                    for item in content.requirements.iter() {
                        li { key: "{item}", "{item}" }
                    }
                }
            }
            section { class: "panel-card",
                h3 { "Important dates" }
                ul { class: "key-dates",
                    for date in content.key_dates.iter() {
                        li {
                            key: "{date.label}",
                            class: if date.urgent { "key-date key-date--urgent" } else { "key-date" },
                            span { class: "key-date__label", "{date.label}" }
                            span { class: "key-date__when", "{date.when}" }
                        }
                    }
                }
            }
        }
    }
}
