use dioxus::prelude::*;

use crate::vm::{StepDetailVm, StepTabVm};

#[component]
pub(super) fn StepTab(tab: StepTabVm, on_select: EventHandler<u32>) -> Element {
    let class = match (tab.active, tab.completed) {
        (true, _) => "step-tab step-tab--active",
        (false, true) => "step-tab step-tab--done",
        (false, false) => "step-tab",
    };
    let id = tab.id;

    rsx! {
        button {
            class: "{class}",
            id: "step-tab-{id}",
            r#type: "button",
            role: "tab",
            aria_selected: "{tab.active}",
            onclick: move |_| on_select.call(id),
            span { class: "step-tab__number",
                if tab.completed { "✓" } else { "{tab.number}" }
            }
            span { class: "step-tab__label", "{tab.label}" }
        }
    }
}

#[component]
pub(super) fn StepDetail(
    detail: StepDetailVm,
    on_toggle: EventHandler<u32>,
    on_watch: EventHandler<()>,
) -> Element {
    let id = detail.id;
    let toggle_label = if detail.completed {
        "Completed ✓"
    } else {
        "Mark as complete"
    };
    let toggle_class = if detail.completed {
        "btn btn-success"
    } else {
        "btn btn-outline"
    };

    rsx! {
        article { class: "step-card", id: "step-detail",
            header { class: "step-card__header {detail.color}",
                span { class: "step-card__icon", "{detail.icon}" }
                div {
                    p { class: "step-card__position", "{detail.position_label}" }
                    h2 { class: "step-card__title", "{detail.title}" }
                    p { class: "step-card__description", "{detail.description}" }
                }
            }
            div { class: "step-card__body",
                section { class: "step-section",
                    h3 { "What to do" }
                    for (index, line) in detail.detailed_content.iter().enumerate() {
                        p { key: "{index}", class: "step-text", "{line}" }
                    }
                }
                section { class: "step-section",
                    h3 { "Checklist" }
                    ul { class: "checklist",
                        for (index, item) in detail.checklist.iter().enumerate() {
                            li { key: "{index}", class: "checklist__item", "{item}" }
                        }
                    }
                }
                if !detail.tips.is_empty() {
                    section { class: "step-section step-tips",
                        h3 { "Pro tips" }
                        ul {
                            for (index, tip) in detail.tips.iter().enumerate() {
                                li { key: "{index}", "{tip}" }
                            }
                        }
                    }
                }
            }
            footer { class: "step-card__footer",
                button {
                    class: toggle_class,
                    id: "step-toggle",
                    r#type: "button",
                    aria_pressed: "{detail.completed}",
                    onclick: move |_| on_toggle.call(id),
                    "{toggle_label}"
                }
                if detail.video_url.is_some() {
                    button {
                        class: "btn btn-ghost",
                        id: "step-video",
                        r#type: "button",
                        onclick: move |_| on_watch.call(()),
                        "Watch video guide"
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn StepNav(
    detail: StepDetailVm,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    let next_label = if detail.is_last { "Finish" } else { "Next step" };

    rsx! {
        div { class: "step-nav",
            button {
                class: "btn btn-outline",
                id: "step-previous",
                r#type: "button",
                disabled: detail.is_first,
                onclick: move |_| on_previous.call(()),
                "Previous"
            }
            button {
                class: "btn btn-primary",
                id: "step-next",
                r#type: "button",
                disabled: !detail.can_advance,
                onclick: move |_| on_next.call(()),
                "{next_label}"
            }
        }
        if detail.finished {
            p { class: "banner banner-success", role: "status",
                "You have reached the end of the guide. Good luck with your exam!"
            }
        }
    }
}
