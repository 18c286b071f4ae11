use dioxus::prelude::*;
use services::GuideState;

use crate::context::AppContext;
use crate::vm::{CHAT_GREETING, ChatBodyVm, ChatMessageVm, map_chat};

/// Floating assistant panel. Only chat input is locked while a reply is pending.
#[component]
pub fn ChatWidget(#[props(default)] start_open: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<Signal<GuideState>>();
    let mut open = use_signal(move || start_open);
    let mut draft = use_signal(String::new);

    let chat = map_chat(state.read().chat());
    let can_send = chat.can_send(&draft.read());

    let send = {
        let advice = ctx.advice();
        use_callback(move |()| {
            let mut state = state;
            let mut draft = draft;
            let input = draft.peek().clone();
            let Some(ticket) = state.write().chat_mut().begin(&input) else {
                return;
            };
            draft.set(String::new());

            let advice = advice.clone();
            spawn(async move {
                let reply = advice.get_advice(ticket.query()).await;
                state.write().chat_mut().settle(&ticket, reply);
            });
        })
    };

    let close = use_callback(move |()| {
        let mut state = state;
        let mut open = open;
        state.write().chat_mut().cancel_pending();
        open.set(false);
    });

    let clear = use_callback(move |()| {
        let mut state = state;
        state.write().chat_mut().clear();
    });

    if !open() {
        return rsx! {
            button {
                class: "chat-launcher",
                id: "chat-open",
                r#type: "button",
                aria_label: "Open JAMB assistant",
                onclick: move |_| open.set(true),
                "Ask the JAMB assistant"
            }
        };
    }

    rsx! {
        section { class: "chat-panel", id: "chat-panel", aria_label: "JAMB assistant",
            header { class: "chat-panel__header",
                h2 { "JAMB assistant" }
                div { class: "chat-panel__actions",
                    button {
                        class: "btn btn-link",
                        id: "chat-clear",
                        r#type: "button",
                        disabled: chat.messages.is_empty() && !chat.pending,
                        onclick: move |_| clear.call(()),
                        "New chat"
                    }
                    button {
                        class: "btn btn-ghost",
                        id: "chat-close",
                        r#type: "button",
                        onclick: move |_| close.call(()),
                        "Close"
                    }
                }
            }
            div { class: "chat-log", role: "log", aria_live: "polite",
                div { class: "chat-msg chat-msg--bot", p { "{CHAT_GREETING}" } }
                for (index, message) in chat.messages.iter().enumerate() {
                    ChatBubble { key: "{index}", message: message.clone() }
                }
                if chat.pending {
                    div { class: "chat-msg chat-msg--bot chat-thinking", "Thinking..." }
                }
            }
            div { class: "chat-input",
                input {
                    id: "chat-draft",
                    r#type: "text",
                    placeholder: "Ask about NIN, profile codes, e-PIN...",
                    value: "{draft}",
                    disabled: chat.pending,
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.data.key() == Key::Enter {
                            evt.prevent_default();
                            send.call(());
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    id: "chat-send",
                    r#type: "button",
                    disabled: !can_send,
                    onclick: move |_| send.call(()),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn ChatBubble(message: ChatMessageVm) -> Element {
    let class = if message.from_user {
        "chat-msg chat-msg--user"
    } else {
        "chat-msg chat-msg--bot"
    };

    rsx! {
        div { class: "{class}",
            match message.body {
                ChatBodyVm::Plain(text) => rsx! { p { "{text}" } },
                ChatBodyVm::Html(html) => rsx! {
                    div { class: "chat-markdown", dangerous_inner_html: "{html}" }
                },
            }
        }
    }
}
