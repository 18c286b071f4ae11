use guide_core::model::{ChatMessage, ChatRole};
use services::ChatSession;

use crate::vm::markdown_vm::markdown_to_html;

/// Greeting shown above an empty transcript.
pub const CHAT_GREETING: &str =
    "Hi! Ask me anything about JAMB 2026 registration: NIN, profile codes, e-PINs or deadlines.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatBodyVm {
    /// User text, rendered verbatim.
    Plain(String),
    /// Bot reply rendered from markdown and sanitized.
    Html(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessageVm {
    pub from_user: bool,
    pub body: ChatBodyVm,
}

impl From<&ChatMessage> for ChatMessageVm {
    fn from(message: &ChatMessage) -> Self {
        match message.role {
            ChatRole::User => Self {
                from_user: true,
                body: ChatBodyVm::Plain(message.text.clone()),
            },
            ChatRole::Bot => Self {
                from_user: false,
                body: ChatBodyVm::Html(markdown_to_html(&message.text)),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    pub messages: Vec<ChatMessageVm>,
    pub pending: bool,
}

impl ChatVm {
    #[must_use]
    pub fn can_send(&self, draft: &str) -> bool {
        !self.pending && !draft.trim().is_empty()
    }
}

#[must_use]
pub fn map_chat(session: &ChatSession) -> ChatVm {
    ChatVm {
        messages: session
            .history()
            .messages()
            .iter()
            .map(ChatMessageVm::from)
            .collect(),
        pending: session.is_pending(),
    }
}
