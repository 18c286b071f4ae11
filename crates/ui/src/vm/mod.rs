mod chat_vm;
mod guide_vm;
mod markdown_vm;

pub use chat_vm::{CHAT_GREETING, ChatBodyVm, ChatMessageVm, ChatVm, map_chat};
pub use guide_vm::{
    ProgressVm, StepDetailVm, StepTabVm, map_progress, map_step_detail, map_step_tabs,
};
pub use markdown_vm::{markdown_to_html, normalize_markdown, sanitize_html};
