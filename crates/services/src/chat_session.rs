use guide_core::model::{ChatHistory, ChatMessage};

/// Handle for one in-flight advice request.
///
/// Carries the query as typed and the session generation it was issued in.
/// A ticket from an older generation can no longer append to the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceTicket {
    generation: u64,
    query: String,
}

impl AdviceTicket {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    Appended,
    /// The ticket was superseded by `clear` or `cancel_pending`.
    Discarded,
}

/// Chat transcript plus the single-request-in-flight gate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatSession {
    history: ChatHistory,
    generation: u64,
    pending: bool,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start a request for `input`.
    ///
    /// Returns `None` (and changes nothing) when the input is blank or a request
    /// is already pending. Otherwise appends the user message immediately.
    pub fn begin(&mut self, input: &str) -> Option<AdviceTicket> {
        if input.trim().is_empty() || self.pending {
            return None;
        }
        self.history.push(ChatMessage::user(input));
        self.generation += 1;
        self.pending = true;
        Some(AdviceTicket {
            generation: self.generation,
            query: input.to_string(),
        })
    }

    /// Deliver the reply for `ticket`. A ticket settles at most once.
    pub fn settle(&mut self, ticket: &AdviceTicket, reply: impl Into<String>) -> Settled {
        if !self.pending || ticket.generation != self.generation {
            return Settled::Discarded;
        }
        self.history.push(ChatMessage::bot(reply));
        self.pending = false;
        Settled::Appended
    }

    /// Abandon the in-flight request, keeping the transcript.
    pub fn cancel_pending(&mut self) {
        if self.pending {
            self.generation += 1;
            self.pending = false;
        }
    }

    /// Drop the transcript and any in-flight request.
    pub fn clear(&mut self) {
        self.history.clear();
        self.generation += 1;
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide_core::model::ChatRole;

    #[test]
    fn blank_input_is_ignored() {
        let mut chat = ChatSession::new();
        assert_eq!(chat.begin("   \n\t"), None);
        assert!(chat.history().is_empty());
        assert!(!chat.is_pending());
    }

    #[test]
    fn second_send_while_pending_is_refused() {
        let mut chat = ChatSession::new();
        let ticket = chat.begin("  What is a profile code? ").unwrap();
        assert_eq!(ticket.query(), "  What is a profile code? ");
        assert_eq!(chat.history().messages()[0].text, "  What is a profile code? ");
        assert_eq!(chat.begin("another"), None);
        assert_eq!(chat.history().len(), 1);

        assert_eq!(chat.settle(&ticket, "It is a 10-digit code."), Settled::Appended);
        assert!(!chat.is_pending());
        let roles: Vec<_> = chat.history().messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Bot]);
    }

    #[test]
    fn reply_after_clear_is_discarded() {
        let mut chat = ChatSession::new();
        let ticket = chat.begin("hello").unwrap();
        chat.clear();
        assert_eq!(chat.settle(&ticket, "late"), Settled::Discarded);
        assert!(chat.history().is_empty());
        assert!(chat.begin("again").is_some());
    }

    #[test]
    fn ticket_settles_once() {
        let mut chat = ChatSession::new();
        let ticket = chat.begin("hello").unwrap();
        assert_eq!(chat.settle(&ticket, "first"), Settled::Appended);
        assert_eq!(chat.settle(&ticket, "second"), Settled::Discarded);
        assert_eq!(chat.history().len(), 2);
    }

    #[test]
    fn cancel_keeps_transcript_but_drops_reply() {
        let mut chat = ChatSession::new();
        let ticket = chat.begin("hello").unwrap();
        chat.cancel_pending();
        assert_eq!(chat.settle(&ticket, "late"), Settled::Discarded);
        assert_eq!(chat.history().len(), 1);
    }
}
