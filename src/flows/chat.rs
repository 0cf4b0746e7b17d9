use crate::api::{report_failure, ApiError, ChatApi, ChatPayload, ChatReply, ChatResource};
use crate::resource::{Ticket, TicketCounter};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub const WELCOME: &str = "Welcome to CalmVerse Mental Health Support. How are you feeling today?";
const SEND_FAILED: &str = "Sorry, there was an error processing your message. Please try again.";

/// One-click conversation starters
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "I've been feeling anxious lately",
    "How can I improve my sleep?",
    "I'm having trouble focusing",
    "What are some mindfulness exercises?",
    "I feel overwhelmed with work",
];

/// Always-visible sidebar topics: (name, description)
pub const GENERAL_RESOURCES: &[(&str, &str)] = &[
    ("Breathing Techniques", "Simple breathing exercises to reduce stress and anxiety"),
    ("Sleep Improvement Guide", "Tips and practices for better sleep quality"),
    ("Meditation Basics", "Introduction to meditation for beginners"),
    ("Journaling Prompts", "Thoughtful prompts to guide your reflection practice"),
    ("Crisis Resources", "Important contacts for immediate support"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    System,
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub emergency: bool,
}

impl ChatMessage {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp: Utc::now(),
            emergency: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub ticket: Ticket,
    pub payload: ChatPayload,
}

/// Random per-visit identity, `user-` plus eight hex characters
pub fn anonymous_user_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("user-{}", &id[..8])
}

/// Conversation transcript and session bookkeeping
#[derive(Debug, Clone)]
pub struct ChatSession {
    user_id: String,
    session_id: Option<String>,
    messages: Vec<ChatMessage>,
    resources: Vec<ChatResource>,
    sending: bool,
    tickets: TicketCounter,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(anonymous_user_id())
    }
}

impl ChatSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: None,
            messages: vec![ChatMessage::new(Sender::System, WELCOME)],
            resources: Vec::new(),
            sending: false,
            tickets: TicketCounter::default(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn resources(&self) -> &[ChatResource] {
        &self.resources
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Append the user's message and build the request. Blank text and sends
    /// while a reply is pending are ignored.
    pub fn begin_send(&mut self, text: &str) -> Option<SendRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if self.sending {
            debug!("Reply still pending, ignoring message");
            return None;
        }

        self.messages.push(ChatMessage::new(Sender::User, text));
        self.sending = true;

        Some(SendRequest {
            ticket: self.tickets.issue(),
            payload: ChatPayload {
                message: text.to_string(),
                user_id: self.user_id.clone(),
                session_id: self.session_id.clone(),
            },
        })
    }

    /// Apply a reply. Returns false when the conversation was reset meanwhile.
    pub fn finish_send(&mut self, request: &SendRequest, result: Result<ChatReply, ApiError>) -> bool {
        if !self.tickets.is_current(request.ticket) {
            debug!("Discarding reply for a superseded conversation");
            return false;
        }
        self.sending = false;

        match result {
            Ok(reply) => {
                self.session_id = Some(reply.session_id);
                if let Some(resources) = reply.resources.filter(|r| !r.is_empty()) {
                    self.resources = resources;
                }
                let mut message = ChatMessage::new(Sender::Bot, reply.response);
                message.emergency = reply.emergency_contact;
                self.messages.push(message);
            }
            Err(e) => {
                report_failure("Chat message", &e);
                self.messages.push(ChatMessage::new(Sender::System, SEND_FAILED));
            }
        }
        true
    }

    /// Start over. Returns the session that should be ended on the server, if any.
    pub fn reset(&mut self) -> Option<String> {
        self.tickets.invalidate();
        self.sending = false;
        self.resources.clear();
        self.messages = vec![ChatMessage::new(Sender::System, WELCOME)];
        self.session_id.take()
    }

    pub async fn send(&mut self, api: &dyn ChatApi, text: &str) -> bool {
        let Some(request) = self.begin_send(text) else {
            return false;
        };
        let result = api.send(&request.payload).await;
        self.finish_send(&request, result)
    }

    /// Reset and end the old server-side session. Ending is best effort.
    pub async fn restart(&mut self, api: &dyn ChatApi) {
        if let Some(session_id) = self.reset() {
            match api.end_session(&session_id).await {
                Ok(()) => info!("✓ Ended chat session {}", session_id),
                Err(e) => report_failure("Ending chat session", &e),
            }
        }
    }
}
