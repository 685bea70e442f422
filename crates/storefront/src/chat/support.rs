//! Customer support conversation.

use sportswear_store_core::ChatRole;

use super::client::ChatCompletion;
use super::types::ChatMessage;
use crate::models::User;

/// Prior messages included in each prompt.
pub const HISTORY_WINDOW: usize = 5;

const SYSTEM_PROMPT: &str = "\
You are the shopping assistant of SPORTSWEARstore, an online shop selling premium sports jerseys.

Your responsibilities:
- Help customers find the right jersey for their needs
- Give detailed product information (sizes, materials, fabric technologies)
- Recommend products based on favourite teams, sports and budget
- Help with orders and deliveries
- Give sizing and care advice

Your style: professional but warm, passionate about sport, responsive. Use fitting sports emojis.
Always answer in the customer's language.

Knowledge base:
- Football jerseys from the biggest clubs (Real Madrid, Barcelona, Arsenal, Liverpool, Bayern, PSG)
- NBA jerseys (Lakers, Warriors)
- Fabric technologies (Dri-FIT, Aeroready, HEAT.RDY)
- Partner brands (Nike, Adidas)
- Returns, delivery and sizing policies";

const FALLBACK_REPLY: &str = "\
Sorry, I'm having a technical problem right now. 😅

In the meantime you can:
📞 Call us on +33 1 23 45 67 89
📧 Write to contact@sportswearstore.fr
💬 Try rephrasing your question

Our team is available 7 days a week from 9am to 6pm!";

/// A support conversation: transcript plus prompt assembly.
#[derive(Debug, Clone)]
pub struct SupportChat {
    messages: Vec<ChatMessage>,
}

impl SupportChat {
    /// Start a conversation with a welcome message addressed to `user`.
    #[must_use]
    pub fn new(user: Option<&User>) -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, welcome_message(user))],
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Prompt sent for `question`, given the transcript so far.
    #[must_use]
    pub fn build_prompt(&self, question: &str, user: Option<&User>) -> String {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        let history = self
            .messages
            .iter()
            .skip(start)
            .map(|message| {
                let speaker = match message.role {
                    ChatRole::User => "Customer",
                    ChatRole::Assistant => "Assistant",
                };
                format!("{speaker}: {}", message.content)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let visitor = user.map_or_else(
            || "Guest (not signed in)".to_string(),
            |user| {
                let name = if user.display_name.is_empty() {
                    "User"
                } else {
                    user.display_name.as_str()
                };
                format!("{name} ({})", user.email)
            },
        );

        format!(
            "{SYSTEM_PROMPT}\n\nPrevious conversation:\n{history}\n\nCurrent customer question: {question}\n\nSigned-in user: {visitor}\n\nReply in a personal, helpful and engaging way. Use fitting emojis and suggest concrete next steps."
        )
    }

    /// Send a customer message and append the reply.
    ///
    /// Blank input is ignored and returns `None`. A failed completion is
    /// logged and answered with a fallback message.
    pub async fn send(
        &mut self,
        completion: &dyn ChatCompletion,
        input: &str,
        user: Option<&User>,
    ) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }

        let prompt = self.build_prompt(input, user);
        self.messages.push(ChatMessage::new(ChatRole::User, input));

        let reply = match completion.complete(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "Chat completion failed, sending fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(ChatMessage::new(ChatRole::Assistant, reply));
        self.messages.last()
    }
}

fn welcome_message(user: Option<&User>) -> String {
    let greeting = user.map_or_else(
        || "Hello and welcome! 👋".to_string(),
        |user| format!("Hello {}! 👋", user.display_name),
    );
    format!(
        "{greeting}\n\n\
         I'm your SPORTSWEARstore assistant. I can help you with:\n\n\
         ⚽ **Jersey recommendations** for your favourite teams\n\
         🏀 **Sizing advice** for a perfect fit\n\
         🎾 **Detailed product information** (materials, technologies)\n\
         📦 **Order tracking** and deliveries\n\
         💡 **Care tips** for your jerseys\n\n\
         How can I help you today?"
    )
}
