//! Support chat backed by a generative chat-completion service.
//!
//! - [`client`] - Gemini `generateContent` client behind the [`ChatCompletion`] trait
//! - [`support`] - Transcript, welcome message, prompt assembly and fallback reply

pub mod client;
pub mod error;
pub mod support;
pub mod types;

pub use client::{ChatCompletion, GeminiClient};
pub use error::ChatError;
pub use support::SupportChat;
pub use types::ChatMessage;
