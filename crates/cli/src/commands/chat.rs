//! One-shot support chat.

use sportswear_store::StoreError;
use sportswear_store::chat::{GeminiClient, SupportChat};

use super::{CommandError, Context};

/// Ask the support assistant one question and print its reply.
///
/// # Errors
///
/// Returns [`CommandError::ChatDisabled`] when no API key is configured.
#[allow(clippy::print_stdout)]
pub async fn ask(ctx: &Context, message: &str) -> Result<(), CommandError> {
    let config = ctx.config.chat.as_ref().ok_or(CommandError::ChatDisabled)?;
    let client = GeminiClient::new(config).map_err(StoreError::from)?;
    tracing::debug!(model = client.model(), "Chat client ready");

    let user = ctx.store.user();
    let mut chat = SupportChat::new(user);
    match chat.send(&client, message, user).await {
        Some(reply) => println!("{}", reply.content),
        None => println!("Ask a question to get an answer."),
    }
    Ok(())
}
