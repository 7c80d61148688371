mod clean;
mod error;
mod ollama;

pub use clean::clean_chapter;
pub use error::GenerateError;
pub use ollama::OllamaClient;

/// Appended to accumulated text when asking the service to keep going.
pub const CONTINUATION_MARKER: &str = "\nContinue:";

/// A single completion request against the generation service.
///
/// The only real implementation is [`OllamaClient`]; tests stub this out.
#[async_trait::async_trait]
pub trait Generate {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Requests text until the accumulated output reaches `min_length` characters.
///
/// The first request's prompt is used as given; every continuation re-sends
/// the accumulated text with [`CONTINUATION_MARKER`] appended, and the new
/// chunk is joined on with a single space. A service failure aborts
/// immediately, and more than `max_continuations` follow-up requests without
/// reaching the minimum fails with [`GenerateError::MaxRetriesExceeded`], so
/// a degenerate service can never make this loop forever or hand back a
/// short result.
#[tracing::instrument(skip(service, prompt), err)]
pub async fn generate_text(
    service: &dyn Generate,
    prompt: &str,
    min_length: usize,
    max_continuations: usize,
) -> Result<String, GenerateError> {
    let mut text = service.complete(prompt).await?;
    let mut continuations = 0;

    while text.chars().count() < min_length {
        if continuations == max_continuations {
            return Err(GenerateError::MaxRetriesExceeded {
                continuations,
                length: text.chars().count(),
                min_length,
            });
        }

        tracing::debug!(
            length = text.chars().count(),
            min_length = min_length,
            "requesting continuation"
        );

        let prompt = format!("{}{}", text, CONTINUATION_MARKER);
        let chunk = service.complete(&prompt).await?;

        text.push(' ');
        text.push_str(&chunk);

        continuations += 1;
    }

    Ok(text)
}
