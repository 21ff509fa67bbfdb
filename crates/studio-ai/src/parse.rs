use crate::AiError;
use regex::Regex;
use studio_core::GeneratedDraft;

const FENCE_PATTERN: &str = r"(?s)```json\s*(.*?)\s*```";

/// Parse the model's text output into a draft.
///
/// Tries the whole text as bare JSON first; structured-output calls return
/// exactly that. The search-augmented mode replies in prose with a fenced
/// ```json block, so on failure the first fence is extracted and parsed
/// instead. Anything else is a malformed response.
pub fn parse_draft(text: &str) -> Result<GeneratedDraft, AiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AiError::EmptyResponse);
    }

    if let Ok(draft) = serde_json::from_str::<GeneratedDraft>(trimmed) {
        return Ok(draft);
    }

    let fenced = Regex::new(FENCE_PATTERN)
        .ok()
        .and_then(|fence| fence.captures(trimmed))
        .and_then(|captures| captures.get(1))
        .map(|block| block.as_str().to_string());

    match fenced {
        Some(block) => serde_json::from_str::<GeneratedDraft>(&block).map_err(|err| {
            tracing::warn!("fenced JSON block failed to parse: {err}");
            AiError::MalformedResponse
        }),
        None => {
            tracing::warn!("model output was neither JSON nor a fenced JSON block");
            Err(AiError::MalformedResponse)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_json_round_trips() {
        let draft = parse_draft(r#"{"subject":"Re: Order #123","body":"<html></html>"}"#)
            .expect("parsed");
        assert_eq!(draft.subject, "Re: Order #123");
        assert_eq!(draft.body, "<html></html>");
    }

    #[test]
    fn fenced_json_with_prose_is_extracted() {
        let text = concat!(
            "I looked up the courier details and drafted this reply.\n\n",
            "```json\n",
            r#"{"subject":"Re: Order #123","body":"<html>reply</html>"}"#,
            "\n```\n\nLet me know if you need changes."
        );
        let draft = parse_draft(text).expect("parsed");
        assert_eq!(draft.subject, "Re: Order #123");
        assert_eq!(draft.body, "<html>reply</html>");
    }

    #[test]
    fn first_fence_wins_when_multiple_exist() {
        let text = concat!(
            "```json\n{\"subject\":\"first\",\"body\":\"a\"}\n```\n",
            "```json\n{\"subject\":\"second\",\"body\":\"b\"}\n```"
        );
        let draft = parse_draft(text).expect("parsed");
        assert_eq!(draft.subject, "first");
    }

    #[test]
    fn unparsable_text_is_malformed() {
        let err = parse_draft("Sorry, I cannot help with that.").expect_err("must fail");
        assert!(matches!(err, AiError::MalformedResponse));
    }

    #[test]
    fn broken_fenced_block_is_malformed() {
        let err = parse_draft("```json\n{\"subject\": oops\n```").expect_err("must fail");
        assert!(matches!(err, AiError::MalformedResponse));
    }

    #[test]
    fn empty_text_is_an_empty_response() {
        let err = parse_draft("   \n ").expect_err("must fail");
        assert!(matches!(err, AiError::EmptyResponse));
    }
}
