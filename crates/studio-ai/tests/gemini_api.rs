use studio_ai::{AiError, DraftEngine, EngineSettings, GeminiEngine};
use studio_core::{GenerationMode, GenerationRequest, RefinementRequest};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn engine_for(server: &MockServer) -> GeminiEngine {
    GeminiEngine::new(EngineSettings {
        api_key: Some("ai-key".to_string()),
        api_base: Url::parse(&server.uri()).expect("mock uri"),
        flash_model: "gemini-2.5-flash".to_string(),
        pro_model: "gemini-2.5-pro".to_string(),
        thinking_budget: 32_768,
    })
}

fn model_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

fn generation_request(mode: GenerationMode) -> GenerationRequest {
    GenerationRequest {
        source_text: "Where is my order #123?".to_string(),
        mode,
        instructions: "be brief".to_string(),
    }
}

#[tokio::test]
async fn standard_mode_posts_schema_and_parses_bare_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "ai-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
            r#"{"subject":"Re: Order #123","body":"<html>reply</html>"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let draft = engine
        .generate(&generation_request(GenerationMode::Standard))
        .await
        .expect("draft");

    assert_eq!(draft.subject, "Re: Order #123");
    assert_eq!(draft.body, "<html>reply</html>");

    let requests = server.received_requests().await.expect("requests");
    let body: serde_json::Value = requests[0].body_json().expect("payload");
    assert!(body.pointer("/generationConfig/responseSchema").is_some());
    assert!(body.get("tools").is_none());
    let prompt = body
        .pointer("/contents/0/parts/0/text")
        .and_then(|value| value.as_str())
        .expect("prompt");
    assert!(prompt.contains("Where is my order #123?"));
    assert!(prompt.contains("be brief"));
}

#[tokio::test]
async fn search_mode_uses_tool_and_fenced_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(concat!(
            "Here is the reply based on current courier data:\n",
            "```json\n{\"subject\":\"Re: Tracking\",\"body\":\"<html>eta</html>\"}\n```"
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let draft = engine
        .generate(&generation_request(GenerationMode::Search))
        .await
        .expect("draft");
    assert_eq!(draft.subject, "Re: Tracking");

    let requests = server.received_requests().await.expect("requests");
    let body: serde_json::Value = requests[0].body_json().expect("payload");
    // JSON mode and the search tool are mutually exclusive upstream.
    assert!(body.get("tools").is_some());
    assert!(body.get("generationConfig").is_none());
}

#[tokio::test]
async fn thinking_mode_targets_the_pro_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
            r#"{"subject":"s","body":"<html></html>"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    engine
        .generate(&generation_request(GenerationMode::Thinking))
        .await
        .expect("draft");

    let requests = server.received_requests().await.expect("requests");
    let body: serde_json::Value = requests[0].body_json().expect("payload");
    assert_eq!(
        body.pointer("/generationConfig/thinkingConfig/thinkingBudget"),
        Some(&serde_json::json!(32_768))
    );
}

#[tokio::test]
async fn refinement_always_uses_the_flash_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(model_reply(
            r#"{"subject":"Re: Order #123 (updated)","body":"<html>v2</html>"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let draft = engine
        .refine(&RefinementRequest {
            source_text: "Where is my order #123?".to_string(),
            current_subject: "Re: Order #123".to_string(),
            current_body: "<html>v1</html>".to_string(),
            instruction: "mention the refund".to_string(),
        })
        .await
        .expect("draft");
    assert_eq!(draft.body, "<html>v2</html>");

    let requests = server.received_requests().await.expect("requests");
    let prompt_of = |request: &Request| -> String {
        request
            .body_json::<serde_json::Value>()
            .expect("payload")
            .pointer("/contents/0/parts/0/text")
            .and_then(|value| value.as_str())
            .expect("prompt")
            .to_string()
    };
    let prompt = prompt_of(&requests[0]);
    assert!(prompt.contains("<html>v1</html>"));
    assert!(prompt.contains("\"mention the refund\""));
}

#[tokio::test]
async fn missing_candidates_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let err = engine
        .generate(&generation_request(GenerationMode::Standard))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AiError::EmptyResponse));
}

#[tokio::test]
async fn upstream_http_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    let err = engine
        .generate(&generation_request(GenerationMode::Standard))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AiError::Http(_)));
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let server = MockServer::start().await;
    let engine = GeminiEngine::new(EngineSettings {
        api_key: None,
        api_base: Url::parse(&server.uri()).expect("mock uri"),
        flash_model: "gemini-2.5-flash".to_string(),
        pro_model: "gemini-2.5-pro".to_string(),
        thinking_budget: 32_768,
    });

    let err = engine
        .generate(&generation_request(GenerationMode::Standard))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AiError::NotConfigured));
    assert!(server.received_requests().await.expect("requests").is_empty());
}
