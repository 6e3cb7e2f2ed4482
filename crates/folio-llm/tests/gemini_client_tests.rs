use folio_llm::{ContentClient, GeminiClient, GeminiConfig, GenerateOptions, GenerateRequest};
use futures::StreamExt;
use mockito::Matcher;
use serde_json::json;

const SSE_BODY: &str = concat!(
    "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"Anmol has \"}]}}]}\r\n\r\n",
    "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"built ETL pipelines.\"}]},",
    "\"finishReason\":\"STOP\",\"groundingMetadata\":{\"groundingChunks\":[",
    "{\"web\":{\"uri\":\"https://example.com/etl\",\"title\":\"ETL\"}}]}}]}\r\n\r\n",
);

fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
    GeminiClient::with_config(GeminiConfig::new().with_base_url(server.url())).unwrap()
}

#[tokio::test]
async fn test_stream_generate_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.5-flash:streamGenerateContent")
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"role": "user", "parts": [{"text": "Tell me about ETL"}]}],
            "tools": [{"googleSearch": {}}],
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(SSE_BODY)
        .create_async()
        .await;

    let request = GenerateRequest::new("gemini-2.5-flash", "Tell me about ETL")
        .with_system_instruction("persona")
        .with_options(GenerateOptions::new().google_search(true));

    let stream = client_for(&server)
        .stream_generate("test-key", request)
        .await
        .unwrap();
    let chunks: Vec<_> = stream.map(|c| c.unwrap()).collect().await;

    mock.assert_async().await;
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].text().as_deref(), Some("Anmol has "));
    assert_eq!(chunks[1].text().as_deref(), Some("built ETL pipelines."));
    assert_eq!(chunks[1].grounding_sources().len(), 1);
}

#[tokio::test]
async fn test_stream_generate_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.5-pro:streamGenerateContent")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let request = GenerateRequest::new("gemini-2.5-pro", "Why?")
        .with_options(GenerateOptions::new().thinking_budget(32768));

    let result = client_for(&server).stream_generate("bad-key", request).await;

    let err = result.err().unwrap().to_string();
    assert!(err.contains("403"));
    assert!(err.contains("API key not valid"));
}

#[tokio::test]
async fn test_stream_generate_connection_refused() {
    // Nothing listens on port 9 locally
    let client =
        GeminiClient::with_config(GeminiConfig::new().with_base_url("http://127.0.0.1:9/v1beta")).unwrap();

    let result = client
        .stream_generate("key", GenerateRequest::new("gemini-2.5-flash", "hi"))
        .await;

    assert!(result.is_err());
}
