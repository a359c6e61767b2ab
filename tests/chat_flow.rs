use emi_chat::client::http::HttpAnswerClient;
use emi_chat::client::{ CONNECTION_FALLBACK, EMPTY_ANSWER_FALLBACK };
use emi_chat::models::chat::Role;
use emi_chat::view::format::{ format_for_display, DisplayContent };
use emi_chat::view::ChatView;
use std::time::Duration;
use wiremock::matchers::{ body_json, method, path };
use wiremock::{ Mock, MockServer, ResponseTemplate };

#[tokio::test]
async fn question_and_cited_answer_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/preguntar"))
        .and(body_json(serde_json::json!({ "pregunta": "¿Qué exige el RAC-2?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "respuesta": "Según el artículo 5 del RAC-2: el motor debe..." })
            )
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpAnswerClient::new(&format!("{}/api", mock_server.uri())).unwrap();
    let mut view = ChatView::new();
    view.submit("¿Qué exige el RAC-2?", &client).await;

    let messages = view.conversation().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert!(!view.is_loading());

    match format_for_display(&messages[1].content) {
        DisplayContent::Highlighted { heading, after, .. } => {
            assert_eq!(heading, "Según el artículo 5 del RAC-2:");
            assert_eq!(after, "el motor debe...");
        }
        other => panic!("expected a highlighted citation, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_answer_and_outage_both_degrade_to_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/preguntar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "respuesta": "" })))
        .mount(&mock_server)
        .await;

    let client = HttpAnswerClient::new(&mock_server.uri()).unwrap();
    let mut view = ChatView::new();
    view.submit("hola", &client).await;
    assert_eq!(
        view.conversation().last().map(|m| m.content.as_str()),
        Some(EMPTY_ANSWER_FALLBACK)
    );

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let offline = HttpAnswerClient::builder(&closed)
        .timeout(Some(Duration::from_secs(5)))
        .build()
        .unwrap();
    view.submit("¿Qué dice el artículo 3?", &offline).await;

    let messages = view.conversation().messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[3].role, Role::Assistant);
    assert_eq!(messages[3].content, CONNECTION_FALLBACK);
    assert!(!view.is_loading());
}
