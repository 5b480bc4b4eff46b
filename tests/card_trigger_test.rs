// Integration tests for card triggers and tasks against a mocked Trello API

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use trello::tasks::{Comment, Create, Move};
use trello::{CardTrigger, Task, TriggerExecution};

const AUTH: &str = r#"OAuth oauth_consumer_key="test-key", oauth_token="test-token""#;

fn trigger_from_toml(server: &Server, sources: &str) -> CardTrigger {
    let toml = format!(
        "id = \"card_trigger\"\napiKey = \"test-key\"\napiToken = \"test-token\"\napiBaseUrl = \"{}\"\ninterval = 300\n{}",
        server.url(),
        sources
    );
    trello::config::from_toml_str(&toml).unwrap()
}

#[tokio::test]
async fn test_board_and_lists_event_payload() {
    let mut server = Server::new_async().await;
    let board = server
        .mock("GET", "/1/boards/b1/cards")
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_body(
            r#"[
                {"id": "c1", "name": "Old", "idList": "l9", "dateLastActivity": "2026-02-18T11:00:00.000Z"},
                {"id": "c2", "name": "Edited", "idList": "l9", "shortUrl": "https://trello.com/c/c2",
                 "dateLastActivity": "2026-02-18T12:02:00.000Z"}
            ]"#,
        )
        .create_async()
        .await;
    let list = server
        .mock("GET", "/1/lists/l1/cards")
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_body(
            r#"[{"id": "c3", "name": "Fresh", "desc": "new one", "idBoard": "b1",
                 "dateLastActivity": "2026-02-18T12:00:20.000Z"}]"#,
        )
        .create_async()
        .await;

    let trigger = trigger_from_toml(&server, "boardId = \"b1\"\nlistIds = [\"l1\"]");
    // Cutoff is 12:00:00
    let hint = Utc.with_ymd_and_hms(2026, 2, 18, 12, 5, 0).unwrap();

    let event = trigger.evaluate(Some(hint)).await.unwrap().unwrap();
    board.assert_async().await;
    list.assert_async().await;

    assert_eq!(event.new_cards_count, 2);
    let execution = TriggerExecution::new(&trigger.id, event);
    let json = serde_json::to_value(&execution).unwrap();

    assert_eq!(json["triggerId"], "card_trigger");
    let payload = &json["payload"];
    assert_eq!(payload["cardId"], "c2");
    assert_eq!(payload["action"], "updated");
    assert_eq!(payload["boardId"], "b1");
    assert_eq!(payload["listId"], "l9");
    assert_eq!(payload["cardUrl"], "https://trello.com/c/c2");
    assert_eq!(payload["newCardsCount"], 2);
    assert_eq!(payload["allNewCards"][0]["cardId"], "c2");
    assert_eq!(payload["allNewCards"][1]["cardId"], "c3");
    assert_eq!(payload["allNewCards"][1]["action"], "created");
    assert_eq!(payload["allNewCards"][1]["listId"], "l1");
    assert_eq!(payload["allNewCards"][1]["cardDescription"], "new one");
}

#[tokio::test]
async fn test_failing_list_aborts_whole_poll() {
    let mut server = Server::new_async().await;
    let _ok = server
        .mock("GET", "/1/lists/l1/cards")
        .with_status(200)
        .with_body(r#"[{"id": "c1", "dateLastActivity": "2026-02-18T12:01:00.000Z"}]"#)
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/1/lists/l2/cards")
        .with_status(404)
        .with_body("model not found")
        .create_async()
        .await;

    let trigger = trigger_from_toml(&server, "listIds = [\"l1\", \"l2\"]");
    let hint = Utc.with_ymd_and_hms(2026, 2, 18, 12, 5, 0).unwrap();

    let err = trigger.evaluate(Some(hint)).await.unwrap_err();
    assert!(err.to_string().contains("404"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_create_move_and_comment_flow() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/1/cards")
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_body(r#"{"id": "card-1", "shortUrl": "https://trello.com/c/card-1"}"#)
        .create_async()
        .await;
    let moved = server
        .mock("PUT", "/1/cards/card-1")
        .match_body(Matcher::PartialJson(serde_json::json!({"idList": "done"})))
        .with_status(200)
        .with_body(r#"{"id": "card-1"}"#)
        .create_async()
        .await;
    let comment = server
        .mock(
            "POST",
            Matcher::Regex(r"^/1/cards/card-1/actions/comments".to_string()),
        )
        .match_query(Matcher::UrlEncoded(
            "text".to_string(),
            "Shipped & closed".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"id": "action-1"}"#)
        .create_async()
        .await;

    let connection = serde_json::json!({
        "apiKey": "test-key",
        "apiToken": "test-token",
        "apiBaseUrl": server.url(),
    });
    let with = |extra: serde_json::Value| {
        let mut value = connection.clone();
        value
            .as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        value
    };

    let created: Create =
        serde_json::from_value(with(serde_json::json!({"name": "Release", "idList": "todo"})))
            .unwrap();
    let card_id = created.run().await.unwrap().card_id.unwrap();

    let move_task: Move =
        serde_json::from_value(with(serde_json::json!({"cardId": card_id, "idList": "done"})))
            .unwrap();
    move_task.run().await.unwrap();

    let comment_task: Comment = serde_json::from_value(with(
        serde_json::json!({"cardId": card_id, "text": "Shipped & closed"}),
    ))
    .unwrap();
    let output = comment_task.run().await.unwrap();

    assert_eq!(output.comment_id.as_deref(), Some("action-1"));
    create.assert_async().await;
    moved.assert_async().await;
    comment.assert_async().await;
}
