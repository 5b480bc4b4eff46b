use serde::{Deserialize, Serialize};

/// Card object as returned by `GET .../cards`, `POST /cards` and `PUT /cards/{id}`.
///
/// Every field is optional: a card that lacks a field maps to `None`
/// rather than failing the whole collection.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    pub id: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub short_url: Option<String>,
    pub id_list: Option<String>,
    pub id_board: Option<String>,
    /// ISO-8601 instant of the last activity on the card
    pub date_last_activity: Option<String>,
}

/// Body of `POST /cards`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub name: String,
    pub id_list: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

/// Body of `PUT /cards/{id}`. Only present fields are sent.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

/// Action returned by `POST /cards/{id}/actions/comments`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CommentAction {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_with_missing_fields() {
        let card: TrelloCard =
            serde_json::from_str(r#"{"id": "c1", "dateLastActivity": null}"#).unwrap();
        assert_eq!(card.id.as_deref(), Some("c1"));
        assert!(card.name.is_none());
        assert!(card.date_last_activity.is_none());
    }

    #[test]
    fn test_card_field_names() {
        let card: TrelloCard = serde_json::from_str(
            r#"{
                "id": "c1",
                "name": "Card",
                "desc": "Body",
                "shortUrl": "https://trello.com/c/c1",
                "idList": "l1",
                "idBoard": "b1",
                "dateLastActivity": "2026-02-18T00:00:00.000Z"
            }"#,
        )
        .unwrap();
        assert_eq!(card.short_url.as_deref(), Some("https://trello.com/c/c1"));
        assert_eq!(card.id_list.as_deref(), Some("l1"));
        assert_eq!(card.id_board.as_deref(), Some("b1"));
        assert_eq!(
            card.date_last_activity.as_deref(),
            Some("2026-02-18T00:00:00.000Z")
        );
    }

    #[test]
    fn test_changes_skip_absent_fields() {
        let changes = CardChanges {
            closed: Some(true),
            ..Default::default()
        };
        let body = serde_json::to_value(&changes).unwrap();
        assert_eq!(body, serde_json::json!({"closed": true}));
    }

    #[test]
    fn test_new_card_body() {
        let card = NewCard {
            name: "Write docs".to_string(),
            id_list: "l1".to_string(),
            desc: None,
            pos: Some("top".to_string()),
            due: None,
        };
        let body = serde_json::to_value(&card).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Write docs", "idList": "l1", "pos": "top"})
        );
    }
}
