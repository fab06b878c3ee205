//! Wire types of the client collection API.
//!
//! Field names follow the remote API contract: the list endpoint returns
//! clients under the `passes` key, identifiers are numeric `user_id`s
//! assigned by the server.

use serde::{Deserialize, Serialize};

/// Карточка клиента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub user_id: i64,

    /// Комбинированное ФИО
    #[serde(default)]
    pub fio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pat_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key6: Option<String>,

    /// Тег шаблона карты
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Client {
    /// Blank record with the given id; every profile attribute unset.
    pub fn empty(user_id: i64) -> Self {
        Self {
            user_id,
            fio: String::new(),
            last_name: None,
            first_name: None,
            pat_name: None,
            phone: None,
            email: None,
            birthday: None,
            gender: None,
            city: None,
            car_number: None,
            loyalty_level: None,
            discount: None,
            bonus: None,
            barcode: None,
            key3: None,
            key4: None,
            key5: None,
            key6: None,
            template: None,
        }
    }
}

/// Частичные данные клиента для create/update запросов.
///
/// The server assigns and keeps the id; a draft never carries one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pat_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key6: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Метаданные страницы списка
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    pub size: u32,
    pub limit: u32,
    pub offset: u32,
}

/// Ответ API на запрос списка клиентов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientsPage {
    pub meta: ListMeta,
    pub passes: Vec<Client>,
}

impl ClientsPage {
    /// Zeroed page, returned by the facade when a load is already in flight.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty page echoing the requested window; the repository substitutes
    /// this for a remote "bad request" rejection of a malformed search.
    pub fn fallback(limit: u32, offset: u32) -> Self {
        Self {
            meta: ListMeta {
                size: 0,
                limit,
                offset,
            },
            passes: Vec::new(),
        }
    }
}

/// Тело запроса отправки PUSH-уведомления
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Идентификаторы получателей через запятую
    pub user_id: String,
    pub push_message: String,
}

impl PushRequest {
    pub fn new(ids: &[i64], message: &str) -> Self {
        Self {
            user_id: ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
            push_message: message.to_string(),
        }
    }
}

/// Результат отправки PUSH-уведомления
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_deserializes_remote_shape() {
        let json = r#"{
            "meta": { "size": 1, "limit": 1000, "offset": 0 },
            "passes": [ { "user_id": 42, "fio": "Иванов Иван", "phone": "+79991234567" } ]
        }"#;
        let page: ClientsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.meta.size, 1);
        assert_eq!(page.passes.len(), 1);
        assert_eq!(page.passes[0].user_id, 42);
        assert_eq!(page.passes[0].phone.as_deref(), Some("+79991234567"));
        assert_eq!(page.passes[0].email, None);
    }

    #[test]
    fn fallback_page_echoes_requested_window() {
        let page = ClientsPage::fallback(1000, 200);
        assert_eq!(page.meta.size, 0);
        assert_eq!(page.meta.limit, 1000);
        assert_eq!(page.meta.offset, 200);
        assert!(page.passes.is_empty());
    }

    #[test]
    fn draft_skips_unset_fields() {
        let draft = ClientDraft {
            fio: Some("Иванов Иван".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert_eq!(json, r#"{"fio":"Иванов Иван"}"#);
    }

    #[test]
    fn push_request_joins_ids_with_commas() {
        let req = PushRequest::new(&[1, 2, 42], "Привет");
        assert_eq!(req.user_id, "1,2,42");
        assert_eq!(req.push_message, "Привет");
    }
}
