//! Репозиторий клиентов.
//!
//! Single-shot HTTP calls against the token-scoped remote API, no retries.
//! The only failure the repository absorbs is a "bad request" rejection of
//! a malformed search, which degrades to an empty page; everything else
//! propagates to the caller unchanged.

use contracts::clients::{Client, ClientDraft, ClientsPage, PushOutcome, PushRequest};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

pub const DEFAULT_LIMIT: u32 = 1000;

const BAD_REQUEST: u16 = 400;
const DEFAULT_TEMPLATE: &str = "Тестовый";

#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    /// No auth token available: fatal precondition, raised before any
    /// network attempt
    NoToken,
    /// Non-success status from the remote
    Status(u16),
    Network(String),
    Decode(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::NoToken => write!(f, "no auth token"),
            RepoError::Status(code) => write!(f, "HTTP {}", code),
            RepoError::Network(e) => write!(f, "request failed: {}", e),
            RepoError::Decode(e) => write!(f, "failed to parse response: {}", e),
        }
    }
}

impl std::error::Error for RepoError {}

fn require_token() -> Result<String, RepoError> {
    storage::get_token().ok_or(RepoError::NoToken)
}

fn network(e: gloo_net::Error) -> RepoError {
    RepoError::Network(e.to_string())
}

fn decode(e: gloo_net::Error) -> RepoError {
    RepoError::Decode(e.to_string())
}

/// Классификация поискового запроса под API.
///
/// All-digit terms search by phone, terms with a Latin or Cyrillic letter
/// by city, anything else falls back to phone. Empty terms mean no filter.
pub fn classify_search(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    if term.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("phone={}", term));
    }

    let has_letter = term
        .chars()
        .any(|c| matches!(c, 'a'..='z' | 'A'..='Z' | 'а'..='я' | 'А'..='Я'));
    if has_letter {
        return Some(format!("city={}", term));
    }

    Some(format!("phone={}", term))
}

/// Нормализация данных перед create/update.
///
/// When a combined fio is supplied without the separate name parts it is
/// split on whitespace: token 1 is the last name, token 2 the first name,
/// token 3 (if any) the patronymic, otherwise the patronymic is cleared.
/// The combined fio itself is dropped from the payload once split; only
/// the parts go over the wire. Best-effort heuristic kept for API
/// compatibility. The template tag defaults when absent.
pub fn prepare_draft(mut draft: ClientDraft) -> ClientDraft {
    if draft.template.is_none() {
        draft.template = Some(DEFAULT_TEMPLATE.to_string());
    }

    if let (Some(fio), None) = (draft.fio.clone(), &draft.first_name) {
        let parts: Vec<&str> = fio.split_whitespace().collect();
        if parts.len() >= 2 {
            draft.last_name = Some(parts[0].to_string());
            draft.first_name = Some(parts[1].to_string());
            draft.pat_name = Some(parts.get(2).copied().unwrap_or_default().to_string());
            draft.fio = None;
        }
    }

    draft
}

/// Список клиентов с поиском и пагинацией.
///
/// A remote "bad request" rejection is substituted with an empty page
/// echoing the requested window, so malformed searches degrade to "no
/// results" instead of an error banner.
pub async fn list(search_term: &str, limit: u32, offset: u32) -> Result<ClientsPage, RepoError> {
    let token = require_token()?;

    let mut url = format!(
        "{}?limit={}&offset={}",
        api_url(&format!("/{}/passes", token)),
        limit,
        offset
    );
    if let Some(filter) = classify_search(search_term) {
        url.push_str("&search=");
        url.push_str(&urlencoding::encode(&filter));
    }

    let response = Request::get(&url)
        .header("Authorization", &token)
        .send()
        .await
        .map_err(network)?;

    if response.status() == BAD_REQUEST {
        log::warn!("list rejected as bad request, substituting empty page");
        return Ok(ClientsPage::fallback(limit, offset));
    }
    if !response.ok() {
        return Err(RepoError::Status(response.status()));
    }

    response.json::<ClientsPage>().await.map_err(decode)
}

/// Создание клиента; id назначает сервер.
pub async fn create(draft: ClientDraft) -> Result<Client, RepoError> {
    let token = require_token()?;
    let body = prepare_draft(draft);

    let response = Request::post(&api_url(&format!("/{}/passes", token)))
        .header("Authorization", &token)
        .json(&body)
        .map_err(decode)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(RepoError::Status(response.status()));
    }
    response.json::<Client>().await.map_err(decode)
}

/// Обновление клиента по id.
pub async fn update(user_id: i64, draft: ClientDraft) -> Result<Client, RepoError> {
    let token = require_token()?;
    let body = prepare_draft(draft);

    let response = Request::put(&api_url(&format!("/{}/passes/{}", token, user_id)))
        .header("Authorization", &token)
        .json(&body)
        .map_err(decode)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(RepoError::Status(response.status()));
    }
    response.json::<Client>().await.map_err(decode)
}

/// Удаление клиента по id.
pub async fn remove(user_id: i64) -> Result<(), RepoError> {
    let token = require_token()?;

    let response = Request::delete(&api_url(&format!("/{}/passes/{}", token, user_id)))
        .header("Authorization", &token)
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(RepoError::Status(response.status()));
    }
    Ok(())
}

/// Данные одного клиента.
pub async fn get(user_id: i64) -> Result<Client, RepoError> {
    let token = require_token()?;

    let response = Request::get(&api_url(&format!("/{}/passes/{}", token, user_id)))
        .header("Authorization", &token)
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(RepoError::Status(response.status()));
    }
    response.json::<Client>().await.map_err(decode)
}

/// Отправка PUSH-уведомления; идентификаторы уходят списком через запятую.
pub async fn send_push(ids: &[i64], message: &str) -> Result<PushOutcome, RepoError> {
    let token = require_token()?;

    let response = Request::post(&api_url(&format!("/{}/message/push", token)))
        .header("Authorization", &token)
        .json(&PushRequest::new(ids, message))
        .map_err(decode)?
        .send()
        .await
        .map_err(network)?;

    if !response.ok() {
        return Err(RepoError::Status(response.status()));
    }
    response.json::<PushOutcome>().await.map_err(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_digit_term_searches_by_phone() {
        assert_eq!(
            classify_search("79991234567"),
            Some("phone=79991234567".to_string())
        );
    }

    #[test]
    fn lettered_term_searches_by_city() {
        assert_eq!(classify_search("Moscow"), Some("city=Moscow".to_string()));
        assert_eq!(classify_search("Москва"), Some("city=Москва".to_string()));
        // A single letter among digits is enough.
        assert_eq!(
            classify_search("7999x123"),
            Some("city=7999x123".to_string())
        );
    }

    #[test]
    fn empty_term_means_no_filter() {
        assert_eq!(classify_search(""), None);
        assert_eq!(classify_search("   "), None);
    }

    #[test]
    fn other_terms_fall_back_to_phone() {
        assert_eq!(
            classify_search("+7 (999)"),
            Some("phone=+7 (999)".to_string())
        );
    }

    #[test]
    fn fio_is_split_when_parts_are_absent() {
        let draft = prepare_draft(ClientDraft {
            fio: Some("Иванов Иван Петрович".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.last_name.as_deref(), Some("Иванов"));
        assert_eq!(draft.first_name.as_deref(), Some("Иван"));
        assert_eq!(draft.pat_name.as_deref(), Some("Петрович"));
        // Only the parts are sent; the combined fio is dropped.
        assert_eq!(draft.fio, None);
    }

    #[test]
    fn two_token_fio_clears_patronymic() {
        let draft = prepare_draft(ClientDraft {
            fio: Some("Иванов Иван".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.last_name.as_deref(), Some("Иванов"));
        assert_eq!(draft.first_name.as_deref(), Some("Иван"));
        assert_eq!(draft.pat_name.as_deref(), Some(""));
        assert_eq!(draft.fio, None);
    }

    #[test]
    fn single_token_fio_is_left_alone() {
        let draft = prepare_draft(ClientDraft {
            fio: Some("Иванов".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.last_name, None);
        assert_eq!(draft.first_name, None);
        assert_eq!(draft.pat_name, None);
        assert_eq!(draft.fio.as_deref(), Some("Иванов"));
    }

    #[test]
    fn explicit_name_parts_win_over_fio() {
        let draft = prepare_draft(ClientDraft {
            fio: Some("Иванов Иван".to_string()),
            first_name: Some("Пётр".to_string()),
            last_name: Some("Петров".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.first_name.as_deref(), Some("Пётр"));
        assert_eq!(draft.last_name.as_deref(), Some("Петров"));
    }

    #[test]
    fn template_defaults_only_when_absent() {
        let draft = prepare_draft(ClientDraft::default());
        assert_eq!(draft.template.as_deref(), Some(DEFAULT_TEMPLATE));

        let draft = prepare_draft(ClientDraft {
            template: Some("Золотой".to_string()),
            ..Default::default()
        });
        assert_eq!(draft.template.as_deref(), Some("Золотой"));
    }
}
