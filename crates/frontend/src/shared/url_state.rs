//! Синхронизация состояния со строкой адреса.
//!
//! Query parameters are merged (other parameters survive) and applied with
//! `history.replaceState`, so URL updates never grow browser history.

use std::collections::BTreeMap;

use web_sys::window;

/// Merge one parameter into a query string. `value = None` removes the
/// parameter. Other parameters are preserved. Pure, so the merge semantics
/// stay testable off the browser.
pub fn merge_query_param(search: &str, key: &str, value: Option<&str>) -> String {
    let mut params: BTreeMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

    match value {
        Some(v) => {
            params.insert(key.to_string(), v.to_string());
        }
        None => {
            params.remove(key);
        }
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", serde_qs::to_string(&params).unwrap_or_default())
    }
}

pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn current_pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Replace the current URL keeping the pathname, without a history entry.
pub fn replace_query(query: &str) {
    let url = format!("{}{}", current_pathname(), query);
    if let Some(w) = window() {
        if let Ok(history) = w.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url));
        }
    }
}

/// Client id from a `/clients/{id}` deep-link path, if present.
pub fn path_client_id() -> Option<String> {
    client_id_from_path(&current_pathname())
}

fn client_id_from_path(pathname: &str) -> Option<String> {
    let mut segments = pathname.trim_matches('/').split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("clients"), Some(id), None) if !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> BTreeMap<String, String> {
        serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default()
    }

    #[test]
    fn merge_adds_parameter_preserving_others() {
        let merged = merge_query_param("?active=clients", "push", Some("42"));
        let params = parse(&merged);
        assert_eq!(params.get("active").map(String::as_str), Some("clients"));
        assert_eq!(params.get("push").map(String::as_str), Some("42"));
    }

    #[test]
    fn merge_overwrites_existing_value() {
        let merged = merge_query_param("?push=1", "push", Some("2"));
        assert_eq!(parse(&merged).get("push").map(String::as_str), Some("2"));
    }

    #[test]
    fn merge_removes_parameter() {
        let merged = merge_query_param("?push=42&active=clients", "push", None);
        let params = parse(&merged);
        assert!(!params.contains_key("push"));
        assert_eq!(params.get("active").map(String::as_str), Some("clients"));
    }

    #[test]
    fn removing_last_parameter_yields_empty_query() {
        assert_eq!(merge_query_param("?push=42", "push", None), "");
        assert_eq!(merge_query_param("", "push", None), "");
    }

    #[test]
    fn client_id_parsed_from_clients_path_only() {
        assert_eq!(client_id_from_path("/clients/42"), Some("42".to_string()));
        assert_eq!(client_id_from_path("/clients/42/"), Some("42".to_string()));
        assert_eq!(client_id_from_path("/clients"), None);
        assert_eq!(client_id_from_path("/"), None);
        assert_eq!(client_id_from_path("/other/42"), None);
    }
}
