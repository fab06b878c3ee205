//! Таблицы локализованных сообщений.
//!
//! The facade and the repository never carry user-facing strings; they
//! select a `MessageKey` (plus parameters) and the rendering layer
//! resolves it against the active language here.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

/// Ключи сообщений, которые выбирают фасад и репозиторий.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Non-fatal "no matches" hint after a searched load came back empty
    NoClients,
    /// Generic list-load / search failure
    SearchError,
    /// Deep-linked push target was not present in the loaded list
    ClientNotFound,
    /// Fallback recipient name when the client record has no fio
    Client,
    EmptyMessage,
    PushSuccess,
    SendPushError,
    CreateSuccess,
    UpdateSuccess,
    DeleteSuccess,
    SaveError,
    DeleteError,
    LoginFailed,
}

/// Resolve a key to its template for the given language.
pub fn tr(lang: Lang, key: MessageKey) -> &'static str {
    match lang {
        Lang::Ru => match key {
            MessageKey::NoClients => "Клиенты не найдены",
            MessageKey::SearchError => "Ошибка поиска, попробуйте ещё раз",
            MessageKey::ClientNotFound => "Клиент с идентификатором {id} не найден",
            MessageKey::Client => "Клиент",
            MessageKey::EmptyMessage => "Сообщение не может быть пустым",
            MessageKey::PushSuccess => "Уведомление отправлено",
            MessageKey::SendPushError => "Не удалось отправить уведомление",
            MessageKey::CreateSuccess => "Клиент {name} создан",
            MessageKey::UpdateSuccess => "Данные клиента {name} обновлены",
            MessageKey::DeleteSuccess => "Клиент удалён",
            MessageKey::SaveError => "Не удалось сохранить клиента",
            MessageKey::DeleteError => "Не удалось удалить клиента",
            MessageKey::LoginFailed => "Не удалось войти, проверьте логин и пароль",
        },
        Lang::En => match key {
            MessageKey::NoClients => "No clients found",
            MessageKey::SearchError => "Search failed, please try again",
            MessageKey::ClientNotFound => "Client {id} not found",
            MessageKey::Client => "Client",
            MessageKey::EmptyMessage => "Message cannot be empty",
            MessageKey::PushSuccess => "Notification sent",
            MessageKey::SendPushError => "Failed to send notification",
            MessageKey::CreateSuccess => "Client {name} created",
            MessageKey::UpdateSuccess => "Client {name} updated",
            MessageKey::DeleteSuccess => "Client deleted",
            MessageKey::SaveError => "Failed to save the client",
            MessageKey::DeleteError => "Failed to delete the client",
            MessageKey::LoginFailed => "Login failed, check your credentials",
        },
    }
}

/// Resolve a key and substitute `{name}`-style placeholders.
pub fn tr_with(lang: Lang, key: MessageKey, args: &[(&str, &str)]) -> String {
    let mut text = tr(lang, key).to_string();
    for (name, value) in args {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

/// Install the language signal into context. Called once from `App`.
pub fn provide_lang() {
    provide_context(RwSignal::new(Lang::Ru));
}

/// Current language signal.
pub fn use_lang() -> RwSignal<Lang> {
    use_context::<RwSignal<Lang>>().expect("language context not provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_parameters() {
        assert_eq!(
            tr_with(Lang::Ru, MessageKey::ClientNotFound, &[("id", "42")]),
            "Клиент с идентификатором 42 не найден"
        );
        assert_eq!(
            tr_with(Lang::En, MessageKey::CreateSuccess, &[("name", "Ivanov")]),
            "Client Ivanov created"
        );
    }

    #[test]
    fn save_and_delete_errors_follow_the_active_language() {
        assert_eq!(
            tr(Lang::Ru, MessageKey::SaveError),
            "Не удалось сохранить клиента"
        );
        assert_eq!(
            tr(Lang::En, MessageKey::SaveError),
            "Failed to save the client"
        );
        assert_eq!(
            tr(Lang::Ru, MessageKey::DeleteError),
            "Не удалось удалить клиента"
        );
        assert_eq!(
            tr(Lang::En, MessageKey::DeleteError),
            "Failed to delete the client"
        );
    }

    #[test]
    fn plain_keys_have_no_placeholders() {
        for lang in [Lang::Ru, Lang::En] {
            assert!(!tr(lang, MessageKey::NoClients).contains('{'));
            assert!(!tr(lang, MessageKey::SearchError).contains('{'));
        }
    }
}
