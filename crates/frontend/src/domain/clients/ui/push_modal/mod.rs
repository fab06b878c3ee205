//! Модальное окно отправки PUSH-уведомления.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::clients::core::facade::{ClientsFacade, PushSendError};
use crate::domain::clients::core::state::ModalState;
use crate::shared::i18n::{tr, use_lang, MessageKey};
use crate::shared::notifications::use_notifications;

#[component]
pub fn PushModal(facade: ClientsFacade) -> impl IntoView {
    let state = facade.state();
    let lang = use_lang();
    let notifications = use_notifications();

    let recipient = state.with_untracked(|s| match &s.modal {
        ModalState::Push { recipient, .. } if !recipient.is_empty() => recipient.clone(),
        _ => tr(lang.get_untracked(), MessageKey::Client).to_string(),
    });

    let (message, set_message) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_sending, set_is_sending) = signal(false);

    let close = move || {
        facade.close_push();
        facade.push_url_clear();
    };

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let text = message.get();
        set_is_sending.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match facade.send_push(&text).await {
                Ok(_) => {
                    notifications.show(tr(lang.get_untracked(), MessageKey::PushSuccess));
                    close();
                }
                Err(PushSendError::EmptyMessage) => {
                    set_error_message
                        .set(Some(tr(lang.get_untracked(), MessageKey::EmptyMessage).to_string()));
                    set_is_sending.set(false);
                }
                Err(PushSendError::Repo(err)) => {
                    log::error!("failed to send push: {}", err);
                    notifications.show(tr(lang.get_untracked(), MessageKey::SendPushError));
                    set_is_sending.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| close()>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"PUSH-уведомление: " {recipient}</h3>
                    <button class="btn-close" on:click=move |_| close()>"×"</button>
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_send>
                    <div class="form-group">
                        <label>"Текст сообщения"</label>
                        <textarea
                            prop:value=move || message.get()
                            on:input=move |ev| set_message.set(event_target_value(&ev))
                            disabled=move || is_sending.get()
                        ></textarea>
                    </div>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="button button--secondary"
                            on:click=move |_| close()
                            disabled=move || is_sending.get()
                        >
                            "Отмена"
                        </button>
                        <button type="submit" class="button button--primary" disabled=move || is_sending.get()>
                            {move || if is_sending.get() { "Отправка..." } else { "Отправить" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
