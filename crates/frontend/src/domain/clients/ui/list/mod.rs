//! Страница со списком клиентов.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::clients::core::facade::ClientsFacade;
use crate::domain::clients::core::state::{ModalState, RouteOutcome};
use crate::domain::clients::ui::details::ClientDetails;
use crate::domain::clients::ui::push_modal::PushModal;
use crate::shared::components::sort_header::SortHeader;
use crate::shared::i18n::{tr, tr_with, use_lang, MessageKey};
use crate::shared::sorting::SortDirection;
use crate::shared::url_state;

#[component]
pub fn ClientsList() -> impl IntoView {
    let facade = ClientsFacade::new();
    on_cleanup(move || facade.detach());

    let lang = use_lang();
    let state = facade.state();
    let (search_input, set_search_input) = signal(String::new());

    // Initial load, then re-open a deep-linked push workflow if the URL
    // carries a client id.
    spawn_local(async move {
        let _ = facade.load().await;
        if let Some(id_text) = url_state::path_client_id() {
            let snapshot = state.with_untracked(|s| s.clients.clone());
            if facade.open_push_from_route(&id_text, &snapshot) == RouteOutcome::NotFound {
                log::warn!(
                    "{}",
                    tr_with(
                        lang.get_untracked(),
                        MessageKey::ClientNotFound,
                        &[("id", &id_text)]
                    )
                );
            }
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        facade.search(&search_input.get());
    };

    let on_clear = move || {
        set_search_input.set(String::new());
        facade.clear_search();
    };

    let on_sort = Callback::new(move |(field, direction): (&'static str, SortDirection)| {
        facade.sort(field, direction);
    });

    let direction_for =
        move |field: &'static str| Signal::derive(move || facade.sort_direction_for(field));

    let open_push_for = move |user_id: i64| {
        let snapshot = state.with_untracked(|s| s.clients.clone());
        if facade.open_push(vec![user_id], &snapshot) {
            facade.push_url_set(user_id);
        }
    };

    let editor_open = Memo::new(move |_| {
        matches!(state.get().modal, ModalState::Editor { .. })
    });
    let push_open = Memo::new(move |_| matches!(state.get().modal, ModalState::Push { .. }));

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Клиенты"</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| facade.open_create_editor()>
                        "Новый клиент"
                    </button>
                </div>
            </div>

            <form class="search" on:submit=on_search>
                <input
                    type="text"
                    class="search__input"
                    placeholder="Телефон или город"
                    prop:value=move || search_input.get()
                    on:input=move |ev| set_search_input.set(event_target_value(&ev))
                />
                <button type="submit" class="button button--secondary">"Найти"</button>
                <button type="button" class="button button--secondary" on:click=move |_| on_clear()>
                    "Сбросить"
                </button>
            </form>

            <Show when=move || state.with(|s| s.search_error.is_some())>
                <div class="warning-box">
                    <span class="warning-box__text">
                        {move || {
                            state
                                .with(|s| s.search_error)
                                .map(|key| tr(lang.get(), key))
                                .unwrap_or_default()
                        }}
                    </span>
                </div>
            </Show>

            <Show when=move || state.with(|s| s.loading)>
                <div class="loading">"Загрузка..."</div>
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <SortHeader label="ID" field="user_id" direction=direction_for("user_id") on_sort=on_sort />
                            <SortHeader label="ФИО" field="fio" direction=direction_for("fio") on_sort=on_sort />
                            <SortHeader label="Телефон" field="phone" direction=direction_for("phone") on_sort=on_sort />
                            <SortHeader label="Email" field="email" direction=direction_for("email") on_sort=on_sort />
                            <SortHeader label="Город" field="city" direction=direction_for("city") on_sort=on_sort />
                            <SortHeader label="Бонусы" field="bonus" direction=direction_for("bonus") on_sort=on_sort />
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            facade
                                .sorted_view()
                                .into_iter()
                                .map(|client| {
                                    let user_id = client.user_id;
                                    let edit_target = client.clone();
                                    view! {
                                        <tr
                                            class="table__row"
                                            on:click=move |_| facade.open_edit_editor(edit_target.clone())
                                        >
                                            <td class="table__cell">{user_id}</td>
                                            <td class="table__cell">{client.fio.clone()}</td>
                                            <td class="table__cell">{client.phone.clone().unwrap_or_else(|| "-".to_string())}</td>
                                            <td class="table__cell">{client.email.clone().unwrap_or_else(|| "-".to_string())}</td>
                                            <td class="table__cell">{client.city.clone().unwrap_or_else(|| "-".to_string())}</td>
                                            <td class="table__cell">{client.bonus.clone().unwrap_or_else(|| "-".to_string())}</td>
                                            <td class="table__cell">
                                                <button
                                                    class="button button--small"
                                                    on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        open_push_for(user_id);
                                                    }
                                                >
                                                    "PUSH"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <Show when=move || editor_open.get()>
                <ClientDetails facade=facade />
            </Show>
            <Show when=move || push_open.get()>
                <PushModal facade=facade />
            </Show>
        </div>
    }
}
