use leptos::prelude::*;

use crate::domain::clients::ui::list::ClientsList;
use crate::shared::i18n::{use_lang, Lang};
use crate::shared::notifications::NotificationHost;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::pages::login::LoginPage;

#[component]
fn MainLayout() -> impl IntoView {
    let lang = use_lang();
    let (_, set_auth_state) = use_auth();

    view! {
        <div class="shell">
            <div class="shell__topbar">
                <span class="shell__brand">"Управление клиентами"</span>
                <div class="shell__topbar-actions">
                    <button
                        class="button button--small"
                        on:click=move |_| {
                            lang.update(|l| {
                                *l = match l {
                                    Lang::Ru => Lang::En,
                                    Lang::En => Lang::Ru,
                                }
                            })
                        }
                    >
                        {move || match lang.get() {
                            Lang::Ru => "EN",
                            Lang::En => "RU",
                        }}
                    </button>
                    <button class="button button--small" on:click=move |_| do_logout(set_auth_state)>
                        "Выход"
                    </button>
                </div>
            </div>
            <ClientsList />
            <NotificationHost />
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
