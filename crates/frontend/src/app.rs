use leptos::prelude::*;

use crate::routes::routes::AppRoutes;
use crate::shared::i18n::provide_lang;
use crate::shared::notifications::provide_notifications;
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_lang();
    provide_notifications();

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
