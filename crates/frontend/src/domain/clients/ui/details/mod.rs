//! Модальное окно создания/редактирования клиента.

use contracts::clients::{Client, ClientDraft};
use contracts::validation::{
    validate_car_number, validate_email, validate_past_date, validate_phone, DateError,
    EmailError, PhoneError, PlateError,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::clients::core::facade::ClientsFacade;
use crate::domain::clients::core::state::{EditorMode, ModalState};
use crate::domain::clients::data::repository;
use crate::shared::i18n::{tr, tr_with, use_lang, MessageKey};
use crate::shared::notifications::use_notifications;

/// Поля формы клиента.
#[derive(Clone, Copy)]
struct FormFields {
    fio: RwSignal<String>,
    phone: RwSignal<String>,
    email: RwSignal<String>,
    birthday: RwSignal<String>,
    gender: RwSignal<String>,
    city: RwSignal<String>,
    car_number: RwSignal<String>,
    discount: RwSignal<String>,
    bonus: RwSignal<String>,
    loyalty_level: RwSignal<String>,
    barcode: RwSignal<String>,
    key3: RwSignal<String>,
    key4: RwSignal<String>,
    key5: RwSignal<String>,
    key6: RwSignal<String>,
}

impl FormFields {
    fn from_client(client: Option<&Client>) -> Self {
        let text = |v: &Option<String>| RwSignal::new(v.clone().unwrap_or_default());
        match client {
            Some(c) => Self {
                fio: RwSignal::new(c.fio.clone()),
                phone: text(&c.phone),
                email: text(&c.email),
                birthday: text(&c.birthday),
                gender: text(&c.gender),
                city: text(&c.city),
                car_number: text(&c.car_number),
                discount: text(&c.discount),
                bonus: text(&c.bonus),
                loyalty_level: text(&c.loyalty_level),
                barcode: text(&c.barcode),
                key3: text(&c.key3),
                key4: text(&c.key4),
                key5: text(&c.key5),
                key6: text(&c.key6),
            },
            None => Self {
                fio: RwSignal::new(String::new()),
                phone: RwSignal::new(String::new()),
                email: RwSignal::new(String::new()),
                birthday: RwSignal::new(String::new()),
                gender: RwSignal::new(String::new()),
                city: RwSignal::new(String::new()),
                car_number: RwSignal::new(String::new()),
                discount: RwSignal::new(String::new()),
                bonus: RwSignal::new(String::new()),
                loyalty_level: RwSignal::new(String::new()),
                barcode: RwSignal::new(String::new()),
                key3: RwSignal::new(String::new()),
                key4: RwSignal::new(String::new()),
                key5: RwSignal::new(String::new()),
                key6: RwSignal::new(String::new()),
            },
        }
    }

    fn to_draft(self) -> ClientDraft {
        let opt = |s: RwSignal<String>| {
            let v = s.get_untracked();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        };
        ClientDraft {
            fio: Some(self.fio.get_untracked()),
            last_name: None,
            first_name: None,
            pat_name: None,
            phone: opt(self.phone),
            email: opt(self.email),
            birthday: opt(self.birthday),
            gender: opt(self.gender),
            city: opt(self.city),
            car_number: opt(self.car_number),
            discount: opt(self.discount),
            bonus: opt(self.bonus),
            loyalty_level: opt(self.loyalty_level),
            barcode: opt(self.barcode),
            key3: opt(self.key3),
            key4: opt(self.key4),
            key5: opt(self.key5),
            key6: opt(self.key6),
            template: None,
        }
    }
}

/// Ошибки полей формы.
#[derive(Clone, Copy)]
struct FormErrors {
    fio: RwSignal<Option<&'static str>>,
    phone: RwSignal<Option<&'static str>>,
    email: RwSignal<Option<&'static str>>,
    birthday: RwSignal<Option<&'static str>>,
    car_number: RwSignal<Option<&'static str>>,
}

impl FormErrors {
    fn new() -> Self {
        Self {
            fio: RwSignal::new(None),
            phone: RwSignal::new(None),
            email: RwSignal::new(None),
            birthday: RwSignal::new(None),
            car_number: RwSignal::new(None),
        }
    }
}

fn phone_error_text(err: PhoneError) -> &'static str {
    match err {
        PhoneError::InvalidFormat => "Недопустимый формат телефона",
        PhoneError::InsufficientDigits => "Слишком мало цифр (минимум 10)",
        PhoneError::ExcessiveDigits => "Слишком много цифр (максимум 15)",
    }
}

fn email_error_text(_: EmailError) -> &'static str {
    "Недопустимый email"
}

fn date_error_text(err: DateError) -> &'static str {
    match err {
        DateError::InvalidFormat => "Недопустимая дата",
        DateError::FutureDate => "Дата не может быть в будущем",
    }
}

fn plate_error_text(err: PlateError) -> &'static str {
    match err {
        PlateError::InvalidFormat => "Недопустимый номер автомобиля",
        PlateError::InvalidRegion => "Недопустимый регион",
    }
}

fn today() -> chrono::NaiveDate {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Field-level validation; "required" applies to fio only, the rest are
/// optional and validated only when filled in.
fn validate_form(fields: FormFields, errors: FormErrors) -> bool {
    errors.fio.set(if fields.fio.get_untracked().trim().is_empty() {
        Some("Укажите ФИО")
    } else {
        None
    });
    errors.phone.set(
        validate_phone(&fields.phone.get_untracked())
            .err()
            .map(phone_error_text),
    );
    errors.email.set(
        validate_email(&fields.email.get_untracked())
            .err()
            .map(email_error_text),
    );
    errors.birthday.set(
        validate_past_date(&fields.birthday.get_untracked(), today())
            .err()
            .map(date_error_text),
    );
    errors.car_number.set(
        validate_car_number(&fields.car_number.get_untracked().to_uppercase())
            .err()
            .map(plate_error_text),
    );

    [
        errors.fio,
        errors.phone,
        errors.email,
        errors.birthday,
        errors.car_number,
    ]
    .iter()
    .all(|e| e.get_untracked().is_none())
}

#[component]
fn Field(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] error: Option<RwSignal<Option<&'static str>>>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            {error.map(|error| {
                view! {
                    <Show when=move || error.get().is_some()>
                        <span class="field-error">{move || error.get().unwrap_or_default()}</span>
                    </Show>
                }
            })}
        </div>
    }
}

#[component]
pub fn ClientDetails(facade: ClientsFacade) -> impl IntoView {
    let state = facade.state();
    let lang = use_lang();
    let notifications = use_notifications();

    // Snapshot of the modal target at open time; the component is
    // recreated on every open.
    let (mode, target) = state.with_untracked(|s| match &s.modal {
        ModalState::Editor { mode, target } => (*mode, target.clone()),
        _ => (EditorMode::Create, None),
    });

    let fields = FormFields::from_client(target.as_ref());
    let errors = FormErrors::new();
    let (error_message, set_error_message) = signal(Option::<&'static str>::None);
    let (is_saving, set_is_saving) = signal(false);
    let target_id = target.as_ref().map(|c| c.user_id);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !validate_form(fields, errors) {
            return;
        }

        let draft = fields.to_draft();
        set_is_saving.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            let saved = match (mode, target_id) {
                (EditorMode::Edit, Some(user_id)) => repository::update(user_id, draft).await,
                _ => repository::create(draft).await,
            };
            match saved {
                Ok(client) => {
                    let key = match mode {
                        EditorMode::Create => MessageKey::CreateSuccess,
                        EditorMode::Edit => MessageKey::UpdateSuccess,
                    };
                    notifications.show(tr_with(
                        lang.get_untracked(),
                        key,
                        &[("name", &client.fio)],
                    ));
                    match mode {
                        EditorMode::Create => facade.add_client(client),
                        EditorMode::Edit => facade.update_client(client),
                    }
                }
                Err(err) => {
                    log::error!("failed to save client: {}", err);
                    set_error_message.set(Some(tr(lang.get_untracked(), MessageKey::SaveError)));
                    set_is_saving.set(false);
                }
            }
        });
    };

    let on_delete = move || {
        let Some(user_id) = target_id else {
            return;
        };
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message("Удалить клиента?").unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        set_is_saving.set(true);
        spawn_local(async move {
            match repository::remove(user_id).await {
                Ok(()) => {
                    notifications.show(tr_with(lang.get_untracked(), MessageKey::DeleteSuccess, &[]));
                    facade.remove_client(user_id);
                }
                Err(err) => {
                    log::error!("failed to delete client: {}", err);
                    set_error_message.set(Some(tr(lang.get_untracked(), MessageKey::DeleteError)));
                    set_is_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| facade.close_editor()>
            <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>
                        {match mode {
                            EditorMode::Create => "Новый клиент",
                            EditorMode::Edit => "Карточка клиента",
                        }}
                    </h3>
                    <button class="btn-close" on:click=move |_| facade.close_editor()>"×"</button>
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
                </Show>

                <form on:submit=on_submit>
                    <Field label="ФИО" value=fields.fio error=errors.fio disabled=is_saving />
                    <Field label="Телефон" value=fields.phone error=errors.phone disabled=is_saving />
                    <Field label="Email" value=fields.email error=errors.email disabled=is_saving />
                    <Field
                        label="Дата рождения"
                        value=fields.birthday
                        error=errors.birthday
                        input_type="date"
                        disabled=is_saving
                    />
                    <Field label="Пол" value=fields.gender disabled=is_saving />
                    <Field label="Город" value=fields.city disabled=is_saving />
                    <Field
                        label="Номер автомобиля"
                        value=fields.car_number
                        error=errors.car_number
                        disabled=is_saving
                    />
                    <Field label="Скидка" value=fields.discount disabled=is_saving />
                    <Field label="Бонусы" value=fields.bonus disabled=is_saving />
                    <Field label="Уровень лояльности" value=fields.loyalty_level disabled=is_saving />
                    <Field label="Штрихкод" value=fields.barcode disabled=is_saving />
                    <Field label="Ключ 3" value=fields.key3 disabled=is_saving />
                    <Field label="Ключ 4" value=fields.key4 disabled=is_saving />
                    <Field label="Ключ 5" value=fields.key5 disabled=is_saving />
                    <Field label="Ключ 6" value=fields.key6 disabled=is_saving />

                    <div class="form-actions">
                        <Show when=move || matches!(mode, EditorMode::Edit)>
                            <button
                                type="button"
                                class="button button--danger"
                                on:click=move |_| on_delete()
                                disabled=move || is_saving.get()
                            >
                                "Удалить"
                            </button>
                        </Show>
                        <button
                            type="button"
                            class="button button--secondary"
                            on:click=move |_| facade.close_editor()
                            disabled=move || is_saving.get()
                        >
                            "Отмена"
                        </button>
                        <button type="submit" class="button button--primary" disabled=move || is_saving.get()>
                            {move || if is_saving.get() { "Сохранение..." } else { "Сохранить" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
