//! Сортируемая ячейка заголовка таблицы.

use leptos::prelude::*;

use crate::shared::sorting::SortDirection;

/// Header cell with a sort indicator. A click requests the next direction
/// in the cycle for this column; the owner decides what actually happens
/// (a newly selected column always starts ascending).
#[component]
pub fn SortHeader(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Ключ поля сортировки
    field: &'static str,

    /// Текущее направление для этого поля
    #[prop(into)]
    direction: Signal<SortDirection>,

    /// Запрос сортировки: (поле, требуемое направление)
    on_sort: Callback<(&'static str, SortDirection)>,
) -> impl IntoView {
    view! {
        <th
            class="table__header-cell table__header-cell--sortable"
            on:click=move |_| on_sort.run((field, direction.get().next()))
        >
            <span>{label}</span>
            <span class="table__sort-indicator">{move || direction.get().indicator()}</span>
        </th>
    }
}
