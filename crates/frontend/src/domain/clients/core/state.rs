//! Состояние коллекции клиентов.
//!
//! The facade's authoritative state and every transition over it, kept
//! free of signals and async so the invariants stay testable on the host:
//! at most one load in flight, wholesale list replacement, a single
//! exclusive modal, and a sorted view that never mutates the canonical
//! list.

use std::cmp::Ordering;

use contracts::clients::{Client, ClientsPage};

use crate::shared::i18n::MessageKey;
use crate::shared::sorting::SortDirection;

pub const DEFAULT_SORT_FIELD: &str = "user_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

/// Модальные окна: единый enum, одновременно открыто не более одного.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Editor {
        mode: EditorMode,
        target: Option<Client>,
    },
    Push {
        ids: Vec<i64>,
        recipient: String,
    },
}

/// Что делать после изменения поискового запроса.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Term trimmed to empty: term and error cleared, no load
    Cleared,
    /// Non-empty term: a load must follow
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Found,
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientsState {
    /// Канонический список; заменяется целиком при каждой загрузке
    pub clients: Vec<Client>,
    pub search_term: String,
    pub search_error: Option<MessageKey>,
    pub sort_field: &'static str,
    pub sort_direction: SortDirection,
    pub loading: bool,
    pub modal: ModalState,
}

impl Default for ClientsState {
    fn default() -> Self {
        Self {
            clients: Vec::new(),
            search_term: String::new(),
            search_error: None,
            sort_field: DEFAULT_SORT_FIELD,
            sort_direction: SortDirection::None,
            loading: false,
            modal: ModalState::Closed,
        }
    }
}

impl ClientsState {
    // ------------------------------------------------------------------
    // Загрузка списка
    // ------------------------------------------------------------------

    /// Returns false when a load is already outstanding; the caller must
    /// then skip the repository entirely.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.search_error = None;
        true
    }

    /// Wholesale replacement of the canonical list. A searched load that
    /// came back empty records a display-only "no matches" hint.
    pub fn finish_load_ok(&mut self, page: ClientsPage) {
        self.clients = page.passes;
        self.loading = false;
        if !self.search_term.is_empty() && self.clients.is_empty() {
            self.search_error = Some(MessageKey::NoClients);
        }
    }

    pub fn finish_load_err(&mut self) {
        self.loading = false;
        self.search_error = Some(MessageKey::SearchError);
    }

    // ------------------------------------------------------------------
    // Поиск
    // ------------------------------------------------------------------

    pub fn apply_search(&mut self, term: &str) -> SearchOutcome {
        if term.trim().is_empty() {
            self.search_term.clear();
            self.search_error = None;
            return SearchOutcome::Cleared;
        }
        self.search_term = term.to_string();
        SearchOutcome::Load
    }

    /// Clears term and error; the facade always reloads afterwards.
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.search_error = None;
    }

    // ------------------------------------------------------------------
    // Сортировка
    // ------------------------------------------------------------------

    /// Same field: the requested direction is taken as-is, including
    /// `None`. A newly selected field always starts ascending no matter
    /// what was requested.
    pub fn set_sort(&mut self, field: &'static str, direction: SortDirection) {
        if self.sort_field == field {
            self.sort_direction = direction;
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn sort_direction_for(&self, field: &str) -> SortDirection {
        if self.sort_field == field {
            self.sort_direction
        } else {
            SortDirection::None
        }
    }

    /// Производное отсортированное представление; канонический список не
    /// изменяется.
    pub fn sorted_view(&self) -> Vec<Client> {
        let mut list = self.clients.clone();
        if self.sort_direction == SortDirection::None {
            return list;
        }

        let field = self.sort_field;
        let descending = self.sort_direction == SortDirection::Desc;
        list.sort_by(|a, b| {
            let ord = compare_by_field(a, b, field);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        list
    }

    // ------------------------------------------------------------------
    // Редактор клиента
    // ------------------------------------------------------------------

    pub fn open_create_editor(&mut self) {
        self.modal = ModalState::Editor {
            mode: EditorMode::Create,
            target: None,
        };
    }

    pub fn open_edit_editor(&mut self, client: Client) {
        self.modal = ModalState::Editor {
            mode: EditorMode::Edit,
            target: Some(client),
        };
    }

    pub fn close_editor(&mut self) {
        if matches!(self.modal, ModalState::Editor { .. }) {
            self.modal = ModalState::Closed;
        }
    }

    /// Prepend (newest first) and close the editor.
    pub fn add_client(&mut self, client: Client) {
        self.clients.insert(0, client);
        self.close_editor();
    }

    /// Replace the entry with the matching id; silent no-op when absent.
    pub fn update_client(&mut self, updated: Client) {
        if let Some(slot) = self
            .clients
            .iter_mut()
            .find(|c| c.user_id == updated.user_id)
        {
            *slot = updated;
        }
        self.close_editor();
    }

    /// Remove the entry with the matching id; silent no-op when absent.
    pub fn remove_client(&mut self, user_id: i64) {
        self.clients.retain(|c| c.user_id != user_id);
        self.close_editor();
    }

    // ------------------------------------------------------------------
    // PUSH-уведомления
    // ------------------------------------------------------------------

    /// Resolves the recipient name from the first id against the supplied
    /// snapshot. When the id is not in the snapshot the modal stays
    /// closed.
    pub fn open_push(&mut self, ids: Vec<i64>, from: &[Client]) -> bool {
        let Some(first) = ids.first() else {
            return false;
        };
        let Some(client) = from.iter().find(|c| c.user_id == *first) else {
            return false;
        };

        self.modal = ModalState::Push {
            recipient: client.fio.clone(),
            ids,
        };
        true
    }

    /// Deep link: re-open the push workflow from a raw URL parameter.
    pub fn open_push_from_route(&mut self, id_text: &str, from: &[Client]) -> RouteOutcome {
        let Ok(id) = id_text.trim().parse::<i64>() else {
            return RouteOutcome::NotFound;
        };
        if self.open_push(vec![id], from) {
            RouteOutcome::Found
        } else {
            RouteOutcome::NotFound
        }
    }

    pub fn close_push(&mut self) {
        if matches!(self.modal, ModalState::Push { .. }) {
            self.modal = ModalState::Closed;
        }
    }

    /// Ids of the currently selected push recipients, if the push modal is
    /// open.
    pub fn push_ids(&self) -> Option<Vec<i64>> {
        match &self.modal {
            ModalState::Push { ids, .. } => Some(ids.clone()),
            _ => None,
        }
    }
}

/// Typed sort key of one column.
enum SortValue {
    Number(f64),
    Text(String),
}

fn sort_value(client: &Client, field: &str) -> SortValue {
    let text = |v: &Option<String>| SortValue::Text(v.clone().unwrap_or_default());
    match field {
        "user_id" => SortValue::Number(client.user_id as f64),
        "fio" => SortValue::Text(client.fio.clone()),
        "phone" => text(&client.phone),
        "email" => text(&client.email),
        "birthday" => text(&client.birthday),
        "gender" => text(&client.gender),
        "city" => text(&client.city),
        "car_number" => text(&client.car_number),
        "loyalty_level" => text(&client.loyalty_level),
        "discount" => text(&client.discount),
        "bonus" => text(&client.bonus),
        "barcode" => text(&client.barcode),
        "template" => text(&client.template),
        // Unknown column: every pair compares equal, the view keeps the
        // canonical order.
        _ => SortValue::Text(String::new()),
    }
}

fn compare_by_field(a: &Client, b: &Client, field: &str) -> Ordering {
    match (sort_value(a, field), sort_value(b, field)) {
        (SortValue::Number(x), SortValue::Number(y)) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (SortValue::Text(x), SortValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        // Mismatched value types compare equal instead of erroring.
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: i64, fio: &str) -> Client {
        let mut c = Client::empty(id);
        c.fio = fio.to_string();
        c
    }

    fn client_in_city(id: i64, fio: &str, city: Option<&str>) -> Client {
        let mut c = client(id, fio);
        c.city = city.map(str::to_string);
        c
    }

    fn page(clients: Vec<Client>) -> ClientsPage {
        ClientsPage {
            meta: Default::default(),
            passes: clients,
        }
    }

    #[test]
    fn second_begin_load_is_refused_while_first_is_outstanding() {
        let mut state = ClientsState::default();
        assert!(state.begin_load());
        assert!(!state.begin_load());

        state.finish_load_ok(page(vec![client(1, "А")]));
        assert!(!state.loading);
        assert!(state.begin_load());
    }

    #[test]
    fn begin_load_clears_previous_error() {
        let mut state = ClientsState::default();
        state.search_error = Some(MessageKey::SearchError);
        assert!(state.begin_load());
        assert_eq!(state.search_error, None);
    }

    #[test]
    fn load_replaces_list_wholesale() {
        let mut state = ClientsState::default();
        state.clients = vec![client(1, "старый")];
        state.begin_load();
        state.finish_load_ok(page(vec![client(2, "новый"), client(3, "ещё")]));
        assert_eq!(
            state.clients.iter().map(|c| c.user_id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn empty_searched_load_records_no_matches_hint() {
        let mut state = ClientsState::default();
        state.apply_search("Moscow");
        state.begin_load();
        state.finish_load_ok(page(vec![]));
        assert_eq!(state.search_error, Some(MessageKey::NoClients));

        // Without a term an empty result is not an error.
        let mut state = ClientsState::default();
        state.begin_load();
        state.finish_load_ok(page(vec![]));
        assert_eq!(state.search_error, None);
    }

    #[test]
    fn failed_load_clears_loading_and_sets_error() {
        let mut state = ClientsState::default();
        state.begin_load();
        state.finish_load_err();
        assert!(!state.loading);
        assert_eq!(state.search_error, Some(MessageKey::SearchError));
    }

    #[test]
    fn blank_search_clears_without_load() {
        let mut state = ClientsState::default();
        state.search_term = "x".to_string();
        state.search_error = Some(MessageKey::NoClients);
        assert_eq!(state.apply_search("   "), SearchOutcome::Cleared);
        assert_eq!(state.search_term, "");
        assert_eq!(state.search_error, None);

        assert_eq!(state.apply_search("Moscow"), SearchOutcome::Load);
        assert_eq!(state.search_term, "Moscow");
    }

    #[test]
    fn new_sort_field_always_starts_ascending() {
        let mut state = ClientsState::default();
        state.set_sort("fio", SortDirection::Desc);
        assert_eq!(state.sort_field, "fio");
        assert_eq!(state.sort_direction, SortDirection::Asc);

        // Same field: requested direction wins, including None.
        state.set_sort("fio", SortDirection::Desc);
        assert_eq!(state.sort_direction, SortDirection::Desc);
        state.set_sort("fio", SortDirection::None);
        assert_eq!(state.sort_direction, SortDirection::None);
    }

    #[test]
    fn sort_direction_reported_per_field() {
        let mut state = ClientsState::default();
        state.set_sort("fio", SortDirection::Asc);
        assert_eq!(state.sort_direction_for("fio"), SortDirection::Asc);
        assert_eq!(state.sort_direction_for("city"), SortDirection::None);
    }

    #[test]
    fn sorted_view_is_identity_without_direction() {
        let mut state = ClientsState::default();
        state.clients = vec![client(3, "в"), client(1, "а"), client(2, "б")];
        let view = state.sorted_view();
        assert_eq!(view, state.clients);
    }

    #[test]
    fn sorted_view_orders_numeric_field_numerically() {
        let mut state = ClientsState::default();
        state.clients = vec![client(30, "в"), client(4, "а"), client(200, "б")];
        state.set_sort("user_id", SortDirection::Asc);
        // set_sort on the default field keeps the requested direction
        assert_eq!(
            state
                .sorted_view()
                .iter()
                .map(|c| c.user_id)
                .collect::<Vec<_>>(),
            vec![4, 30, 200]
        );

        state.set_sort("user_id", SortDirection::Desc);
        assert_eq!(
            state
                .sorted_view()
                .iter()
                .map(|c| c.user_id)
                .collect::<Vec<_>>(),
            vec![200, 30, 4]
        );
    }

    #[test]
    fn descending_reverses_ascending_except_ties() {
        let mut state = ClientsState::default();
        state.clients = vec![
            client_in_city(1, "а", Some("Москва")),
            client_in_city(2, "б", Some("Казань")),
            client_in_city(3, "в", Some("Тверь")),
        ];
        state.set_sort("city", SortDirection::Asc);
        let asc: Vec<i64> = state.sorted_view().iter().map(|c| c.user_id).collect();
        state.set_sort("city", SortDirection::Desc);
        let desc: Vec<i64> = state.sorted_view().iter().map(|c| c.user_id).collect();
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn missing_values_coerce_to_empty_and_sort_first() {
        let mut state = ClientsState::default();
        state.clients = vec![
            client_in_city(1, "а", Some("Москва")),
            client_in_city(2, "б", None),
        ];
        state.set_sort("city", SortDirection::Asc);
        assert_eq!(
            state
                .sorted_view()
                .iter()
                .map(|c| c.user_id)
                .collect::<Vec<_>>(),
            vec![2, 1]
        );
        // Canonical order untouched.
        assert_eq!(
            state.clients.iter().map(|c| c.user_id).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn add_update_remove_round_trip_restores_list() {
        let mut state = ClientsState::default();
        state.clients = vec![client(1, "а"), client(2, "б")];
        let before = state.clients.clone();

        state.add_client(client(3, "новый"));
        assert_eq!(state.clients[0].user_id, 3);

        state.update_client(client(3, "переименован"));
        assert_eq!(state.clients[0].fio, "переименован");

        state.remove_client(3);
        assert_eq!(state.clients, before);
    }

    #[test]
    fn update_and_remove_of_absent_id_are_silent_noops() {
        let mut state = ClientsState::default();
        state.clients = vec![client(1, "а")];
        let before = state.clients.clone();

        state.update_client(client(99, "призрак"));
        state.remove_client(99);
        assert_eq!(state.clients, before);
    }

    #[test]
    fn editor_modal_lifecycle() {
        let mut state = ClientsState::default();
        state.open_create_editor();
        assert!(matches!(
            state.modal,
            ModalState::Editor {
                mode: EditorMode::Create,
                target: None
            }
        ));

        state.open_edit_editor(client(5, "е"));
        match &state.modal {
            ModalState::Editor {
                mode: EditorMode::Edit,
                target: Some(c),
            } => assert_eq!(c.user_id, 5),
            other => panic!("unexpected modal state: {:?}", other),
        }

        state.close_editor();
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn mutations_close_the_editor() {
        let mut state = ClientsState::default();
        state.open_create_editor();
        state.add_client(client(1, "а"));
        assert_eq!(state.modal, ModalState::Closed);

        state.open_edit_editor(client(1, "а"));
        state.update_client(client(1, "б"));
        assert_eq!(state.modal, ModalState::Closed);

        state.open_edit_editor(client(1, "б"));
        state.remove_client(1);
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn open_push_resolves_recipient_from_snapshot() {
        let mut state = ClientsState::default();
        let list = vec![client(42, "Иванов Иван")];
        assert!(state.open_push(vec![42], &list));
        match &state.modal {
            ModalState::Push { ids, recipient } => {
                assert_eq!(ids, &vec![42]);
                assert_eq!(recipient, "Иванов Иван");
            }
            other => panic!("unexpected modal state: {:?}", other),
        }
    }

    #[test]
    fn open_push_with_unknown_id_keeps_modal_closed() {
        let mut state = ClientsState::default();
        let list = vec![client(42, "Иванов Иван")];
        assert!(!state.open_push(vec![999], &list));
        assert_eq!(state.modal, ModalState::Closed);
        assert!(!state.open_push(vec![], &list));
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn push_deep_link_from_route() {
        let list = vec![client(42, "Иванов Иван")];

        let mut state = ClientsState::default();
        assert_eq!(state.open_push_from_route("42", &list), RouteOutcome::Found);
        assert!(matches!(state.modal, ModalState::Push { .. }));

        let mut state = ClientsState::default();
        assert_eq!(
            state.open_push_from_route("999", &list),
            RouteOutcome::NotFound
        );
        assert_eq!(state.modal, ModalState::Closed);

        assert_eq!(
            state.open_push_from_route("abc", &list),
            RouteOutcome::NotFound
        );
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn modal_exclusivity_is_structural() {
        let mut state = ClientsState::default();
        let list = vec![client(1, "а")];
        state.open_push(vec![1], &list);
        state.open_create_editor();
        // Opening the editor displaced the push modal entirely.
        assert!(matches!(state.modal, ModalState::Editor { .. }));
        assert_eq!(state.push_ids(), None);

        // close_push does not touch a foreign modal.
        state.close_push();
        assert!(matches!(state.modal, ModalState::Editor { .. }));
    }
}
