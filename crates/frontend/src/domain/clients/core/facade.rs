//! Фасад коллекции клиентов.
//!
//! Thin reactive shell over [`ClientsState`]: holds the state signal, runs
//! repository calls and applies their outcomes as synchronous transitions.
//! Only the facade mutates the collection state; components read the
//! signal and emit intents.

use contracts::clients::{Client, ClientsPage, PushOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::state::{ClientsState, RouteOutcome, SearchOutcome};
use crate::domain::clients::data::repository::{self, RepoError, DEFAULT_LIMIT};
use crate::shared::sorting::SortDirection;
use crate::shared::url_state;

/// Отказ отправки PUSH-уведомления.
#[derive(Debug, Clone, PartialEq)]
pub enum PushSendError {
    /// Rejected before any network call
    EmptyMessage,
    Repo(RepoError),
}

#[derive(Clone, Copy)]
pub struct ClientsFacade {
    state: RwSignal<ClientsState>,
    /// Cleared on teardown so late completions cannot touch the state.
    alive: RwSignal<bool>,
}

impl ClientsFacade {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(ClientsState::default()),
            alive: RwSignal::new(true),
        }
    }

    pub fn state(&self) -> RwSignal<ClientsState> {
        self.state
    }

    /// Sever outstanding completions. Wired to `on_cleanup` by the owning
    /// view; afterwards no in-flight call may mutate facade state.
    pub fn detach(&self) {
        let _ = self.alive.try_set(false);
    }

    fn is_alive(&self) -> bool {
        self.alive.try_get_untracked().unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Загрузка и поиск
    // ------------------------------------------------------------------

    /// Load the list for the current search term.
    ///
    /// At most one load is ever in flight: while one is outstanding the
    /// call returns an empty stub page without contacting the repository.
    /// A failure both records the local error state and propagates, so an
    /// interested caller can still react.
    pub async fn load(&self) -> Result<ClientsPage, RepoError> {
        let proceed = self.state.try_update(|s| s.begin_load()).unwrap_or(false);
        if !proceed {
            return Ok(ClientsPage::empty());
        }

        let term = self.state.with_untracked(|s| s.search_term.clone());
        match repository::list(&term, DEFAULT_LIMIT, 0).await {
            Ok(page) => {
                if self.is_alive() {
                    let _ = self.state.try_update(|s| s.finish_load_ok(page.clone()));
                }
                Ok(page)
            }
            Err(err) => {
                log::error!("failed to load clients: {}", err);
                if self.is_alive() {
                    let _ = self.state.try_update(|s| s.finish_load_err());
                }
                Err(err)
            }
        }
    }

    pub fn search(&self, term: &str) {
        let outcome = self.state.try_update(|s| s.apply_search(term));
        if outcome == Some(SearchOutcome::Load) {
            self.spawn_load();
        }
    }

    pub fn clear_search(&self) {
        let _ = self.state.try_update(|s| s.clear_search());
        self.spawn_load();
    }

    fn spawn_load(&self) {
        let this = *self;
        spawn_local(async move {
            let _ = this.load().await;
        });
    }

    // ------------------------------------------------------------------
    // Сортировка
    // ------------------------------------------------------------------

    pub fn sort(&self, field: &'static str, direction: SortDirection) {
        let _ = self.state.try_update(|s| s.set_sort(field, direction));
    }

    pub fn sort_direction_for(&self, field: &'static str) -> SortDirection {
        self.state.with(|s| s.sort_direction_for(field))
    }

    /// Derived sorted view; recomputed from the canonical list and the
    /// sort state.
    pub fn sorted_view(&self) -> Vec<Client> {
        self.state.with(|s| s.sorted_view())
    }

    // ------------------------------------------------------------------
    // Редактор клиента
    // ------------------------------------------------------------------

    pub fn open_create_editor(&self) {
        let _ = self.state.try_update(|s| s.open_create_editor());
    }

    pub fn open_edit_editor(&self, client: Client) {
        let _ = self.state.try_update(|s| s.open_edit_editor(client));
    }

    pub fn close_editor(&self) {
        let _ = self.state.try_update(|s| s.close_editor());
    }

    pub fn add_client(&self, client: Client) {
        let _ = self.state.try_update(|s| s.add_client(client));
    }

    pub fn update_client(&self, client: Client) {
        let _ = self.state.try_update(|s| s.update_client(client));
    }

    pub fn remove_client(&self, user_id: i64) {
        let _ = self.state.try_update(|s| s.remove_client(user_id));
    }

    // ------------------------------------------------------------------
    // PUSH-уведомления
    // ------------------------------------------------------------------

    pub fn open_push(&self, ids: Vec<i64>, from: &[Client]) -> bool {
        self.state
            .try_update(|s| s.open_push(ids, from))
            .unwrap_or(false)
    }

    pub fn open_push_from_route(&self, id_text: &str, from: &[Client]) -> RouteOutcome {
        self.state
            .try_update(|s| s.open_push_from_route(id_text, from))
            .unwrap_or(RouteOutcome::NotFound)
    }

    pub fn close_push(&self) {
        let _ = self.state.try_update(|s| s.close_push());
    }

    /// Send the push message to the currently selected recipients. An
    /// empty trimmed message is rejected before any network call; the
    /// caller reacts to the outcome and closes the modal on success.
    pub async fn send_push(&self, message: &str) -> Result<PushOutcome, PushSendError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(PushSendError::EmptyMessage);
        }

        let ids = self
            .state
            .with_untracked(|s| s.push_ids())
            .unwrap_or_default();
        repository::send_push(&ids, message)
            .await
            .map_err(PushSendError::Repo)
    }

    // ------------------------------------------------------------------
    // Синхронизация с URL
    // ------------------------------------------------------------------

    /// Record the push target in the query string so the workflow survives
    /// a reload; other parameters are preserved and history does not grow.
    pub fn push_url_set(&self, user_id: i64) {
        let merged = url_state::merge_query_param(
            &url_state::current_search(),
            "push",
            Some(&user_id.to_string()),
        );
        url_state::replace_query(&merged);
    }

    pub fn push_url_clear(&self) {
        let merged = url_state::merge_query_param(&url_state::current_search(), "push", None);
        url_state::replace_query(&merged);
    }
}

impl Default for ClientsFacade {
    fn default() -> Self {
        Self::new()
    }
}
