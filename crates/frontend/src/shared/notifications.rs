//! Всплывающие уведомления.
//!
//! A single `NotificationHost` surface registers itself while mounted;
//! `NotificationService::show` targets whichever surface is currently
//! registered. Messages emitted while no surface is registered are
//! dropped with a warning log, never buffered.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEFAULT_DURATION_MS: u32 = 3000;

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    seq: u64,
    text: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    current: RwSignal<Option<Toast>>,
    registered: RwSignal<bool>,
    next_seq: RwSignal<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            registered: RwSignal::new(false),
            next_seq: RwSignal::new(1),
        }
    }

    pub fn show(&self, text: impl Into<String>) {
        self.show_for(text, DEFAULT_DURATION_MS);
    }

    pub fn show_for(&self, text: impl Into<String>, duration_ms: u32) {
        let text = text.into();
        if !self.registered.get_untracked() {
            log::warn!("notification dropped, no surface registered: {}", text);
            return;
        }

        let seq = self.next_seq.get_untracked();
        self.next_seq.set(seq + 1);
        self.current.set(Some(Toast { seq, text }));

        let current = self.current;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            // A newer toast may have replaced this one; only clear our own.
            let _ = current.try_update(|t| {
                if t.as_ref().map(|t| t.seq) == Some(seq) {
                    *t = None;
                }
            });
        });
    }
}

/// Install the service into context. Called once from `App`.
pub fn provide_notifications() {
    provide_context(NotificationService::new());
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided")
}

/// Единственная поверхность показа уведомлений.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();
    svc.registered.set(true);
    on_cleanup(move || {
        let _ = svc.registered.try_set(false);
        let _ = svc.current.try_set(None);
    });

    view! {
        <Show when=move || svc.current.get().is_some()>
            <div class="toast">
                {move || svc.current.get().map(|t| t.text).unwrap_or_default()}
            </div>
        </Show>
    }
}
