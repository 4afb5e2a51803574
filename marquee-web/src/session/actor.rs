//! Actor implementation for the search session.

use marquee_core::config::SearchConfig;
use marquee_core::{Debouncer, SearchParams};
use marquee_search::{MovieSearchService, QueryKey};
use tokio::sync::{mpsc, watch};

use super::commands::{SessionCommand, SessionSnapshot};
use super::handle::SearchSessionHandle;
use crate::view::SearchView;

const COMMAND_BUFFER: usize = 32;

/// Spawns a search session actor and returns its handle.
///
/// The session starts from URL query parameters, debounces typed text with
/// `config.debounce_delay`, fetches through `service` whenever the wanted
/// query key changes, and prefetches details for every result page it shows.
pub fn spawn_search_session(
    service: MovieSearchService,
    config: &SearchConfig,
    params: SearchParams,
) -> SearchSessionHandle {
    let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
    let (fetch_sender, fetch_receiver) = mpsc::unbounded_channel();

    let view = SearchView::from_params(params);
    let (snapshot_sender, snapshots) = watch::channel(SessionSnapshot::of(&view));
    let debouncer = Debouncer::spawn(view.debounced_search().to_string(), config.debounce_delay);

    let session = SearchSession {
        view,
        service,
        debouncer,
        requested: None,
        snapshot_sender,
        fetch_sender,
    };

    tokio::spawn(async move {
        run_session_loop(session, receiver, fetch_receiver).await;
    });

    SearchSessionHandle::new(sender, snapshots)
}

struct SearchSession {
    view: SearchView,
    service: MovieSearchService,
    debouncer: Debouncer<String>,
    /// Key of the last fetch started; `None` while idle
    requested: Option<QueryKey>,
    snapshot_sender: watch::Sender<SessionSnapshot>,
    fetch_sender: mpsc::UnboundedSender<SessionCommand>,
}

impl SearchSession {
    /// Starts a fetch when the wanted query key differs from the last one.
    fn refresh(&mut self) {
        let wanted = self.view.query_key();
        if wanted == self.requested {
            return;
        }
        self.requested = wanted.clone();
        self.view.begin_fetch();

        let Some(key) = wanted else {
            return;
        };
        tracing::debug!(%key, "Starting search fetch");

        let service = self.service.clone();
        let sender = self.fetch_sender.clone();
        let search = self.view.debounced_search().to_string();
        let page = self.view.page();
        tokio::spawn(async move {
            let result = service.search(&search, page).await;
            let _ = sender.send(SessionCommand::FetchCompleted { key, result });
        });
    }

    fn publish(&self) {
        self.snapshot_sender
            .send_replace(SessionSnapshot::of(&self.view));
    }

    fn on_settled(&mut self, value: String) {
        if self.view.set_debounced(value) {
            self.refresh();
            self.publish();
        }
    }

    /// Handles a single command. Returns false to shut down.
    fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Input { value, responder } => {
                let state = self.view.on_search_input(value.clone());
                self.debouncer.push(value);
                self.refresh();
                self.publish();
                let _ = responder.send(state);
            }

            SessionCommand::ChangePage { page, responder } => {
                let state = self.view.on_page_change(page);
                self.refresh();
                self.publish();
                let _ = responder.send(state);
            }

            SessionCommand::FetchCompleted { key, result } => {
                let loaded = result.as_ref().ok().cloned();
                if self.view.apply_result(&key, result) {
                    if let Some(discovery) = loaded {
                        self.service.prefetch_details(&discovery);
                    }
                    self.publish();
                }
            }

            SessionCommand::Shutdown { responder } => {
                let _ = responder.send(());
                return false;
            }
        }

        true
    }
}

async fn run_session_loop(
    mut session: SearchSession,
    mut receiver: mpsc::Receiver<SessionCommand>,
    mut fetch_receiver: mpsc::UnboundedReceiver<SessionCommand>,
) {
    tracing::debug!("Search session started");

    let mut settled = session.debouncer.subscribe();
    session.refresh();
    session.publish();

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(command) => {
                    if !session.handle_command(command) {
                        break;
                    }
                }
                // Every handle is gone.
                None => break,
            },
            Some(command) = fetch_receiver.recv() => {
                session.handle_command(command);
            }
            Ok(()) = settled.changed() => {
                let value = settled.borrow_and_update().clone();
                session.on_settled(value);
            }
            else => break,
        }
    }

    tracing::debug!("Search session stopped");
}
