use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use pokedex_logging::{dex_error, dex_trace};

use crate::{CatalogClient, EngineEvent, FailureKind, FetchError, RequestId};

enum EngineCommand {
    FetchPage { request: RequestId, url: String },
    FetchCategory { request: RequestId, category: String },
    FetchCategories,
    FetchDetails { request: RequestId, name: String },
}

/// Runs catalog requests on a background tokio runtime.
///
/// Requests run concurrently; each completion is reported once as an
/// [`EngineEvent`] carrying the caller's request id.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    dex_error!("Failed to start engine runtime: {}", err);
                    let reason = err.to_string();
                    while let Ok(command) = cmd_rx.recv() {
                        let _ = event_tx.send(unavailable(command, &reason));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(client.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn fetch_page(&self, request: RequestId, url: impl Into<String>) {
        self.send(EngineCommand::FetchPage {
            request,
            url: url.into(),
        });
    }

    pub fn fetch_category(&self, request: RequestId, category: impl Into<String>) {
        self.send(EngineCommand::FetchCategory {
            request,
            category: category.into(),
        });
    }

    pub fn fetch_categories(&self) {
        self.send(EngineCommand::FetchCategories);
    }

    pub fn fetch_details(&self, request: RequestId, name: impl Into<String>) {
        self.send(EngineCommand::FetchDetails {
            request,
            name: name.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            dex_error!("Engine worker is gone; dropping request");
        }
    }
}

/// Fails a command without running it, so callers waiting on its request
/// still see a completion.
fn unavailable(command: EngineCommand, reason: &str) -> EngineEvent {
    let error = || FetchError::new(FailureKind::EngineUnavailable, reason);
    match command {
        EngineCommand::FetchPage { request, .. } => EngineEvent::PageFetched {
            request,
            result: Err(error()),
        },
        EngineCommand::FetchCategory { request, .. } => EngineEvent::CategoryFetched {
            request,
            result: Err(error()),
        },
        EngineCommand::FetchCategories => EngineEvent::CategoriesFetched {
            result: Err(error()),
        },
        EngineCommand::FetchDetails { request, .. } => EngineEvent::DetailsFetched {
            request,
            result: Err(error()),
        },
    }
}

async fn handle_command(client: &dyn CatalogClient, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchPage { request, url } => {
            dex_trace!("engine: page request={}", request);
            EngineEvent::PageFetched {
                request,
                result: client.list_page(&url).await,
            }
        }
        EngineCommand::FetchCategory { request, category } => {
            dex_trace!("engine: category request={} {}", request, category);
            EngineEvent::CategoryFetched {
                request,
                result: client.list_category_members(&category).await,
            }
        }
        EngineCommand::FetchCategories => EngineEvent::CategoriesFetched {
            result: client.list_categories().await,
        },
        EngineCommand::FetchDetails { request, name } => {
            dex_trace!("engine: details request={} {}", request, name);
            EngineEvent::DetailsFetched {
                request,
                result: client.fetch_details(&name).await,
            }
        }
    }
}
