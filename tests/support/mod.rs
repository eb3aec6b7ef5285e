#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use study_organizer::api::AppState;
use study_organizer::client::ApiClient;
use study_organizer::config::{ClientConfig, DashboardConfig, ServerConfig};
use study_organizer::server::{app, serve_with_listener};
use study_organizer::store::TaskStore;
use study_organizer::task::{Task, TaskId};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server bound to an ephemeral port on localhost. Dropping it shuts the
/// server down.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<TaskStore>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let store = Arc::new(TaskStore::new());
        let state = AppState::new(store.clone(), DashboardConfig::default());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let address = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let router = app(state, &ServerConfig::default());
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            serve_with_listener(listener, router, shutdown)
                .await
                .expect("serve");
        });

        Self {
            base_url: format!("http://{address}"),
            store,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Shut the server down and wait until it has stopped serving.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.expect("server task");
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ClientConfig {
            api_url: self.base_url.clone(),
            timeout_secs: 5,
        })
        .expect("client")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> ApiClient {
    ApiClient::new(&ClientConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
    })
    .expect("client")
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
}

pub fn task(id: u64, title: &str, due: Option<&str>, completed: bool) -> Task {
    Task {
        id: TaskId::new(id),
        title: title.to_string(),
        description: None,
        due_date: due.map(str::to_string),
        completed,
    }
}
