//! A live API server on an ephemeral port, backed by a throwaway SQLite file.

use std::time::Duration;

use agenda::adapter::outbound::sqlite::database::connection;
use agenda::adapter::outbound::sqlite::store::SqlitePersonaStore;
use agenda::infrastructure::bootstrap::serve_with;
use agenda::testkit::config::config_with_database;
use reqwest::{Client, Response};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

pub struct TestServer {
    base_url: String,
    client: Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<agenda::error::Result<()>>>,
    _dir: TempDir,
}

impl TestServer {
    pub async fn spawn() -> Self {
        Self::spawn_with_limit(DEFAULT_BODY_LIMIT).await
    }

    pub async fn spawn_with_limit(max_body_bytes: usize) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = config_with_database(&dir.path().join("agenda.db"));
        let pool = connection::open(&config.database).expect("open database");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve_with(
            listener,
            SqlitePersonaStore::new(pool),
            max_body_bytes,
            async move {
                let _ = rx.await;
            },
        ));

        Self {
            base_url: format!("http://{addr}"),
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("build client"),
            shutdown: Some(tx),
            handle: Some(handle),
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.expect("GET")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE")
    }

    /// Stop the server and wait for it to drain.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let result = handle.await.expect("server task");
            assert!(result.is_ok(), "server exited with {result:?}");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// The `error.code` field of an error response body.
pub async fn error_code(response: Response) -> String {
    let body: Value = response.json().await.expect("error body is JSON");
    body["error"]["code"]
        .as_str()
        .expect("error.code is a string")
        .to_string()
}
