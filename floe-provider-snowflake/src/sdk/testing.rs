//! In-memory connection for tests

use std::sync::Mutex;
use std::time::Duration;

use floe_core::provider::BoxFuture;

use super::client::Connection;
use super::error::ConnectionError;
use super::rows::{Cell, Row};

/// Records every statement and answers queries from canned rows
#[derive(Default)]
pub struct RecordingConnection {
    statements: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, Vec<Row>)>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every statement with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer queries starting with `prefix` with `rows`, replacing any
    /// earlier answer for the same prefix
    pub fn respond(&self, prefix: &str, rows: Vec<Row>) {
        let mut responses = self.responses.lock().unwrap();
        responses.retain(|(p, _)| p != prefix);
        responses.push((prefix.to_string(), rows));
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    async fn record(&self, sql: &str) -> Result<(), ConnectionError> {
        self.statements.lock().unwrap().push(sql.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

impl Connection for RecordingConnection {
    fn exec<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<(), ConnectionError>> {
        Box::pin(self.record(sql))
    }

    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<Vec<Row>, ConnectionError>> {
        Box::pin(async move {
            self.record(sql).await?;
            let responses = self.responses.lock().unwrap();
            Ok(responses
                .iter()
                .find(|(prefix, _)| sql.starts_with(prefix.as_str()))
                .map(|(_, rows)| rows.clone())
                .unwrap_or_default())
        })
    }
}

/// A `SHOW COMPUTE POOLS` row with a null comment
pub fn compute_pool_row(name: &str) -> Row {
    Row::new()
        .with("name", name)
        .with("state", "IDLE")
        .with("min_nodes", 1_i64)
        .with("max_nodes", 2_i64)
        .with("instance_family", "STANDARD_1")
        .with("num_services", 0_i64)
        .with("num_jobs", 0_i64)
        .with("auto_suspend_secs", 600_i64)
        .with("auto_resume", true)
        .with("active_nodes", 0_i64)
        .with("idle_nodes", 1_i64)
        .with("created_on", "2024-01-02T03:04:05Z")
        .with("resumed_on", Cell::Null)
        .with("updated_on", "2024-01-02T03:04:05Z")
        .with("owner", "ACCOUNTADMIN")
        .with("comment", Cell::Null)
}

/// A `SHOW IMAGE REPOSITORIES` row with a null owner role type
pub fn image_repository_row(database: &str, schema: &str, name: &str) -> Row {
    Row::new()
        .with("created_on", "2024-01-02T03:04:05Z")
        .with("name", name)
        .with("database_name", database)
        .with("schema_name", schema)
        .with(
            "repository_url",
            format!(
                "org-acct.registry.snowflakecomputing.com/{}/{}/{}",
                database.to_lowercase(),
                schema.to_lowercase(),
                name.to_lowercase()
            ),
        )
        .with("owner", "ACCOUNTADMIN")
        .with("owner_role_type", Cell::Null)
        .with("comment", "")
}
