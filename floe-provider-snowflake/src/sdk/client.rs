//! Execution and query adapter
//!
//! [`Client`] validates an options value, renders it and hands the SQL to
//! an injected [`Connection`]. Nothing is retried: a failed statement is
//! returned to the caller with the operation and target attached.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use floe_core::provider::BoxFuture;
use log::debug;

use super::compute_pools::ComputePools;
use super::error::{ConnectionError, SdkError, SdkResult};
use super::image_repositories::ImageRepositories;
use super::options::QueryStruct;
use super::render::render;
use super::rows::{FromRow, Row};
use super::validation::validate;

/// Capability to run SQL against the platform
pub trait Connection: Send + Sync {
    /// Run a statement that returns no rows
    fn exec<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<(), ConnectionError>>;

    /// Run a statement and return its rows in source order
    fn query<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<Vec<Row>, ConnectionError>>;
}

/// Entry point of the SDK
#[derive(Clone)]
pub struct Client {
    connection: Arc<dyn Connection>,
    statement_timeout: Option<Duration>,
}

impl Client {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            statement_timeout: None,
        }
    }

    /// Fail statements that run longer than `timeout`
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout
    }

    pub fn compute_pools(&self) -> ComputePools<'_> {
        ComputePools::new(self)
    }

    pub fn image_repositories(&self) -> ImageRepositories<'_> {
        ImageRepositories::new(self)
    }

    /// Validate, render and execute a mutating statement
    pub async fn validate_and_exec<T: QueryStruct>(&self, opts: &T) -> SdkResult<()> {
        validate(Some(opts))?;
        let sql = render(opts);
        debug!("exec: {sql}");

        self.with_deadline(T::NAME, self.connection.exec(&sql))
            .await?
            .map_err(|source| execution_error(opts, source))
    }

    /// Validate, render and run a query, decoding every row
    pub async fn validate_and_query<T, R>(&self, opts: &T) -> SdkResult<Vec<R>>
    where
        T: QueryStruct,
        R: FromRow,
    {
        let rows = self.query_rows(opts).await?;
        rows.iter().map(R::from_row).collect()
    }

    /// Like [`Client::validate_and_query`] but expects a single row
    pub async fn validate_and_query_one<T, R>(&self, opts: &T, kind: &'static str) -> SdkResult<R>
    where
        T: QueryStruct,
        R: FromRow,
    {
        let rows = self.query_rows(opts).await?;
        let row = rows
            .first()
            .ok_or_else(|| SdkError::not_found(kind, opts.target().unwrap_or_default()))?;
        R::from_row(row)
    }

    async fn query_rows<T: QueryStruct>(&self, opts: &T) -> SdkResult<Vec<Row>> {
        validate(Some(opts))?;
        let sql = render(opts);
        debug!("query: {sql}");

        let rows = self
            .with_deadline(T::NAME, self.connection.query(&sql))
            .await?
            .map_err(|source| execution_error(opts, source))?;
        debug!("{} returned {} row(s)", T::NAME, rows.len());
        Ok(rows)
    }

    async fn with_deadline<F, O>(&self, operation: &'static str, fut: F) -> SdkResult<O>
    where
        F: Future<Output = O>,
    {
        match self.statement_timeout {
            Some(timeout) => tokio::time::timeout(timeout, fut)
                .await
                .map_err(|_| SdkError::Timeout { operation, timeout }),
            None => Ok(fut.await),
        }
    }
}

fn execution_error<T: QueryStruct>(opts: &T, source: ConnectionError) -> SdkError {
    SdkError::Execution {
        operation: T::NAME,
        target: opts.target().unwrap_or_default(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::compute_pools::DropComputePoolOptions;
    use crate::sdk::identifier::AccountObjectIdentifier;
    use crate::sdk::testing::RecordingConnection;

    fn drop_opts(name: &str) -> DropComputePoolOptions {
        DropComputePoolOptions {
            if_exists: None,
            name: AccountObjectIdentifier::new(name),
        }
    }

    #[tokio::test]
    async fn exec_renders_and_sends_statement() {
        let conn = Arc::new(RecordingConnection::new());
        let client = Client::new(conn.clone());

        client.validate_and_exec(&drop_opts("POOL")).await.unwrap();

        assert_eq!(conn.statements(), vec![r#"DROP COMPUTE POOL "POOL""#]);
    }

    #[tokio::test]
    async fn invalid_options_never_reach_the_connection() {
        let conn = Arc::new(RecordingConnection::new());
        let client = Client::new(conn.clone());

        let err = client.validate_and_exec(&drop_opts("")).await.unwrap_err();

        assert!(matches!(err, SdkError::Validation(_)));
        assert!(conn.statements().is_empty());
    }

    #[tokio::test]
    async fn connection_failure_carries_operation_and_target() {
        let conn = Arc::new(RecordingConnection::new().failing("boom"));
        let client = Client::new(conn);

        let err = client.validate_and_exec(&drop_opts("POOL")).await.unwrap_err();

        match err {
            SdkError::Execution {
                operation, target, ..
            } => {
                assert_eq!(operation, "DropComputePoolOptions");
                assert_eq!(target, r#""POOL""#);
            }
            other => panic!("expected execution error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_statements_time_out() {
        let conn = Arc::new(RecordingConnection::new().with_delay(Duration::from_secs(10)));
        let client = Client::new(conn).with_statement_timeout(Duration::from_secs(1));

        let err = client.validate_and_exec(&drop_opts("POOL")).await.unwrap_err();

        assert!(matches!(err, SdkError::Timeout { .. }));
    }
}
