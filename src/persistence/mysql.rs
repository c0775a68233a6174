//! MySQL implementation of the persistence layer.
//!
//! [`Database`] wraps a bounded `sqlx::MySqlPool` and centralizes the
//! acquire/release discipline: callers never touch raw connections
//! outside [`Database::transaction`], and every statement goes through
//! a primitive that returns the connection to the pool on success and
//! failure alike.

use std::time::Duration;

use futures_util::future::BoxFuture;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlQueryResult, MySqlRow};
use sqlx::{Connection, MySql, MySqlPool, Transaction};

use crate::config::AppConfig;
use crate::error::DbError;

/// Pooled MySQL store built on `sqlx::MySqlPool`.
///
/// The pool bounds concurrent database load at
/// `database_max_connections`; callers beyond the limit queue on
/// acquire rather than failing outright.
#[derive(Debug, Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Creates the connection pool from discrete configuration keys.
    ///
    /// The pool connects lazily: no connection is opened here, so pool
    /// creation itself cannot fail. Connectivity is verified separately
    /// by [`Database::probe`] and, failing that, by the first statement
    /// that actually runs.
    #[must_use]
    pub fn connect(config: &AppConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_password)
            .database(&config.db_name);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
            // Keep idle connections alive for the process lifetime.
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Startup connectivity probe: checks out one connection, pings it,
    /// and returns it to the pool.
    ///
    /// Observational only — a failure here is logged and does not halt
    /// startup. If the database is truly unreachable, later statements
    /// fail individually.
    pub async fn probe(&self) {
        match self.pool.acquire().await {
            Ok(mut conn) => match conn.ping().await {
                Ok(()) => tracing::info!("database connection verified"),
                Err(err) => {
                    tracing::error!(error = %err, "database ping failed during startup probe");
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "could not acquire a database connection at startup");
            }
        }
    }

    /// Runs a single parameterized statement on a pool connection.
    ///
    /// The connection is acquired implicitly and released back to the
    /// pool whether the statement succeeds or fails. Write statements
    /// report affected-row metadata through the returned
    /// [`MySqlQueryResult`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Query`] carrying the driver error; the
    /// failure is also logged here with full detail.
    pub async fn execute(&self, sql: &str, params: &[&str]) -> Result<MySqlQueryResult, DbError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }

        query.execute(&self.pool).await.map_err(|err| {
            tracing::error!(error = %err, "database query error");
            DbError::Query(err)
        })
    }

    /// Runs a single parameterized statement and returns the result rows.
    ///
    /// Read-side counterpart of [`Database::execute`]; same acquire and
    /// release contract.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Query`] carrying the driver error.
    pub async fn fetch_all(&self, sql: &str, params: &[&str]) -> Result<Vec<MySqlRow>, DbError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }

        query.fetch_all(&self.pool).await.map_err(|err| {
            tracing::error!(error = %err, "database query error");
            DbError::Query(err)
        })
    }

    /// Runs the supplied unit of work inside a transaction.
    ///
    /// Acquires a dedicated connection, begins a transaction, and hands
    /// it to `work`. Commits when `work` succeeds and rolls back when it
    /// fails; the connection returns to the pool in both cases. The
    /// work's result is returned on success; its failure is re-signaled
    /// as [`DbError::Transaction`] after rollback.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Transaction`] wrapping the failure that
    /// aborted the transaction (begin, the work itself, or commit).
    pub async fn transaction<T, F>(&self, work: F) -> Result<T, DbError>
    where
        F: for<'t> FnOnce(&'t mut Transaction<'static, MySql>) -> BoxFuture<'t, Result<T, DbError>>,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| DbError::Transaction(Box::new(DbError::Query(err))))?;

        match work(&mut tx).await {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|err| DbError::Transaction(Box::new(DbError::Query(err))))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed after transaction error");
                }
                tracing::error!(error = %err, "transaction rolled back");
                Err(DbError::Transaction(Box::new(err)))
            }
        }
    }

    /// Closes the pool, waiting for checked-out connections to return.
    ///
    /// Called once during graceful shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    /// Configuration pointing at a port nothing listens on, with a
    /// short acquire timeout so failure paths resolve quickly.
    fn unreachable_config() -> AppConfig {
        AppConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap_or_else(|_| {
                panic!("valid socket address");
            }),
            db_host: "127.0.0.1".to_string(),
            db_port: 1,
            db_name: "registro_test".to_string(),
            db_user: "registro".to_string(),
            db_password: "registro".to_string(),
            database_max_connections: 2,
            database_acquire_timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn connect_is_lazy_and_never_fails() {
        // No MySQL server is reachable, yet pool construction succeeds.
        let db = Database::connect(&unreachable_config());
        db.close().await;
    }

    #[tokio::test]
    async fn execute_surfaces_query_error_when_unreachable() {
        let db = Database::connect(&unreachable_config());

        let result = db
            .execute(
                "INSERT INTO usuarios (nombres_completos, email, pw) VALUES (?, ?, ?)",
                &["Ana", "ana@x.com", "secret"],
            )
            .await;

        let Err(err) = result else {
            panic!("expected a query error against an unreachable database");
        };
        assert!(matches!(err, DbError::Query(_)));
    }

    #[tokio::test]
    async fn fetch_all_surfaces_query_error_when_unreachable() {
        let db = Database::connect(&unreachable_config());

        let result = db
            .fetch_all("SELECT email FROM usuarios WHERE email = ?", &["ana@x.com"])
            .await;

        let Err(err) = result else {
            panic!("expected a query error against an unreachable database");
        };
        assert!(matches!(err, DbError::Query(_)));
    }

    #[tokio::test]
    async fn transaction_surfaces_transaction_error_when_unreachable() {
        let db = Database::connect(&unreachable_config());

        let result: Result<(), DbError> = db
            .transaction(|_tx: &mut Transaction<'static, MySql>| Box::pin(async { Ok(()) }))
            .await;

        let Err(err) = result else {
            panic!("expected a transaction error against an unreachable database");
        };
        assert!(matches!(err, DbError::Transaction(_)));
    }

    #[tokio::test]
    async fn probe_is_non_fatal_when_unreachable() {
        let db = Database::connect(&unreachable_config());
        // Must return normally; the failure only surfaces as a log line.
        db.probe().await;
    }

    // Live-database tests below run against a real MySQL server
    // configured through the usual DB_* environment variables:
    //
    //     cargo test -- --ignored
    //
    // They use their own scratch tables and clean up after themselves.

    fn live_config() -> AppConfig {
        let Ok(config) = AppConfig::from_env() else {
            panic!("environment configuration must parse");
        };
        config
    }

    #[tokio::test]
    #[ignore = "requires a reachable MySQL server configured via DB_* env vars"]
    async fn transaction_commit_makes_statements_visible() {
        let db = Database::connect(&live_config());

        let Ok(_) = db
            .execute("DROP TABLE IF EXISTS tx_commit_check", &[])
            .await
        else {
            panic!("scratch table cleanup failed");
        };
        let Ok(_) = db
            .execute("CREATE TABLE tx_commit_check (id INT PRIMARY KEY)", &[])
            .await
        else {
            panic!("scratch table creation failed");
        };

        let result: Result<(), DbError> = db
            .transaction(|tx: &mut Transaction<'static, MySql>| {
                Box::pin(async move {
                    sqlx::query("INSERT INTO tx_commit_check (id) VALUES (1)")
                        .execute(&mut **tx)
                        .await
                        .map_err(DbError::Query)?;
                    Ok(())
                })
            })
            .await;
        assert!(result.is_ok());

        let Ok(rows) = db.fetch_all("SELECT id FROM tx_commit_check", &[]).await else {
            panic!("post-commit read failed");
        };
        assert_eq!(rows.len(), 1);

        let _ = db.execute("DROP TABLE tx_commit_check", &[]).await;
        db.close().await;
    }

    #[tokio::test]
    #[ignore = "requires a reachable MySQL server configured via DB_* env vars"]
    async fn transaction_rollback_discards_statements() {
        let db = Database::connect(&live_config());

        let Ok(_) = db
            .execute("DROP TABLE IF EXISTS tx_rollback_check", &[])
            .await
        else {
            panic!("scratch table cleanup failed");
        };
        let Ok(_) = db
            .execute("CREATE TABLE tx_rollback_check (id INT PRIMARY KEY)", &[])
            .await
        else {
            panic!("scratch table creation failed");
        };

        let result: Result<(), DbError> = db
            .transaction(|tx: &mut Transaction<'static, MySql>| {
                Box::pin(async move {
                    sqlx::query("INSERT INTO tx_rollback_check (id) VALUES (1)")
                        .execute(&mut **tx)
                        .await
                        .map_err(DbError::Query)?;
                    // Failing unit of work: the insert above must not survive.
                    Err(DbError::Query(sqlx::Error::RowNotFound))
                })
            })
            .await;
        let Err(err) = result else {
            panic!("expected the unit of work to fail");
        };
        assert!(matches!(err, DbError::Transaction(_)));

        let Ok(rows) = db.fetch_all("SELECT id FROM tx_rollback_check", &[]).await else {
            panic!("post-rollback read failed");
        };
        assert!(rows.is_empty());

        let _ = db.execute("DROP TABLE tx_rollback_check", &[]).await;
        db.close().await;
    }

    #[tokio::test]
    #[ignore = "requires a reachable MySQL server configured via DB_* env vars"]
    async fn burst_past_pool_limit_queues_instead_of_failing() {
        let mut config = live_config();
        config.database_max_connections = 2;
        let db = Database::connect(&config);

        // Four times as many concurrent statements as connections; each
        // holds its connection briefly so the pool actually saturates.
        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.execute("SELECT SLEEP(0.1)", &[]).await
            }));
        }

        for handle in handles {
            let Ok(result) = handle.await else {
                panic!("statement task panicked");
            };
            assert!(result.is_ok());
        }

        db.close().await;
    }
}
