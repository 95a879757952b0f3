//! Embedded PostgreSQL provisioning for integration tests.
//!
//! One cluster is shared per test binary. Each test gets its own temporary
//! database with the crate's migrations applied through
//! [`run_pending_migrations`], so suites never see each other's rows.

use std::time::Duration;

use cerealnotes::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// The process-wide cluster, retried while a sibling process holds the
/// data directory.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!(
                    "pg-embed: attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed, retrying: {error:?}"
                );
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// A fresh, migrated database on the shared cluster.
///
/// The database is dropped when the returned guard goes out of scope.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", Uuid::new_v4().simple()))
        .map_err(|err| format!("create database: {err:?}"))?;
    run_pending_migrations(database.url()).map_err(|err| err.to_string())?;
    Ok(database)
}

/// Drop `table` and everything that references it, to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP TABLE IF EXISTS {table} CASCADE;"))
        .map_err(|err| format_postgres_error(&err))
}
