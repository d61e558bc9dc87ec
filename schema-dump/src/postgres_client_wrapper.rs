use std::sync::Arc;
use rustls::{ClientConfig, RootCertStore};
use tokio::task::JoinHandle;
use tokio_postgres::types::FromSqlOwned;
use tokio_postgres::{Client, Row};
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::debug;
use crate::{Result, SchemaDumpError};

/// A connection to the database that is being inspected.
///
/// Only read queries are ever issued through this wrapper.
pub struct PostgresClientWrapper {
    client: Client,
    join_handle: JoinHandle<Result<()>>,
}

impl PostgresClientWrapper {
    /// Connects using a libpq style connection string or a `postgres://` url,
    /// passed through to the driver as is. `sslmode` is honored, server
    /// certificates are verified against the webpki roots.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let (client, connection) =
            tokio_postgres::connect(connection_string, tls_connector()?).await?;

        // The connection object performs the actual communication with the database,
        // so spawn it off to run on its own.
        let join_handle = tokio::spawn(async move {
            match connection.await {
                Err(e) => Err(SchemaDumpError::PostgresError(e)),
                Ok(_) => Ok(())
            }
        });

        debug!("Connected to postgres");

        Ok(PostgresClientWrapper {
            client,
            join_handle,
        })
    }

    pub async fn execute_non_query(&self, sql: &str) -> Result {
        self.client.batch_execute(sql).await.map_err(|e| SchemaDumpError::PostgresErrorWithQuery {
            source: e,
            query: sql.to_string(),
        })?;

        Ok(())
    }

    pub async fn get_results<T: FromRow>(&self, sql: &str) -> Result<Vec<T>> {

        let query_results = self.client.query(sql, &[]).await.map_err(|e| SchemaDumpError::PostgresErrorWithQuery {
            source: e,
            query: sql.to_string(),
        })?;

        let mut output = Vec::with_capacity(query_results.len());

        for row in query_results.into_iter() {
            output.push(T::from_row(row)?);
        }

        Ok(output)
    }

    pub async fn get_single_results<T: FromSqlOwned>(&self, sql: &str) -> Result<Vec<T>> {
        let r = self.get_results::<(T,)>(sql).await?.into_iter()
            .map(|t| t.0)
            .collect();

        Ok(r)
    }
}

fn tls_connector() -> Result<MakeRustlsConnect> {
    let roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(MakeRustlsConnect::new(config))
}

impl Drop for PostgresClientWrapper {
    fn drop(&mut self) {
        self.join_handle.abort();
    }
}

pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self>;
}

impl<T1: FromSqlOwned> FromRow for (T1,) {
    fn from_row(row: Row) -> Result<Self> {
        Ok((
            row.try_get(0)?,
        ))
    }
}

impl<T1: FromSqlOwned, T2: FromSqlOwned> FromRow for (T1, T2) {
    fn from_row(row: Row) -> Result<Self> {
        Ok((
            row.try_get(0)?,
            row.try_get(1)?,
        ))
    }
}
