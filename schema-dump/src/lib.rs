#[cfg(any(test, feature = "test_utilities"))]
pub mod test_helpers;

mod postgres_client_wrapper;
mod schema_reader;
mod models;
mod error;
mod output;
mod http_client;
mod schema_dump;
mod table_list;
pub mod credentials;
pub mod orm;

pub use error::*;
pub use models::*;
pub use output::*;
pub use http_client::ServiceOptions;
pub use postgres_client_wrapper::{FromRow, PostgresClientWrapper};
pub use schema_reader::{SchemaReader, DEFAULT_SCHEMA_NAME};
pub use schema_dump::*;
pub use table_list::*;


pub(crate) fn default<T: Default>() -> T {
    T::default()
}
