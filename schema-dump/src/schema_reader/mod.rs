use crate::models::*;
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::schema_reader::foreign_key_column::ForeignKeyColumnResult;
use crate::schema_reader::primary_key_column::PrimaryKeyColumnResult;
use crate::schema_reader::table_column::TableColumnsResult;
use crate::Result;
use futures::try_join;
use tracing::{debug, instrument};

mod foreign_key_column;
mod primary_key_column;
mod table;
mod table_column;

/// The namespace all catalog queries are restricted to.
pub const DEFAULT_SCHEMA_NAME: &str = "public";

pub struct SchemaReader<'a> {
    connection: &'a PostgresClientWrapper,
}

impl SchemaReader<'_> {
    pub fn new(connection: &PostgresClientWrapper) -> SchemaReader {
        SchemaReader { connection }
    }

    /// Reads columns, primary keys and foreign keys of the public namespace.
    ///
    /// When `table_filter` is set only that table ends up in the result. An empty
    /// filter selects every table. The key queries are never filtered, keys of
    /// tables without columns are dropped during the join.
    #[instrument(skip_all)]
    pub async fn read_schema(&self, table_filter: Option<&str>) -> Result<PostgresSchema> {
        let (columns, primary_key_columns, foreign_key_columns) = try_join!(
            self.get_columns(),
            self.get_primary_key_columns(),
            self.get_foreign_key_columns()
        )?;

        debug!(
            columns = columns.len(),
            primary_key_columns = primary_key_columns.len(),
            foreign_key_columns = foreign_key_columns.len(),
            "Read catalog rows"
        );

        Ok(Self::build_schema(
            columns,
            &primary_key_columns,
            &foreign_key_columns,
            table_filter,
        ))
    }

    fn build_schema(
        columns: Vec<TableColumnsResult>,
        primary_key_columns: &[PrimaryKeyColumnResult],
        foreign_key_columns: &[ForeignKeyColumnResult],
        table_filter: Option<&str>,
    ) -> PostgresSchema {
        let table_filter = table_filter.filter(|t| !t.is_empty());

        let mut schema = PostgresSchema {
            name: DEFAULT_SCHEMA_NAME.to_string(),
            tables: vec![],
        };

        for column in columns {
            if table_filter.is_some_and(|t| t != column.table_name) {
                continue;
            }

            let postgres_column = column.to_postgres_column();

            // Columns arrive ordered by table, so a new table can only ever follow the last one.
            match schema.tables.last_mut() {
                Some(table) if table.name == column.table_name => {
                    table.columns.push(postgres_column);
                }
                _ => {
                    let mut table = PostgresTable::new(&column.table_name);
                    table.columns.push(postgres_column);
                    schema.tables.push(table);
                }
            }
        }

        for pk in primary_key_columns {
            if let Some(table) = schema.get_table_mut(&pk.table_name) {
                table.primary_key_columns.push(pk.column_name.clone());
            }
        }

        for fk in foreign_key_columns {
            if let Some(table) = schema.get_table_mut(&fk.source_table_name) {
                table.foreign_keys.push(fk.to_postgres_foreign_key());
            }
        }

        schema
    }
}

macro_rules! define_working_query {
    ($fn_name:ident, $result:ident, $query:literal) => {
        impl $crate::schema_reader::SchemaReader<'_> {
            #[tracing::instrument(skip_all)]
            pub(in crate::schema_reader) async fn $fn_name(&self) -> $crate::Result<Vec<$result>> {
                self.connection.get_results($query).await
            }
        }
    };
}

pub(crate) use define_working_query;
