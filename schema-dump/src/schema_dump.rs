use tracing::{info, instrument, warn};
use crate::output::{write_output_file, OutputFiles, SCHEMA_FILE_NAME};
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::schema_reader::SchemaReader;
use crate::{PostgresSchema, Result};

/// Reads the schema of the public namespace, optionally only `table_filter`,
/// and writes it as `CREATE TABLE` statements to `schema.sql`. An empty
/// `table_filter` dumps every table.
#[instrument(skip(connection, output))]
pub async fn dump_schema(
    connection: &PostgresClientWrapper,
    table_filter: Option<&str>,
    output: &OutputFiles,
) -> Result<PostgresSchema> {
    let table_filter = table_filter.filter(|t| !t.is_empty());
    let reader = SchemaReader::new(connection);
    let schema = reader.read_schema(table_filter).await?;

    if let Some(table) = table_filter {
        if schema.tables.is_empty() {
            warn!(table, "Table was not found in the public schema");
        }
    }

    write_output_file(&output.schema_sql(), &schema.get_create_statements()).await?;

    info!(tables = schema.tables.len(), "Schema dumped");
    println!("Schema written to {SCHEMA_FILE_NAME}");

    Ok(schema)
}
