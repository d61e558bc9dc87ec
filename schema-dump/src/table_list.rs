use tracing::{info, instrument};
use crate::output::{write_output_file, OutputFiles, TABLES_FILE_NAME};
use crate::postgres_client_wrapper::PostgresClientWrapper;
use crate::schema_reader::SchemaReader;
use crate::Result;

/// Renders table names as a JSON array of `{"table_name": ...}` records, one per line.
pub fn render_table_list(table_names: &[String]) -> String {
    let mut json = "[\n".to_string();

    for (idx, name) in table_names.iter().enumerate() {
        if idx > 0 {
            json.push_str(",\n");
        }
        json.push_str("{\"table_name\": ");
        json.push_str(&serde_json::Value::from(name.as_str()).to_string());
        json.push('}');
    }

    if !table_names.is_empty() {
        json.push('\n');
    }
    json.push_str("]\n");

    json
}

/// Writes the names of all tables in the public namespace to `tables.json`.
#[instrument(skip_all)]
pub async fn list_tables(connection: &PostgresClientWrapper, output: &OutputFiles) -> Result<Vec<String>> {
    let reader = SchemaReader::new(connection);
    let table_names = reader.get_table_names().await?;

    write_output_file(&output.tables_json(), &render_table_list(&table_names)).await?;

    info!(tables = table_names.len(), "Tables listed");
    println!("Tables dumped to {TABLES_FILE_NAME}");

    Ok(table_names)
}
