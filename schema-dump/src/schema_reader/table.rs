use super::SchemaReader;

impl SchemaReader<'_> {
    /// Lists every table and view in the public namespace.
    #[tracing::instrument(skip_all)]
    pub async fn get_table_names(&self) -> crate::Result<Vec<String>> {
        //language=postgresql
        self.connection.get_single_results(r#"
select table_name::text from information_schema.tables
where table_schema = 'public'
order by table_name;
"#).await
    }
}
