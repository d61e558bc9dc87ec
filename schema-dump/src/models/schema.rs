use crate::models::table::PostgresTable;

/// The tables of one namespace, in the order the catalog returned them.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct PostgresSchema {
    pub name: String,
    pub tables: Vec<PostgresTable>,
}

impl PostgresSchema {
    pub fn get_table(&self, name: &str) -> Option<&PostgresTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub(crate) fn get_table_mut(&mut self, name: &str) -> Option<&mut PostgresTable> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// Renders every table as a `CREATE TABLE` statement, each followed by a blank line.
    pub fn get_create_statements(&self) -> String {
        let mut sql = String::new();

        for table in &self.tables {
            sql.push_str(&table.get_create_statement());
            sql.push('\n');
        }

        sql
    }
}
