use itertools::Itertools;
use crate::default;
use crate::models::column::PostgresColumn;
use crate::models::foreign_key::PostgresForeignKey;

#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct PostgresTable {
    pub name: String,
    pub columns: Vec<PostgresColumn>,
    pub foreign_keys: Vec<PostgresForeignKey>,
    pub primary_key_columns: Vec<String>,
}

impl PostgresTable {
    pub fn new(name: &str) -> Self {
        PostgresTable {
            name: name.to_string(),
            ..default()
        }
    }

    /// Renders the table as a `CREATE TABLE` statement with the foreign keys
    /// and the primary key inlined after the columns.
    ///
    /// Clauses are separated by commas, and the last clause never has one.
    pub fn get_create_statement(&self) -> String {
        let mut sql = "CREATE TABLE ".to_string();
        sql.push_str(&self.name);
        sql.push_str(" (\n");

        let mut clauses = Vec::with_capacity(self.columns.len() + self.foreign_keys.len() + 1);

        clauses.extend(self.columns.iter().map(|c| c.get_definition()));
        clauses.extend(self.foreign_keys.iter().map(|fk| fk.get_constraint_clause()));

        if !self.primary_key_columns.is_empty() {
            clauses.push(format!("PRIMARY KEY ({})", self.primary_key_columns.iter().join(", ")));
        }

        sql.push_str(&clauses.iter().map(|c| format!("    {c}")).join(",\n"));
        sql.push_str("\n);\n");

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use similar_asserts::assert_eq;

    fn users_table() -> PostgresTable {
        PostgresTable {
            name: "users".to_string(),
            columns: vec![
                PostgresColumn::new("id", "integer", false),
                PostgresColumn::new("email", "character varying", false),
                PostgresColumn::new("nickname", "text", true),
            ],
            ..default()
        }
    }

    #[test]
    fn renders_columns_without_constraints() {
        assert_eq!(
            users_table().get_create_statement(),
            indoc! {r#"
                CREATE TABLE users (
                    id integer NOT NULL,
                    email character varying NOT NULL,
                    nickname text NULL
                );
            "#}
        );
    }

    #[test]
    fn renders_foreign_keys_before_primary_key() {
        let table = PostgresTable {
            name: "orders".to_string(),
            columns: vec![
                PostgresColumn::new("id", "integer", false),
                PostgresColumn::new("user_id", "integer", false),
                PostgresColumn::new("note", "text", true),
            ],
            foreign_keys: vec![PostgresForeignKey {
                name: "orders_user_id_fkey".to_string(),
                source_column: "user_id".to_string(),
                target_table: "users".to_string(),
                target_column: "id".to_string(),
            }],
            primary_key_columns: vec!["id".to_string()],
        };

        assert_eq!(
            table.get_create_statement(),
            indoc! {r#"
                CREATE TABLE orders (
                    id integer NOT NULL,
                    user_id integer NOT NULL,
                    note text NULL,
                    CONSTRAINT orders_user_id_fkey FOREIGN KEY (user_id) REFERENCES users(id),
                    PRIMARY KEY (id)
                );
            "#}
        );
    }

    #[test]
    fn renders_composite_primary_key_once() {
        let table = PostgresTable {
            name: "memberships".to_string(),
            columns: vec![
                PostgresColumn::new("group_id", "integer", false),
                PostgresColumn::new("user_id", "integer", false),
            ],
            primary_key_columns: vec!["group_id".to_string(), "user_id".to_string()],
            ..default()
        };

        let sql = table.get_create_statement();

        assert_eq!(sql.matches("PRIMARY KEY").count(), 1);
        assert!(sql.contains("    user_id integer NOT NULL,\n    PRIMARY KEY (group_id, user_id)\n);"));
    }

    #[test]
    fn composite_foreign_key_renders_one_clause_per_column_pair() {
        let table = PostgresTable {
            name: "line_items".to_string(),
            columns: vec![
                PostgresColumn::new("order_id", "integer", false),
                PostgresColumn::new("order_region", "text", false),
            ],
            foreign_keys: vec![
                PostgresForeignKey {
                    name: "line_items_order_fkey".to_string(),
                    source_column: "order_id".to_string(),
                    target_table: "orders".to_string(),
                    target_column: "id".to_string(),
                },
                PostgresForeignKey {
                    name: "line_items_order_fkey".to_string(),
                    source_column: "order_region".to_string(),
                    target_table: "orders".to_string(),
                    target_column: "region".to_string(),
                },
            ],
            ..default()
        };

        let sql = table.get_create_statement();

        assert!(sql.contains("CONSTRAINT line_items_order_fkey FOREIGN KEY (order_id) REFERENCES orders(id),\n"));
        assert!(sql.ends_with("CONSTRAINT line_items_order_fkey FOREIGN KEY (order_region) REFERENCES orders(region)\n);\n"));
    }
}
