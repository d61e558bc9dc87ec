/// One column pair of a foreign key constraint.
///
/// Composite foreign keys show up as several of these sharing the same name.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct PostgresForeignKey {
    pub name: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

impl PostgresForeignKey {
    pub fn get_constraint_clause(&self) -> String {
        format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({})",
            self.name, self.source_column, self.target_table, self.target_column
        )
    }
}
