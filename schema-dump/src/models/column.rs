#[derive(Debug, Eq, PartialEq, Clone)]
pub struct PostgresColumn {
    pub name: String,
    /// The data type exactly as the catalog reports it, e.g. `character varying`.
    pub data_type: String,
    pub is_nullable: bool,
}

impl PostgresColumn {
    pub fn new(name: &str, data_type: &str, is_nullable: bool) -> Self {
        PostgresColumn {
            name: name.to_string(),
            data_type: data_type.to_string(),
            is_nullable,
        }
    }

    pub fn get_definition(&self) -> String {
        let nullability = if self.is_nullable {
            "NULL"
        } else {
            "NOT NULL"
        };

        format!("{} {} {}", self.name, self.data_type, nullability)
    }
}
