use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::schema_reader::define_working_query;
use crate::PostgresColumn;

#[derive(Debug, Eq, PartialEq)]
pub struct TableColumnsResult {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

impl FromRow for TableColumnsResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(TableColumnsResult {
            table_name: row.try_get(0)?,
            column_name: row.try_get(1)?,
            data_type: row.try_get(2)?,
            is_nullable: row.try_get::<usize, &str>(3)? == "YES",
        })
    }
}

impl TableColumnsResult {
    pub fn to_postgres_column(&self) -> PostgresColumn {
        PostgresColumn {
            name: self.column_name.clone(),
            data_type: self.data_type.clone(),
            is_nullable: self.is_nullable,
        }
    }
}

//language=postgresql
define_working_query!(
    get_columns,
    TableColumnsResult,
    r#"
select table_name::text,
       column_name::text,
       data_type::text,
       is_nullable::text
from information_schema.columns
where table_schema = 'public'
order by table_name, ordinal_position;
"#
);
