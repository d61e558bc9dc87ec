use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::schema_reader::define_working_query;

#[derive(Debug, Eq, PartialEq)]
pub struct PrimaryKeyColumnResult {
    pub table_name: String,
    pub column_name: String,
}

impl FromRow for PrimaryKeyColumnResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(PrimaryKeyColumnResult {
            table_name: row.try_get(0)?,
            column_name: row.try_get(1)?,
        })
    }
}

//language=postgresql
define_working_query!(get_primary_key_columns, PrimaryKeyColumnResult, r#"
select tc.table_name::text, kcu.column_name::text
from information_schema.table_constraints tc
join information_schema.key_column_usage kcu
    on tc.constraint_name = kcu.constraint_name
    and tc.table_schema = kcu.table_schema
    and tc.table_name = kcu.table_name
where tc.constraint_type = 'PRIMARY KEY'
  and tc.table_schema = 'public'
order by tc.table_name, kcu.ordinal_position;
"#);
