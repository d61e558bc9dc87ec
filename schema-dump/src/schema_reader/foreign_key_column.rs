use tokio_postgres::Row;
use crate::postgres_client_wrapper::FromRow;
use crate::schema_reader::{define_working_query, DEFAULT_SCHEMA_NAME};
use crate::PostgresForeignKey;

/// One source/target column pair of a foreign key.
#[derive(Debug, Eq, PartialEq)]
pub struct ForeignKeyColumnResult {
    pub source_table_name: String,
    pub source_column_name: String,
    pub target_schema_name: String,
    pub target_table_name: String,
    pub target_column_name: String,
    pub constraint_name: String,
}

impl FromRow for ForeignKeyColumnResult {
    fn from_row(row: Row) -> crate::Result<Self> {
        Ok(Self {
            source_table_name: row.try_get(0)?,
            source_column_name: row.try_get(1)?,
            target_schema_name: row.try_get(2)?,
            target_table_name: row.try_get(3)?,
            target_column_name: row.try_get(4)?,
            constraint_name: row.try_get(5)?,
        })
    }
}

impl ForeignKeyColumnResult {
    /// Targets outside the public namespace are schema qualified.
    pub fn to_postgres_foreign_key(&self) -> PostgresForeignKey {
        let target_table = if self.target_schema_name == DEFAULT_SCHEMA_NAME {
            self.target_table_name.clone()
        } else {
            format!("{}.{}", self.target_schema_name, self.target_table_name)
        };

        PostgresForeignKey {
            name: self.constraint_name.clone(),
            source_column: self.source_column_name.clone(),
            target_table,
            target_column: self.target_column_name.clone(),
        }
    }
}

// Constraint names are only unique per table, so everything is resolved through the
// constraint's own relation oids. conkey and confkey are unnested in lockstep.
//language=postgresql
define_working_query!(get_foreign_key_columns, ForeignKeyColumnResult, r#"
select tab.relname::text              as source_table,
       source_table_attr.attname::text as source_column,
       target_ns.nspname::text        as target_schema,
       target_tab.relname::text       as target_table,
       target_table_attr.attname::text as target_column,
       con.conname::text              as constraint_name
from pg_catalog.pg_constraint con
         join pg_catalog.pg_class tab on tab.oid = con.conrelid
         join pg_catalog.pg_namespace tab_ns on tab_ns.oid = tab.relnamespace
         join pg_catalog.pg_class target_tab on target_tab.oid = con.confrelid
         join pg_catalog.pg_namespace target_ns on target_ns.oid = target_tab.relnamespace
         join unnest(con.conkey, con.confkey) with ordinality as cols (conkey, confkey, key_position) on true
         join pg_catalog.pg_attribute source_table_attr
              on source_table_attr.attrelid = con.conrelid and source_table_attr.attnum = cols.conkey
         join pg_catalog.pg_attribute target_table_attr
              on target_table_attr.attrelid = con.confrelid and target_table_attr.attnum = cols.confkey
where con.contype = 'f'
  and tab_ns.nspname = 'public'
order by source_table, constraint_name, cols.key_position;
"#);
