mod column;
mod foreign_key;
mod table;
mod schema;

pub use column::*;
pub use foreign_key::*;
pub use table::*;
pub use schema::*;
