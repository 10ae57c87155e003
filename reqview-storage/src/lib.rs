mod schema;
mod sqlite;

pub use schema::{SchemaAction, SchemaCatalog, SchemaError, SchemaSpec, TableSpec};
pub use sqlite::SqliteStore;
