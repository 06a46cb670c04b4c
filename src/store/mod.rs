pub mod history;
pub mod json_store;
pub mod schema;
