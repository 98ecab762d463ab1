pub mod document;
pub mod relation;
pub mod usage_rights;
