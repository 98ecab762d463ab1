pub mod document;
pub mod relation;
pub mod shared;
pub mod usage_rights;
