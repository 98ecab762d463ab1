pub mod document;
pub mod object_relation;
pub mod usage_rights;
