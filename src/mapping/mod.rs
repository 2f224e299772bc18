pub mod field_mapper;
pub mod query;
