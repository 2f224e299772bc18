pub mod customer;
pub mod form;
