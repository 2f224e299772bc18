pub mod core;
pub mod models;
pub mod mapping;
pub mod validation;
pub mod render;
pub mod api;
pub mod handlers;
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;
