pub mod args;
pub mod shell;
