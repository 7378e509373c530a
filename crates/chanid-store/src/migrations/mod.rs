//! Embedded migrations framework

pub mod checksums;
pub mod embedded;
pub mod runner;

pub use runner::apply_migrations;
