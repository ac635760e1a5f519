//! Command implementations.

mod admin;
mod check;
mod export;
mod matrix;
mod validate;

pub use admin::AdminCommand;
pub use check::CheckCommand;
pub use export::ExportCommand;
pub use matrix::MatrixCommand;
pub use validate::ValidateCommand;
