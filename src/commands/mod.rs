pub mod init;
pub mod validate;

pub use init::{resolve_scaffold, run_init, run_init_impl};
pub use validate::{FIX_NOT_IMPLEMENTED, format_output, run_validate, run_validate_impl};
