//! Pipeline entry points for atlas operations.
//!
//! - `run_harvest`: Fetch gene tables and write the aggregate outputs
//! - `run_validate`: Check configuration and show effective settings

pub mod harvest;
pub mod validate;

pub use harvest::{HarvestReport, run_harvest};
pub use validate::run_validate;
