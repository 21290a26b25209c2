//! CLI command implementations.

mod config;
mod doctor;
mod info;
mod retell;
mod serve;
mod transcript;

pub use config::run_config;
pub use doctor::run_doctor;
pub use info::run_info;
pub use retell::run_retell;
pub use serve::{router, run_serve, AppState};
pub use transcript::run_transcript;
