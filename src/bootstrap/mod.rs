pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use run::{render_detail, render_list};
pub use wiring::build_facade;
