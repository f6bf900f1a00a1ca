pub mod toml_loader;

pub use toml_loader::{load_school_config, load_school_config_or_default, parse_school_config};
