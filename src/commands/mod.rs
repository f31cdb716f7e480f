mod beer;
mod config_cmd;
mod type_cmd;

pub use beer::BeerCommand;
pub use config_cmd::ConfigCommand;
pub use type_cmd::TypeCommand;
