mod config_cmd;
mod estimate;
mod session;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use estimate::EstimateCommand;
pub use session::SessionCommand;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
