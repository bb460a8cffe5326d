mod cart;
mod config_cmd;
mod history;
mod ids;
mod render;
mod settings;
mod shell;

pub use cart::CartCommand;
pub use config_cmd::ConfigCommand;
pub use history::HistoryCommand;
pub use settings::SettingsCommand;
pub use shell::ShellCommand;
