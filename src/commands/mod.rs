mod config_cmd;
mod message;

pub use config_cmd::ConfigCommand;
pub use message::MessageCommand;
