pub mod alert;
pub mod config;
pub mod error;
pub mod message;
pub mod plugin;
pub mod severity;

pub use alert::Alert;
pub use config::{ConfigFile, NotificationConfig};
pub use error::PluginError;
pub use message::RocketChatMessage;
pub use plugin::{Plugin, RocketChatPlugin};
