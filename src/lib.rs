pub mod attributes;
pub mod config;
pub mod messages;
pub mod runtime;
pub mod side_channel;
