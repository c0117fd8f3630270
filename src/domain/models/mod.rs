mod agent;
mod author;
mod message;
mod slash_commands;

pub use agent::*;
pub use author::*;
pub use message::*;
pub use slash_commands::*;
