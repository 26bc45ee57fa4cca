mod action;
mod api;
mod author;
mod event;
mod loading;
mod message;
mod response_format;
mod session;
mod slash_commands;
mod textarea;
mod token_store;

pub use action::*;
pub use api::*;
pub use author::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use response_format::*;
pub use session::*;
pub use slash_commands::*;
pub use textarea::*;
pub use token_store::*;
