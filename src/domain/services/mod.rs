pub mod actions;
mod app_state;
mod auth_gate;
pub mod events;
mod login_form;
mod scroll;
mod session_store;

pub use app_state::*;
pub use auth_gate::*;
pub use login_form::*;
pub use scroll::*;
pub use session_store::*;
