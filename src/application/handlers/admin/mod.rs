//! Admin console handlers.

mod admin_console;

pub use admin_console::{AdminConsole, AdminError};
