//! Small helpers shared by the app: logging, drop guards, the system
//! clipboard and the external link opener.

pub mod clipboard;
pub mod guard;
pub mod links;
pub mod logger;
