//! User-facing messages.
//!
//! All console text is defined once, as variants of [`Message`] with a
//! `Display` impl in `display.rs`; the `msg_*` macros in `macros.rs` decide
//! whether it goes to the console or to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
