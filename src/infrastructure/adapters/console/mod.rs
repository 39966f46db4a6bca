//! Console Adapter

mod stdin_confirm;

pub use stdin_confirm::StdinConfirm;
