//! Command implementations

pub(crate) mod common;
pub mod down;
pub mod new;
pub mod parse;
pub mod status;
pub mod up;
