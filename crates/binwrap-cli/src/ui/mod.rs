//! Plain-text diagnostics for humans.

pub mod output;

pub use output::{Output, render_error};
