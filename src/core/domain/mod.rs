//! Domain types.

mod display;
mod document;
mod entry;
mod outcome;

pub use display::{format_value, DisplayMode};
pub use document::Document;
pub use entry::{validate_name, Entry};
pub use outcome::{Confirmed, Edited, Listing, Step};
