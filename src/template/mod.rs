//! Card template language: `{{name}}` placeholders, `|` alternates, and
//! the small amount of HTML markup cards carry.

pub mod markup;
pub mod parser;
pub mod render;

pub use parser::extract_placeholders;
pub use render::{Bindings, render, render_segments};
