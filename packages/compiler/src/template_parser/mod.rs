//! Template Parser Module
//!
//! Turns template text into a node tree with bound attributes, events,
//! references and structural directives.

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::{is_void_element, parse_template};
