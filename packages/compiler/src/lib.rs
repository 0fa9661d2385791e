#![deny(clippy::all)]

/**
 * Angular Template Compiler
 *
 * Template scanning and expression parsing with source spans, used by the
 * template type-checker in `angular-compiler-cli`.
 */
pub mod chars;
pub mod expression_parser;
pub mod parse_util;
pub mod template_parser;

pub use parse_util::{AbsoluteSourceSpan, ParseError, ParseLocation, ParseSpan};
pub use template_parser::{parse_template, ParsedTemplate};
