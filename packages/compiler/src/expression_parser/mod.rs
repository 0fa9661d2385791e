/**
 * Expression Parser Module
 *
 * Lexer, span-carrying AST and parser for binding, action, interpolation
 * and microsyntax expressions.
 */
pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{Parser, TemplateBindingParseResult};
