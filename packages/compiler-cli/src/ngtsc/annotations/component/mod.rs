//! `@Component` analysis: template location and registry population.

pub mod src;

pub use src::handler::{analyze_program, ComponentDecoratorHandler};
pub use src::resources::TemplateResourceLocator;
