pub mod api;
pub mod oxc_program_driver;

pub use api::*;
pub use oxc_program_driver::*;
