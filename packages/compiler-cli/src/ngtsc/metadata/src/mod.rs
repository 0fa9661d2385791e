pub mod api;
pub mod inline_source_map;
pub mod reader;
pub mod registry;
pub mod util;
