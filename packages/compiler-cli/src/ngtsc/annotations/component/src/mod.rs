// Annotations Component Source Module

pub mod handler;
pub mod resources;
