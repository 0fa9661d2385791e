//! Reflection
//!
//! Reads class declarations, decorators and imports out of TypeScript
//! sources.

pub mod src;

pub use src::host::{
    ClassDeclaration, ClassId, ClassMember, ClassMemberAccessLevel, ClassMemberKind, Decorator,
    Import, InitializerKind, Parameter, ReflectedModule, ReflectionHost, StaticValue,
};
pub use src::typescript::TypeScriptReflectionHost;
pub use src::util::{class_member_access_level_to_string, is_instance_member, is_template_accessible};

#[cfg(test)]
pub mod test;
