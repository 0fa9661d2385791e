use super::host::{ClassMember, ClassMemberAccessLevel, ClassMemberKind};

pub fn class_member_access_level_to_string(level: ClassMemberAccessLevel) -> &'static str {
    match level {
        ClassMemberAccessLevel::EcmaScriptPrivate => "ES private",
        ClassMemberAccessLevel::Private => "private",
        ClassMemberAccessLevel::Protected => "protected",
        ClassMemberAccessLevel::PublicReadonly => "public readonly",
        ClassMemberAccessLevel::PublicWritable => "public",
    }
}

/// Whether a component's own template may read the member. Templates see
/// public and protected members, never private ones.
pub fn is_template_accessible(level: ClassMemberAccessLevel) -> bool {
    matches!(
        level,
        ClassMemberAccessLevel::PublicWritable
            | ClassMemberAccessLevel::PublicReadonly
            | ClassMemberAccessLevel::Protected
    )
}

/// Instance members only: statics and the constructor are not reachable from
/// a component instance.
pub fn is_instance_member(member: &ClassMember) -> bool {
    !member.is_static && member.kind != ClassMemberKind::Constructor
}
