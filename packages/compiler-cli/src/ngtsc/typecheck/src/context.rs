// TypeCheck Context
//
// Builds the binding context a template is checked against: the instance
// members of its component class and of every class it extends.

use super::super::api::{
    BindingContext, BindingMember, BindingMemberKind, FunctionType, ParamType, TemplateType,
    TypeResolver,
};
use super::types::parse_type_text;
use crate::ngtsc::file_system::{AbsoluteFsPath, PathManipulation};
use crate::ngtsc::program_driver::{Program, SourceFile};
use crate::ngtsc::reflection::{
    is_instance_member, ClassDeclaration, ClassId, ClassMember, ClassMemberAccessLevel,
    ClassMemberKind, InitializerKind, Parameter,
};
use std::collections::HashSet;

pub struct BindingContextBuilder<'p, P: PathManipulation + ?Sized> {
    program: &'p Program,
    paths: &'p P,
}

impl<'p, P: PathManipulation + ?Sized> BindingContextBuilder<'p, P> {
    pub fn new(program: &'p Program, paths: &'p P) -> Self {
        Self { program, paths }
    }

    /// The binding context of class `id`, or `None` when the class is not in
    /// the program.
    pub fn build(&self, id: &ClassId) -> Option<BindingContext> {
        let sf = self.program.get_source_file(&id.file)?;
        let clazz = sf.module.get_class(&id.name)?;
        let mut context = BindingContext::new(id.clone());
        let mut visited: HashSet<ClassId> = HashSet::new();

        let mut current = Some((sf, clazz));
        while let Some((sf, clazz)) = current {
            let class_id = sf.class_id(clazz);
            if !visited.insert(class_id.clone()) {
                tracing::warn!(class = %id, at = %class_id, "circular class inheritance");
                break;
            }
            add_class_members(&mut context, sf, clazz, &class_id);
            current = clazz.base_class.as_deref().and_then(|base| {
                let resolved = self.program.resolve_class_reference(self.paths, &sf.path, base);
                if resolved.is_none() {
                    tracing::trace!(class = %class_id, base, "base class outside the program");
                }
                resolved
            });
        }
        tracing::trace!(class = %id, members = context.len(), "built binding context");
        Some(context)
    }
}

fn add_class_members(context: &mut BindingContext, sf: &SourceFile, clazz: &ClassDeclaration, class_id: &ClassId) {
    for member in clazz.members.iter().filter(|m| is_instance_member(m)) {
        let binding = match member.kind {
            ClassMemberKind::Method => BindingMember {
                name: member.name.clone(),
                kind: BindingMemberKind::Method,
                ty: TemplateType::Function(function_type(
                    &member.parameters,
                    member.return_type.as_deref(),
                    &sf.path,
                )),
                access: member.access_level,
                readonly: true,
                declared_in: class_id.clone(),
            },
            ClassMemberKind::Getter | ClassMemberKind::Setter => {
                let has_setter = clazz
                    .members
                    .iter()
                    .any(|m| m.name == member.name && m.kind == ClassMemberKind::Setter && !m.is_static);
                BindingMember {
                    name: member.name.clone(),
                    kind: BindingMemberKind::Accessor,
                    ty: declared_type(member, &sf.path),
                    access: member.access_level,
                    readonly: !has_setter,
                    declared_in: class_id.clone(),
                }
            }
            ClassMemberKind::Property => BindingMember {
                name: member.name.clone(),
                kind: BindingMemberKind::Property,
                ty: declared_type(member, &sf.path),
                access: member.access_level,
                readonly: member.access_level == ClassMemberAccessLevel::PublicReadonly,
                declared_in: class_id.clone(),
            },
            ClassMemberKind::Constructor => continue,
        };
        context.insert_if_absent(binding);
    }
}

/// The annotated type of a member, or what its initializer implies.
fn declared_type(member: &ClassMember, origin: &AbsoluteFsPath) -> TemplateType {
    if let Some(text) = &member.type_text {
        return parse_type_text(text, origin);
    }
    match member.initializer {
        Some(InitializerKind::String) => TemplateType::String,
        Some(InitializerKind::Number) => TemplateType::Number,
        Some(InitializerKind::Boolean) => TemplateType::Boolean,
        Some(InitializerKind::Array) => TemplateType::Array(Box::new(TemplateType::Any)),
        Some(InitializerKind::Function) => TemplateType::Function(function_type(
            &member.parameters,
            member.return_type.as_deref(),
            origin,
        )),
        _ => TemplateType::Any,
    }
}

fn function_type(params: &[Parameter], return_type: Option<&str>, origin: &AbsoluteFsPath) -> FunctionType {
    FunctionType {
        params: params
            .iter()
            .map(|p| ParamType {
                name: p.name.clone(),
                ty: p
                    .type_text
                    .as_deref()
                    .map(|t| parse_type_text(t, origin))
                    .unwrap_or(TemplateType::Any),
                optional: p.optional,
                rest: p.rest,
            })
            .collect(),
        ret: Box::new(
            return_type
                .map(|t| parse_type_text(t, origin))
                .unwrap_or(TemplateType::Any),
        ),
    }
}

/// Resolves class names in type annotations through the program's imports.
pub struct ProgramTypeResolver<'p, P: PathManipulation + ?Sized> {
    builder: BindingContextBuilder<'p, P>,
}

impl<'p, P: PathManipulation + ?Sized> ProgramTypeResolver<'p, P> {
    pub fn new(program: &'p Program, paths: &'p P) -> Self {
        Self {
            builder: BindingContextBuilder::new(program, paths),
        }
    }
}

impl<'p, P: PathManipulation + ?Sized> TypeResolver for ProgramTypeResolver<'p, P> {
    fn resolve_named_type(&self, name: &str, origin: &AbsoluteFsPath) -> Option<BindingContext> {
        let (sf, clazz) = self
            .builder
            .program
            .resolve_class_reference(self.builder.paths, origin, name)?;
        self.builder.build(&sf.class_id(clazz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngtsc::file_system::testing::MockFileSystem;
    use crate::ngtsc::program_driver::{OxcProgramDriver, ProgramDriver};

    fn abs(path: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(path.to_string())
    }

    fn program(fs: &MockFileSystem, root: &str) -> Program {
        OxcProgramDriver::new(fs).create_program(&[abs(root)], None).unwrap()
    }

    mod binding_context_tests {
        use super::*;

        #[test]
        fn should_collect_instance_members_with_their_types() {
            let fs = MockFileSystem::new_posix();
            fs.init_with_files(vec![(
                "/app/cmp.ts",
                "export class Cmp {\n\
                   static instances = 0;\n\
                   name = 'x';\n\
                   count: number;\n\
                   readonly tags: string[] = [];\n\
                   private secret = 1;\n\
                   constructor(public title: string) {}\n\
                   get label(): string { return ''; }\n\
                   greet(who: string, loud?: boolean): string { return who; }\n\
                 }\n",
            )]);
            let program = program(&fs, "/app/cmp.ts");
            let context = BindingContextBuilder::new(&program, &fs)
                .build(&ClassId::new(abs("/app/cmp.ts"), "Cmp"))
                .unwrap();

            assert!(context.get("instances").is_none());
            assert!(context.get("constructor").is_none());
            assert_eq!(context.get("name").unwrap().ty, TemplateType::String);
            assert_eq!(context.get("count").unwrap().ty, TemplateType::Number);
            assert!(context.get("tags").unwrap().readonly);
            assert_eq!(context.get("secret").unwrap().access, ClassMemberAccessLevel::Private);
            assert_eq!(context.get("title").unwrap().ty, TemplateType::String);

            let label = context.get("label").unwrap();
            assert_eq!(label.kind, BindingMemberKind::Accessor);
            assert!(label.readonly);

            match &context.get("greet").unwrap().ty {
                TemplateType::Function(func) => {
                    assert_eq!(func.min_args(), 1);
                    assert_eq!(func.max_args(), Some(2));
                }
                other => panic!("unexpected type: {:?}", other),
            }
        }

        #[test]
        fn should_include_inherited_members_with_subclass_shadowing() {
            let fs = MockFileSystem::new_posix();
            fs.init_with_files(vec![
                (
                    "/app/cmp.ts",
                    "import {Base} from './base';\nexport class Cmp extends Base { value: number; }\n",
                ),
                (
                    "/app/base.ts",
                    "export class Root { rootProp = true; }\nexport class Base extends Root { value: string; baseProp = 1; }\n",
                ),
            ]);
            let program = program(&fs, "/app/cmp.ts");
            let context = BindingContextBuilder::new(&program, &fs)
                .build(&ClassId::new(abs("/app/cmp.ts"), "Cmp"))
                .unwrap();

            let names: Vec<&str> = context.members().map(|m| m.name.as_str()).collect();
            assert_eq!(names, vec!["value", "baseProp", "rootProp"]);
            assert_eq!(context.get("value").unwrap().ty, TemplateType::Number);
            assert_eq!(
                context.get("baseProp").unwrap().declared_in,
                ClassId::new(abs("/app/base.ts"), "Base")
            );
        }

        #[test]
        fn should_stop_on_inheritance_cycles() {
            let fs = MockFileSystem::new_posix();
            fs.init_with_files(vec![(
                "/app/cmp.ts",
                "export class A extends B { a = 1; }\nexport class B extends A { b = 2; }\n",
            )]);
            let program = program(&fs, "/app/cmp.ts");
            let context = BindingContextBuilder::new(&program, &fs)
                .build(&ClassId::new(abs("/app/cmp.ts"), "A"))
                .unwrap();
            assert_eq!(context.len(), 2);
        }

        #[test]
        fn should_treat_accessors_with_setters_as_writable() {
            let fs = MockFileSystem::new_posix();
            fs.init_with_files(vec![(
                "/app/cmp.ts",
                "export class Cmp {\n get v(): number { return 1; }\n set v(x: number) {}\n}\n",
            )]);
            let program = program(&fs, "/app/cmp.ts");
            let context = BindingContextBuilder::new(&program, &fs)
                .build(&ClassId::new(abs("/app/cmp.ts"), "Cmp"))
                .unwrap();
            assert_eq!(context.len(), 1);
            assert!(!context.get("v").unwrap().readonly);
            assert_eq!(context.get("v").unwrap().ty, TemplateType::Number);
        }

        #[test]
        fn should_return_none_for_unknown_classes() {
            let fs = MockFileSystem::new_posix();
            fs.init_with_files(vec![("/app/cmp.ts", "export class Cmp {}\n")]);
            let program = program(&fs, "/app/cmp.ts");
            let builder = BindingContextBuilder::new(&program, &fs);
            assert!(builder.build(&ClassId::new(abs("/app/cmp.ts"), "Other")).is_none());
        }
    }
}
