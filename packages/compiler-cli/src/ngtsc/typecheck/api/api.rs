// TypeCheck API
//
// Public API types for template type-checking.

use crate::ngtsc::diagnostics::DiagnosticCategory;
use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::reflection::{ClassId, ClassMemberAccessLevel};
use angular_compiler::AbsoluteSourceSpan;
use indexmap::IndexMap;
use std::fmt;

/// Configuration for type-checking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TypeCheckingConfig {
    /// Report semantic errors (unknown members, bad calls, unknown pipes).
    /// Structural errors are reported either way.
    pub strict_templates: bool,
}

/// The type of a value as far as templates are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateType {
    Any,
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Void,
    Array(Box<TemplateType>),
    Function(FunctionType),
    /// A class or interface named in a type annotation. `origin` is the file
    /// the annotation was written in, for import resolution.
    Named { name: String, origin: AbsoluteFsPath },
    Object(Vec<(String, TemplateType)>),
    Union(Vec<TemplateType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub params: Vec<ParamType>,
    pub ret: Box<TemplateType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamType {
    pub name: Option<String>,
    pub ty: TemplateType,
    pub optional: bool,
    pub rest: bool,
}

impl FunctionType {
    /// Accepts any number of arguments.
    pub fn variadic(ret: TemplateType) -> Self {
        FunctionType {
            params: vec![ParamType {
                name: Some("args".to_string()),
                ty: TemplateType::Any,
                optional: true,
                rest: true,
            }],
            ret: Box::new(ret),
        }
    }

    pub fn min_args(&self) -> usize {
        self.params.iter().filter(|p| !p.optional && !p.rest).count()
    }

    /// `None` when a rest parameter accepts any number of trailing arguments.
    pub fn max_args(&self) -> Option<usize> {
        if self.params.iter().any(|p| p.rest) {
            None
        } else {
            Some(self.params.len())
        }
    }
}

impl TemplateType {
    pub fn is_any(&self) -> bool {
        matches!(self, TemplateType::Any)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, TemplateType::Null | TemplateType::Undefined)
    }

    /// The type without `null` and `undefined` members.
    pub fn non_nullable(&self) -> TemplateType {
        match self {
            TemplateType::Union(parts) => {
                let mut rest: Vec<TemplateType> =
                    parts.iter().filter(|p| !p.is_nullish()).cloned().collect();
                match rest.len() {
                    0 => TemplateType::Any,
                    1 => rest.remove(0),
                    _ => TemplateType::Union(rest),
                }
            }
            other => other.clone(),
        }
    }

    pub fn union(parts: Vec<TemplateType>) -> TemplateType {
        let mut flat: Vec<TemplateType> = Vec::new();
        for part in parts {
            let members = match part {
                TemplateType::Union(inner) => inner,
                other => vec![other],
            };
            for member in members {
                if member.is_any() {
                    return TemplateType::Any;
                }
                if !flat.contains(&member) {
                    flat.push(member);
                }
            }
        }
        match flat.len() {
            0 => TemplateType::Any,
            1 => flat.remove(0),
            _ => TemplateType::Union(flat),
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateType::Any => f.write_str("any"),
            TemplateType::String => f.write_str("string"),
            TemplateType::Number => f.write_str("number"),
            TemplateType::Boolean => f.write_str("boolean"),
            TemplateType::Null => f.write_str("null"),
            TemplateType::Undefined => f.write_str("undefined"),
            TemplateType::Void => f.write_str("void"),
            TemplateType::Array(elem) => match elem.as_ref() {
                TemplateType::Union(_) | TemplateType::Function(_) => write!(f, "({})[]", elem),
                other => write!(f, "{}[]", other),
            },
            TemplateType::Function(func) => {
                f.write_str("(")?;
                for (i, param) in func.params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let name = param.name.as_deref().unwrap_or("arg");
                    if param.rest {
                        write!(f, "...{}: {}", name, param.ty)?;
                    } else if param.optional {
                        write!(f, "{}?: {}", name, param.ty)?;
                    } else {
                        write!(f, "{}: {}", name, param.ty)?;
                    }
                }
                write!(f, ") => {}", func.ret)
            }
            TemplateType::Named { name, .. } => f.write_str(name),
            TemplateType::Object(fields) => {
                f.write_str("{ ")?;
                for (name, ty) in fields {
                    write!(f, "{}: {}; ", name, ty)?;
                }
                f.write_str("}")
            }
            TemplateType::Union(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingMemberKind {
    Property,
    Accessor,
    Method,
}

/// A member of a class as a template sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingMember {
    pub name: String,
    pub kind: BindingMemberKind,
    pub ty: TemplateType,
    pub access: ClassMemberAccessLevel,
    pub readonly: bool,
    /// The class that declares the member, which differs from the context's
    /// class for inherited members.
    pub declared_in: ClassId,
}

/// The members visible to a template through its component instance,
/// inherited ones included, in declaration order (subclass first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingContext {
    pub class_id: ClassId,
    members: IndexMap<String, BindingMember>,
}

impl BindingContext {
    pub fn new(class_id: ClassId) -> Self {
        BindingContext {
            class_id,
            members: IndexMap::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_id.name
    }

    /// Adds `member` unless a member of that name is already present.
    pub fn insert_if_absent(&mut self, member: BindingMember) -> bool {
        if self.members.contains_key(&member.name) {
            return false;
        }
        self.members.insert(member.name.clone(), member);
        true
    }

    pub fn get(&self, name: &str) -> Option<&BindingMember> {
        self.members.get(name)
    }

    pub fn members(&self) -> impl Iterator<Item = &BindingMember> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A diagnostic whose span is relative to the template text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateDiagnostic {
    pub category: DiagnosticCategory,
    /// Negative for Angular codes, positive for TypeScript codes.
    pub code: i32,
    pub message: String,
    pub span: AbsoluteSourceSpan,
}

/// Looks up the members of classes named in type annotations.
pub trait TypeResolver {
    fn resolve_named_type(&self, name: &str, origin: &AbsoluteFsPath) -> Option<BindingContext>;
}

/// Resolves nothing; every named type is treated as `any`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTypeResolver;

impl TypeResolver for NoopTypeResolver {
    fn resolve_named_type(&self, _name: &str, _origin: &AbsoluteFsPath) -> Option<BindingContext> {
        None
    }
}

/// Names a template may use beyond the component's own members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationScope {
    pub pipes: Vec<String>,
    /// Attribute selectors of directives in the program, usable as `*name`.
    pub structural_directives: Vec<String>,
    pub export_as: Vec<String>,
}
