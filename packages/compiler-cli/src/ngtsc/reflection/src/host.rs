use crate::ngtsc::file_system::AbsoluteFsPath;
use indexmap::IndexMap;
use oxc_span::Span;
use std::fmt;

/// Identity of a class in the program: the file declaring it and its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId {
    pub file: AbsoluteFsPath,
    pub name: String,
}

impl ClassId {
    pub fn new(file: AbsoluteFsPath, name: impl Into<String>) -> Self {
        ClassId {
            file,
            name: name.into(),
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.file)
    }
}

/// A statically known value from a decorator argument.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticValue {
    /// A string literal or a template literal without substitutions. `span`
    /// covers the literal including its quotes.
    String { value: String, span: Span },
    Number(f64),
    Bool(bool),
    Null,
    Array(Vec<StaticValue>),
    Object(IndexMap<String, StaticValue>),
    /// Anything that needs evaluation: identifiers, calls, concatenation.
    Dynamic { span: Span },
}

impl StaticValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StaticValue::String { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, StaticValue>> {
        match self {
            StaticValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            StaticValue::String { .. } => "string",
            StaticValue::Number(_) => "number",
            StaticValue::Bool(_) => "boolean",
            StaticValue::Null => "null",
            StaticValue::Array(_) => "array",
            StaticValue::Object(_) => "object",
            StaticValue::Dynamic { .. } => "dynamic value",
        }
    }
}

/// Metadata extracted from an instance of a decorator on a class.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Name by which the decorator was invoked in the user's code.
    pub name: String,
    /// `Import` by which the decorator was brought into the module.
    pub import: Option<Import>,
    /// `None` for `@Foo` without a call.
    pub args: Option<Vec<StaticValue>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Constructor,
    Getter,
    Setter,
    Property,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassMemberAccessLevel {
    PublicWritable,
    PublicReadonly,
    Protected,
    Private,
    EcmaScriptPrivate,
}

/// What a property's initializer says about its type when no annotation is
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
    Function,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Option<String>,
    pub type_text: Option<String>,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub name: String,
    pub name_span: Span,
    pub kind: ClassMemberKind,
    pub access_level: ClassMemberAccessLevel,
    pub is_static: bool,
    pub optional: bool,
    /// Source text of the declared type annotation.
    pub type_text: Option<String>,
    pub initializer: Option<InitializerKind>,
    /// Parameters of a method, or of a function-valued property initializer.
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub decorators: Vec<Decorator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: String,
    pub span: Span,
    pub name_span: Span,
    pub decorators: Vec<Decorator>,
    pub members: Vec<ClassMember>,
    /// Identifier in the `extends` clause, when it is a plain identifier.
    pub base_class: Option<String>,
    pub exported: bool,
}

/// A named binding brought into a module by an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub local_name: String,
    /// Exported name in the source module, `default` for default imports and
    /// `*` for namespace imports.
    pub imported_name: String,
    pub from: String,
}

/// A module reduced to what the compiler needs from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReflectedModule {
    pub classes: Vec<ClassDeclaration>,
    pub imports: Vec<Import>,
    /// `export {A as B} from './x'`, as (exported name, import).
    pub re_exports: Vec<(String, Import)>,
    pub parse_errors: Vec<String>,
}

impl ReflectedModule {
    pub fn get_class(&self, name: &str) -> Option<&ClassDeclaration> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn get_import(&self, local_name: &str) -> Option<&Import> {
        self.imports.iter().find(|i| i.local_name == local_name)
    }
}

/// Abstracts reflection operations over a parsed module.
pub trait ReflectionHost {
    fn reflect_module(&self, file: &AbsoluteFsPath, text: &str) -> ReflectedModule;

    fn get_decorators_of_declaration<'c>(&self, clazz: &'c ClassDeclaration) -> &'c [Decorator] {
        &clazz.decorators
    }

    fn get_members_of_class<'c>(&self, clazz: &'c ClassDeclaration) -> &'c [ClassMember] {
        &clazz.members
    }

    fn has_base_class(&self, clazz: &ClassDeclaration) -> bool {
        clazz.base_class.is_some()
    }
}
