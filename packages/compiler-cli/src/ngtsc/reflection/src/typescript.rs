use super::host::*;
use crate::ngtsc::file_system::AbsoluteFsPath;
use indexmap::IndexMap;
use oxc_allocator::Allocator;
use oxc_ast::ast as oxc;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

/// Reflection over TypeScript sources parsed with oxc. The oxc AST lives only
/// for the duration of `reflect_module`; everything the compiler needs is
/// copied out into owned declarations.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptReflectionHost;

impl TypeScriptReflectionHost {
    pub fn new() -> Self {
        Self
    }
}

impl ReflectionHost for TypeScriptReflectionHost {
    fn reflect_module(&self, file: &AbsoluteFsPath, text: &str) -> ReflectedModule {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(file.as_str()).unwrap_or_else(|_| SourceType::ts());
        let ret = Parser::new(&allocator, text, source_type).parse();

        let mut reader = ModuleReader {
            text,
            module: ReflectedModule::default(),
        };
        reader.module.parse_errors = ret.errors.iter().map(|e| e.to_string()).collect();

        let mut local_exports = Vec::new();
        for stmt in &ret.program.body {
            match stmt {
                oxc::Statement::ImportDeclaration(decl) => reader.read_import(decl),
                oxc::Statement::ClassDeclaration(class) => reader.read_class(class, false),
                oxc::Statement::ExportNamedDeclaration(decl) => {
                    if let Some(oxc::Declaration::ClassDeclaration(class)) = &decl.declaration {
                        reader.read_class(class, true);
                    }
                    for spec in &decl.specifiers {
                        let local = module_export_name(&spec.local);
                        match &decl.source {
                            Some(source) => reader.module.re_exports.push((
                                module_export_name(&spec.exported),
                                Import {
                                    local_name: local.clone(),
                                    imported_name: local,
                                    from: source.value.to_string(),
                                },
                            )),
                            None => local_exports.push(local),
                        }
                    }
                }
                oxc::Statement::ExportDefaultDeclaration(decl) => {
                    if let oxc::ExportDefaultDeclarationKind::ClassDeclaration(class) = &decl.declaration {
                        reader.read_class(class, true);
                    }
                }
                _ => {}
            }
        }

        let mut module = reader.module;
        for class in module.classes.iter_mut() {
            if local_exports.contains(&class.name) {
                class.exported = true;
            }
            for decorator in class.decorators.iter_mut() {
                decorator.import = module
                    .imports
                    .iter()
                    .find(|i| i.local_name == decorator.name)
                    .cloned();
            }
        }
        module
    }
}

struct ModuleReader<'t> {
    text: &'t str,
    module: ReflectedModule,
}

impl<'t> ModuleReader<'t> {
    fn read_import(&mut self, decl: &oxc::ImportDeclaration) {
        let from = decl.source.value.to_string();
        let Some(specifiers) = &decl.specifiers else {
            return;
        };
        for specifier in specifiers {
            let (local_name, imported_name) = match specifier {
                oxc::ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    (s.local.name.to_string(), module_export_name(&s.imported))
                }
                oxc::ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    (s.local.name.to_string(), "default".to_string())
                }
                oxc::ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    (s.local.name.to_string(), "*".to_string())
                }
            };
            self.module.imports.push(Import {
                local_name,
                imported_name,
                from: from.clone(),
            });
        }
    }

    fn read_class(&mut self, class: &oxc::Class, exported: bool) {
        let Some(id) = &class.id else {
            return;
        };
        let base_class = match &class.super_class {
            Some(oxc::Expression::Identifier(ident)) => Some(ident.name.to_string()),
            _ => None,
        };
        let decorators = class
            .decorators
            .iter()
            .filter_map(|d| self.read_decorator(d))
            .collect();

        let mut members = Vec::new();
        for element in &class.body.body {
            if let oxc::ClassElement::MethodDefinition(method) = element {
                if method.kind == oxc::MethodDefinitionKind::Constructor {
                    members.extend(self.read_parameter_properties(&method.value.params));
                }
            }
            if let Some(member) = self.read_member(element) {
                members.push(member);
            }
        }

        self.module.classes.push(ClassDeclaration {
            name: id.name.to_string(),
            span: class.span,
            name_span: id.span,
            decorators,
            members,
            base_class,
            exported,
        });
    }

    fn read_decorator(&self, decorator: &oxc::Decorator) -> Option<Decorator> {
        match &decorator.expression {
            oxc::Expression::CallExpression(call) => {
                let name = match &call.callee {
                    oxc::Expression::Identifier(ident) => ident.name.to_string(),
                    oxc::Expression::StaticMemberExpression(member) => member.property.name.to_string(),
                    _ => return None,
                };
                let args = call
                    .arguments
                    .iter()
                    .map(|arg| match arg.as_expression() {
                        Some(expr) => self.static_value(expr),
                        None => StaticValue::Dynamic { span: arg.span() },
                    })
                    .collect();
                Some(Decorator {
                    name,
                    import: None,
                    args: Some(args),
                    span: decorator.span,
                })
            }
            oxc::Expression::Identifier(ident) => Some(Decorator {
                name: ident.name.to_string(),
                import: None,
                args: None,
                span: decorator.span,
            }),
            _ => None,
        }
    }

    fn static_value(&self, expr: &oxc::Expression) -> StaticValue {
        match expr {
            oxc::Expression::StringLiteral(lit) => StaticValue::String {
                value: lit.value.to_string(),
                span: lit.span,
            },
            oxc::Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() => {
                let value = tpl
                    .quasis
                    .first()
                    .and_then(|q| q.value.cooked.as_ref())
                    .map(|c| c.to_string())
                    .unwrap_or_default();
                StaticValue::String {
                    value,
                    span: tpl.span,
                }
            }
            oxc::Expression::NumericLiteral(lit) => StaticValue::Number(lit.value),
            oxc::Expression::BooleanLiteral(lit) => StaticValue::Bool(lit.value),
            oxc::Expression::NullLiteral(_) => StaticValue::Null,
            oxc::Expression::ArrayExpression(arr) => StaticValue::Array(
                arr.elements
                    .iter()
                    .map(|el| match el.as_expression() {
                        Some(e) => self.static_value(e),
                        None => StaticValue::Dynamic { span: el.span() },
                    })
                    .collect(),
            ),
            oxc::Expression::ObjectExpression(obj) => {
                let mut map = IndexMap::new();
                for prop in &obj.properties {
                    if let oxc::ObjectPropertyKind::ObjectProperty(prop) = prop {
                        let key = if prop.computed {
                            match &prop.key {
                                oxc::PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
                                _ => None,
                            }
                        } else {
                            property_key_name(&prop.key)
                        };
                        if let Some(key) = key {
                            map.insert(key, self.static_value(&prop.value));
                        }
                    }
                }
                StaticValue::Object(map)
            }
            oxc::Expression::ParenthesizedExpression(p) => self.static_value(&p.expression),
            oxc::Expression::TSAsExpression(e) => self.static_value(&e.expression),
            other => StaticValue::Dynamic { span: other.span() },
        }
    }

    fn read_member(&self, element: &oxc::ClassElement) -> Option<ClassMember> {
        match element {
            oxc::ClassElement::MethodDefinition(method) => {
                if method.computed {
                    return None;
                }
                let name = property_key_name(&method.key)?;
                let kind = match method.kind {
                    oxc::MethodDefinitionKind::Constructor => ClassMemberKind::Constructor,
                    oxc::MethodDefinitionKind::Method => ClassMemberKind::Method,
                    oxc::MethodDefinitionKind::Get => ClassMemberKind::Getter,
                    oxc::MethodDefinitionKind::Set => ClassMemberKind::Setter,
                };
                let parameters = self.read_parameters(&method.value.params);
                let return_type = method
                    .value
                    .return_type
                    .as_ref()
                    .map(|t| self.type_text(&t.type_annotation));
                let type_text = match kind {
                    ClassMemberKind::Getter => return_type.clone(),
                    ClassMemberKind::Setter => parameters.first().and_then(|p| p.type_text.clone()),
                    _ => None,
                };
                Some(ClassMember {
                    name,
                    name_span: method.key.span(),
                    kind,
                    access_level: access_level(
                        method.accessibility.as_ref(),
                        matches!(method.key, oxc::PropertyKey::PrivateIdentifier(_)),
                        false,
                    ),
                    is_static: method.r#static,
                    optional: method.optional,
                    type_text,
                    initializer: None,
                    parameters,
                    return_type,
                    decorators: method
                        .decorators
                        .iter()
                        .filter_map(|d| self.read_decorator(d))
                        .collect(),
                })
            }
            oxc::ClassElement::PropertyDefinition(prop) => {
                if prop.computed {
                    return None;
                }
                let name = property_key_name(&prop.key)?;
                let (initializer, parameters, return_type) = match &prop.value {
                    Some(value) => self.read_initializer(value),
                    None => (None, Vec::new(), None),
                };
                Some(ClassMember {
                    name,
                    name_span: prop.key.span(),
                    kind: ClassMemberKind::Property,
                    access_level: access_level(
                        prop.accessibility.as_ref(),
                        matches!(prop.key, oxc::PropertyKey::PrivateIdentifier(_)),
                        prop.readonly,
                    ),
                    is_static: prop.r#static,
                    optional: prop.optional,
                    type_text: prop
                        .type_annotation
                        .as_ref()
                        .map(|t| self.type_text(&t.type_annotation)),
                    initializer,
                    parameters,
                    return_type,
                    decorators: prop
                        .decorators
                        .iter()
                        .filter_map(|d| self.read_decorator(d))
                        .collect(),
                })
            }
            _ => None,
        }
    }

    /// `constructor(public a: A, private readonly b: B)` declares `a` and `b`.
    fn read_parameter_properties(&self, params: &oxc::FormalParameters) -> Vec<ClassMember> {
        params
            .items
            .iter()
            .filter(|param| param.accessibility.is_some() || param.readonly)
            .filter_map(|param| {
                let oxc::BindingPatternKind::BindingIdentifier(id) = &param.pattern.kind else {
                    return None;
                };
                Some(ClassMember {
                    name: id.name.to_string(),
                    name_span: id.span,
                    kind: ClassMemberKind::Property,
                    access_level: access_level(param.accessibility.as_ref(), false, param.readonly),
                    is_static: false,
                    optional: param.pattern.optional,
                    type_text: param
                        .pattern
                        .type_annotation
                        .as_ref()
                        .map(|t| self.type_text(&t.type_annotation)),
                    initializer: None,
                    parameters: Vec::new(),
                    return_type: None,
                    decorators: Vec::new(),
                })
            })
            .collect()
    }

    fn read_initializer(
        &self,
        value: &oxc::Expression,
    ) -> (Option<InitializerKind>, Vec<Parameter>, Option<String>) {
        match value {
            oxc::Expression::ArrowFunctionExpression(arrow) => (
                Some(InitializerKind::Function),
                self.read_parameters(&arrow.params),
                arrow.return_type.as_ref().map(|t| self.type_text(&t.type_annotation)),
            ),
            oxc::Expression::FunctionExpression(func) => (
                Some(InitializerKind::Function),
                self.read_parameters(&func.params),
                func.return_type.as_ref().map(|t| self.type_text(&t.type_annotation)),
            ),
            oxc::Expression::ParenthesizedExpression(p) => self.read_initializer(&p.expression),
            other => (Some(initializer_kind(other)), Vec::new(), None),
        }
    }

    fn read_parameters(&self, params: &oxc::FormalParameters) -> Vec<Parameter> {
        let mut result: Vec<Parameter> = params
            .items
            .iter()
            .map(|param| Parameter {
                name: binding_name(&param.pattern),
                type_text: param
                    .pattern
                    .type_annotation
                    .as_ref()
                    .map(|t| self.type_text(&t.type_annotation)),
                optional: param.pattern.optional
                    || matches!(param.pattern.kind, oxc::BindingPatternKind::AssignmentPattern(_)),
                rest: false,
            })
            .collect();
        if let Some(rest) = &params.rest {
            result.push(Parameter {
                name: binding_name(&rest.argument),
                type_text: rest
                    .argument
                    .type_annotation
                    .as_ref()
                    .map(|t| self.type_text(&t.type_annotation)),
                optional: true,
                rest: true,
            });
        }
        result
    }

    fn type_text(&self, ty: &oxc::TSType) -> String {
        let span = ty.span();
        self.text
            .get(span.start as usize..span.end as usize)
            .unwrap_or("any")
            .to_string()
    }
}

fn initializer_kind(expr: &oxc::Expression) -> InitializerKind {
    match expr {
        oxc::Expression::StringLiteral(_) | oxc::Expression::TemplateLiteral(_) => InitializerKind::String,
        oxc::Expression::NumericLiteral(_) => InitializerKind::Number,
        oxc::Expression::BooleanLiteral(_) => InitializerKind::Boolean,
        oxc::Expression::NullLiteral(_) => InitializerKind::Null,
        oxc::Expression::ArrayExpression(_) => InitializerKind::Array,
        oxc::Expression::ObjectExpression(_) => InitializerKind::Object,
        oxc::Expression::ParenthesizedExpression(p) => initializer_kind(&p.expression),
        _ => InitializerKind::Other,
    }
}

fn access_level(
    accessibility: Option<&oxc::TSAccessibility>,
    private_name: bool,
    readonly: bool,
) -> ClassMemberAccessLevel {
    if private_name {
        return ClassMemberAccessLevel::EcmaScriptPrivate;
    }
    match accessibility {
        Some(oxc::TSAccessibility::Private) => ClassMemberAccessLevel::Private,
        Some(oxc::TSAccessibility::Protected) => ClassMemberAccessLevel::Protected,
        _ if readonly => ClassMemberAccessLevel::PublicReadonly,
        _ => ClassMemberAccessLevel::PublicWritable,
    }
}

fn property_key_name(key: &oxc::PropertyKey) -> Option<String> {
    match key {
        oxc::PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        oxc::PropertyKey::PrivateIdentifier(id) => Some(id.name.to_string()),
        oxc::PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        oxc::PropertyKey::NumericLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn module_export_name(name: &oxc::ModuleExportName) -> String {
    match name {
        oxc::ModuleExportName::IdentifierName(id) => id.name.to_string(),
        oxc::ModuleExportName::IdentifierReference(id) => id.name.to_string(),
        oxc::ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

fn binding_name(pattern: &oxc::BindingPattern) -> Option<String> {
    match &pattern.kind {
        oxc::BindingPatternKind::BindingIdentifier(id) => Some(id.name.to_string()),
        oxc::BindingPatternKind::AssignmentPattern(assign) => binding_name(&assign.left),
        _ => None,
    }
}
