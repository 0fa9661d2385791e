// TypeCheck Checker Implementation
//
// Walks a parsed template, resolving every expression against the binding
// context of its component and the template's local variables.

use super::super::api::{
    BindingContext, BindingMember, BindingMemberKind, DeclarationScope, TemplateDiagnostic,
    TemplateType, TemplateTypeChecker, TypeCheckingConfig, TypeResolver,
};
use super::diagnostics::{
    ng_template_diagnostic, parse_error_diagnostic, ts_template_diagnostic, TsDiagnosticCode,
};
use super::types::primitive_member;
use crate::ngtsc::diagnostics::ErrorCode;
use crate::ngtsc::reflection::{is_template_accessible, ClassMemberAccessLevel};
use angular_compiler::expression_parser::{TemplateBinding, AST};
use angular_compiler::template_parser::{BindingKind, Element, Node, StructuralDirective};
use angular_compiler::{parse_template, AbsoluteSourceSpan};
use std::collections::HashMap;

/// Pipes provided by `CommonModule`.
const BUILTIN_PIPES: &[&str] = &[
    "async",
    "currency",
    "date",
    "i18nPlural",
    "i18nSelect",
    "json",
    "keyvalue",
    "lowercase",
    "number",
    "percent",
    "slice",
    "titlecase",
    "uppercase",
];

/// Structural directives provided by `CommonModule`.
const BUILTIN_STRUCTURAL_DIRECTIVES: &[&str] = &[
    "ngComponentOutlet",
    "ngFor",
    "ngForOf",
    "ngIf",
    "ngPluralCase",
    "ngSwitchCase",
    "ngSwitchDefault",
    "ngTemplateOutlet",
];

/// `exportAs` names of the forms and router directives.
const BUILTIN_EXPORT_AS: &[&str] = &[
    "ngForm",
    "ngModel",
    "ngModelGroup",
    "routerLinkActive",
];

/// Implementation of the template type-checker.
pub struct TemplateTypeCheckerImpl {
    /// Configuration.
    config: TypeCheckingConfig,
    scope: DeclarationScope,
}

impl TemplateTypeCheckerImpl {
    pub fn new(config: TypeCheckingConfig, scope: DeclarationScope) -> Self {
        Self { config, scope }
    }

    pub fn config(&self) -> &TypeCheckingConfig {
        &self.config
    }

    pub fn scope(&self) -> &DeclarationScope {
        &self.scope
    }

    fn is_known_pipe(&self, name: &str) -> bool {
        BUILTIN_PIPES.contains(&name) || self.scope.pipes.iter().any(|p| p == name)
    }

    fn is_known_structural_directive(&self, name: &str) -> bool {
        BUILTIN_STRUCTURAL_DIRECTIVES.contains(&name)
            || self.scope.structural_directives.iter().any(|d| d == name)
    }

    fn is_known_export_as(&self, name: &str) -> bool {
        BUILTIN_EXPORT_AS.contains(&name) || self.scope.export_as.iter().any(|e| e == name)
    }
}

impl TemplateTypeChecker for TemplateTypeCheckerImpl {
    #[tracing::instrument(level = "trace", skip_all, fields(class = %context.class_id))]
    fn check(&self, template: &str, context: &BindingContext, types: &dyn TypeResolver) -> Vec<TemplateDiagnostic> {
        let parsed = parse_template(template);
        let mut diagnostics: Vec<TemplateDiagnostic> = parsed.errors.iter().map(parse_error_diagnostic).collect();

        let mut visitor = TemplateVisitor {
            checker: self,
            context,
            types,
            frames: Vec::new(),
            diagnostics: Vec::new(),
        };
        visitor.visit_view(&parsed.nodes, Frame::new());
        diagnostics.extend(visitor.diagnostics);

        tracing::trace!(count = diagnostics.len(), "checked template");
        diagnostics
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocalKind {
    Reference,
    Variable,
}

#[derive(Debug, Clone)]
struct Local {
    kind: LocalKind,
    ty: TemplateType,
}

type Frame = HashMap<String, Local>;

/// Result of looking a member up on a type, before any diagnostic is made.
enum Lookup {
    Any,
    Type(TemplateType),
    Class { member: BindingMember },
    Missing,
}

struct TemplateVisitor<'c> {
    checker: &'c TemplateTypeCheckerImpl,
    context: &'c BindingContext,
    types: &'c dyn TypeResolver,
    frames: Vec<Frame>,
    diagnostics: Vec<TemplateDiagnostic>,
}

impl<'c> TemplateVisitor<'c> {
    fn strict(&self) -> bool {
        self.checker.config.strict_templates
    }

    /// Semantic problems only count in strict mode.
    fn report(&mut self, diagnostic: TemplateDiagnostic) {
        if self.strict() {
            self.diagnostics.push(diagnostic);
        }
    }

    fn report_always(&mut self, diagnostic: TemplateDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn lookup_local(&self, name: &str) -> Option<&Local> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    // Views

    fn visit_view(&mut self, nodes: &[Node], mut frame: Frame) {
        self.collect_view_references(nodes, &mut frame);
        self.frames.push(frame);
        for node in nodes {
            self.visit_node(node);
        }
        self.frames.pop();
    }

    /// References are visible across the whole view that declares them, so
    /// they are collected before any expression is checked.
    fn collect_view_references(&mut self, nodes: &[Node], frame: &mut Frame) {
        for node in nodes {
            if let Node::Element(element) = node {
                if element.template_attr.is_some() {
                    continue;
                }
                self.add_references(element, frame);
                if !element.is_ng_template() {
                    self.collect_view_references(&element.children, frame);
                }
            }
        }
    }

    fn add_references(&mut self, element: &Element, frame: &mut Frame) {
        for reference in &element.references {
            if frame.get(&reference.name).map(|l| l.kind) == Some(LocalKind::Reference) {
                self.report_always(ng_template_diagnostic(
                    ErrorCode::TemplateParseError,
                    reference.key_span,
                    format!("Reference '#{}' is defined more than once", reference.name),
                ));
                continue;
            }
            if !reference.value.is_empty() && !self.checker.is_known_export_as(&reference.value) {
                self.report(ng_template_diagnostic(
                    ErrorCode::MissingReferenceTarget,
                    reference.source_span,
                    format!("No directive found with exportAs '{}'.", reference.value),
                ));
            }
            frame.insert(
                reference.name.clone(),
                Local {
                    kind: LocalKind::Reference,
                    ty: TemplateType::Any,
                },
            );
        }
    }

    fn declare_variable(&mut self, frame: &mut Frame, name: &str, ty: TemplateType, span: AbsoluteSourceSpan) {
        if frame.get(name).map(|l| l.kind) == Some(LocalKind::Variable) {
            self.report_always(ng_template_diagnostic(
                ErrorCode::DuplicateVariableDeclaration,
                span,
                format!("Cannot redeclare variable with name '{}'.", name),
            ));
            return;
        }
        frame.insert(
            name.to_string(),
            Local {
                kind: LocalKind::Variable,
                ty,
            },
        );
    }

    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::Text(_) | Node::Comment(_) => {}
            Node::BoundText(text) => {
                self.check_expr(&text.value.ast);
            }
            Node::Element(element) => match &element.template_attr {
                Some(directive) => self.visit_structural(element, directive),
                None => self.visit_element_content(element),
            },
        }
    }

    /// `*name="..."` turns the element into an embedded view. The directive's
    /// expressions are evaluated in the enclosing scope.
    fn visit_structural(&mut self, element: &Element, directive: &StructuralDirective) {
        if !self.checker.is_known_structural_directive(&directive.name) {
            self.report(ng_template_diagnostic(
                ErrorCode::MissingStructuralDirective,
                directive.key_span,
                format!(
                    "No directive matches the structural attribute '*{}'.",
                    directive.name
                ),
            ));
        }

        let mut key_types: HashMap<&str, TemplateType> = HashMap::new();
        for binding in &directive.bindings {
            if let TemplateBinding::Expression(expr) = binding {
                if let Some(value) = &expr.value {
                    let ty = self.check_expr(&value.ast);
                    key_types.insert(expr.key.as_str(), ty);
                }
            }
        }

        let mut frame = Frame::new();
        for binding in &directive.bindings {
            if let TemplateBinding::Variable(var) = binding {
                let ty = structural_variable_type(&directive.name, &key_types, &var.value);
                self.declare_variable(&mut frame, &var.name, ty, var.source_span);
            }
        }
        self.add_references(element, &mut frame);
        if !element.is_ng_template() {
            self.collect_view_references(&element.children, &mut frame);
        }

        self.frames.push(frame);
        self.visit_element_content(element);
        self.frames.pop();
    }

    fn visit_element_content(&mut self, element: &Element) {
        for input in &element.inputs {
            if input.kind == BindingKind::TwoWay {
                self.check_assignment_target(&input.value.ast);
            } else {
                self.check_expr(&input.value.ast);
            }
        }
        for output in &element.outputs {
            let mut frame = Frame::new();
            frame.insert(
                "$event".to_string(),
                Local {
                    kind: LocalKind::Variable,
                    ty: TemplateType::Any,
                },
            );
            self.frames.push(frame);
            self.check_expr(&output.handler.ast);
            self.frames.pop();
        }

        if element.is_ng_template() {
            let mut frame = Frame::new();
            for variable in &element.variables {
                self.declare_variable(&mut frame, &variable.name, TemplateType::Any, variable.source_span);
            }
            self.visit_view(&element.children, frame);
        } else {
            for child in &element.children {
                self.visit_node(child);
            }
        }
    }

    // Expressions

    fn check_expr(&mut self, ast: &AST) -> TemplateType {
        match ast {
            AST::EmptyExpr(_) | AST::ImplicitReceiver(_) | AST::ThisReceiver(_) => TemplateType::Any,
            AST::Chain(chain) => {
                for expr in &chain.expressions {
                    self.check_expr(expr);
                }
                TemplateType::Any
            }
            AST::Conditional(cond) => {
                self.check_expr(&cond.condition);
                let t = self.check_expr(&cond.true_exp);
                let f = self.check_expr(&cond.false_exp);
                TemplateType::union(vec![t, f])
            }
            AST::PropertyRead(read) => {
                if matches!(read.receiver.as_ref(), AST::ImplicitReceiver(_)) {
                    if let Some(local) = self.lookup_local(&read.name) {
                        return local.ty.clone();
                    }
                }
                if read.receiver.is_component_receiver() {
                    return self.read_component_member(&read.name, read.name_span);
                }
                let receiver = self.check_expr(&read.receiver);
                let receiver = if read.safe { receiver.non_nullable() } else { receiver };
                self.read_member(&receiver, &read.name, read.name_span)
            }
            AST::PropertyWrite(write) => {
                self.check_expr(&write.value);
                if write.receiver.is_component_receiver() {
                    let via_this = matches!(write.receiver.as_ref(), AST::ThisReceiver(_));
                    self.check_component_write(&write.name, write.name_span, via_this);
                } else {
                    let receiver = self.check_expr(&write.receiver);
                    self.check_member_write(&receiver, &write.name, write.name_span);
                }
                TemplateType::Any
            }
            AST::KeyedRead(read) => {
                let receiver = self.check_expr(&read.receiver);
                self.check_expr(&read.key);
                let receiver = if read.safe { receiver.non_nullable() } else { receiver };
                match receiver {
                    TemplateType::Array(elem) => *elem,
                    TemplateType::String => TemplateType::String,
                    _ => TemplateType::Any,
                }
            }
            AST::KeyedWrite(write) => {
                self.check_expr(&write.receiver);
                self.check_expr(&write.key);
                self.check_expr(&write.value);
                TemplateType::Any
            }
            AST::BindingPipe(pipe) => {
                let input = self.check_expr(&pipe.exp);
                for arg in &pipe.args {
                    self.check_expr(arg);
                }
                if !self.checker.is_known_pipe(&pipe.name) {
                    self.report(ng_template_diagnostic(
                        ErrorCode::MissingPipe,
                        pipe.name_span,
                        format!("No pipe found with name '{}'.", pipe.name),
                    ));
                    return TemplateType::Any;
                }
                if self.checker.scope.pipes.iter().any(|p| p == &pipe.name) {
                    return TemplateType::Any;
                }
                builtin_pipe_type(&pipe.name, input)
            }
            AST::LiteralPrimitive(lit) => {
                use angular_compiler::expression_parser::LiteralValue;
                match lit.value {
                    LiteralValue::Null => TemplateType::Null,
                    LiteralValue::Undefined => TemplateType::Undefined,
                    LiteralValue::Boolean(_) => TemplateType::Boolean,
                    LiteralValue::Number(_) => TemplateType::Number,
                    LiteralValue::String(_) => TemplateType::String,
                }
            }
            AST::LiteralArray(array) => {
                let elems: Vec<TemplateType> = array.expressions.iter().map(|e| self.check_expr(e)).collect();
                TemplateType::Array(Box::new(TemplateType::union(elems)))
            }
            AST::LiteralMap(map) => {
                let mut fields = Vec::new();
                for (key, value) in map.keys.iter().zip(&map.values) {
                    let ty = self.check_expr(value);
                    fields.push((key.key.clone(), ty));
                }
                TemplateType::Object(fields)
            }
            AST::Interpolation(interpolation) => {
                for expr in &interpolation.expressions {
                    self.check_expr(expr);
                }
                TemplateType::String
            }
            AST::Binary(binary) => self.check_binary(binary),
            AST::Unary(unary) => {
                self.check_expr(&unary.expr);
                TemplateType::Number
            }
            AST::PrefixNot(not) => {
                self.check_expr(&not.expression);
                TemplateType::Boolean
            }
            AST::TypeofExpression(expr) => {
                self.check_expr(&expr.expression);
                TemplateType::String
            }
            AST::NonNullAssert(expr) => self.check_expr(&expr.expression).non_nullable(),
            AST::Call(call) => self.check_call(call),
        }
    }

    fn check_binary(&mut self, binary: &angular_compiler::expression_parser::Binary) -> TemplateType {
        let left = self.check_expr(&binary.left);
        let right = self.check_expr(&binary.right);
        match binary.operation.as_str() {
            "-" | "*" | "/" | "%" | "**" => {
                if !self.is_numeric(&left) {
                    self.report(ts_template_diagnostic(
                        TsDiagnosticCode::ArithmeticLeftOperand,
                        binary.left.source_span(),
                        "The left-hand side of an arithmetic operation must be of type 'any', 'number', 'bigint' or an enum type.",
                    ));
                }
                if !self.is_numeric(&right) {
                    self.report(ts_template_diagnostic(
                        TsDiagnosticCode::ArithmeticRightOperand,
                        binary.right.source_span(),
                        "The right-hand side of an arithmetic operation must be of type 'any', 'number', 'bigint' or an enum type.",
                    ));
                }
                TemplateType::Number
            }
            "+" => {
                if left == TemplateType::String || right == TemplateType::String {
                    TemplateType::String
                } else if left == TemplateType::Number && right == TemplateType::Number {
                    TemplateType::Number
                } else {
                    TemplateType::Any
                }
            }
            "==" | "!=" | "===" | "!==" | "<" | ">" | "<=" | ">=" => TemplateType::Boolean,
            "&&" => right,
            "||" | "??" => TemplateType::union(vec![left.non_nullable(), right]),
            _ => TemplateType::Any,
        }
    }

    /// Enums and other unresolved names count as numeric.
    fn is_numeric(&self, ty: &TemplateType) -> bool {
        match ty {
            TemplateType::Any | TemplateType::Number => true,
            TemplateType::Named { name, origin } => self.types.resolve_named_type(name, origin).is_none(),
            TemplateType::Union(parts) => parts
                .iter()
                .filter(|p| !p.is_nullish())
                .all(|p| self.is_numeric(p)),
            _ => false,
        }
    }

    fn check_call(&mut self, call: &angular_compiler::expression_parser::Call) -> TemplateType {
        if let AST::PropertyRead(read) = call.receiver.as_ref() {
            if matches!(read.receiver.as_ref(), AST::ImplicitReceiver(_))
                && read.name == "$any"
                && self.lookup_local("$any").is_none()
                && self.context.get("$any").is_none()
            {
                for arg in &call.args {
                    self.check_expr(arg);
                }
                return TemplateType::Any;
            }
        }

        let callee = self.check_expr(&call.receiver);
        for arg in &call.args {
            self.check_expr(arg);
        }
        let callee = if call.safe { callee.non_nullable() } else { callee };
        match callee {
            TemplateType::Any | TemplateType::Union(_) => TemplateType::Any,
            TemplateType::Function(func) => {
                let got = call.args.len();
                let min = func.min_args();
                match func.max_args() {
                    Some(max) if got < min || got > max => {
                        let expected = if min == max {
                            min.to_string()
                        } else {
                            format!("{}-{}", min, max)
                        };
                        self.report(ts_template_diagnostic(
                            TsDiagnosticCode::WrongArgumentCount,
                            call.source_span,
                            format!("Expected {} arguments, but got {}.", expected, got),
                        ));
                    }
                    None if got < min => {
                        self.report(ts_template_diagnostic(
                            TsDiagnosticCode::TooFewArgumentsForRest,
                            call.source_span,
                            format!("Expected at least {} arguments, but got {}.", min, got),
                        ));
                    }
                    _ => {}
                }
                *func.ret
            }
            TemplateType::Named { ref name, ref origin } if self.types.resolve_named_type(name, origin).is_none() => {
                TemplateType::Any
            }
            other => {
                self.report(ts_template_diagnostic(
                    TsDiagnosticCode::NotCallable,
                    call.receiver.source_span(),
                    format!(
                        "This expression is not callable.\n  Type '{}' has no call signatures.",
                        other
                    ),
                ));
                TemplateType::Any
            }
        }
    }

    // Members

    fn read_component_member(&mut self, name: &str, span: AbsoluteSourceSpan) -> TemplateType {
        let context = self.context;
        match context.get(name) {
            Some(member) if member.access != ClassMemberAccessLevel::EcmaScriptPrivate => {
                let member = member.clone();
                self.check_access(&member, span, true);
                member.ty
            }
            _ => {
                self.report_missing(name, context.class_name(), span);
                TemplateType::Any
            }
        }
    }

    fn read_member(&mut self, receiver: &TemplateType, name: &str, span: AbsoluteSourceSpan) -> TemplateType {
        match self.lookup_member(receiver, name) {
            Lookup::Any => TemplateType::Any,
            Lookup::Type(ty) => ty,
            Lookup::Class { member } => {
                self.check_access(&member, span, false);
                member.ty
            }
            Lookup::Missing => {
                let shown = receiver.non_nullable().to_string();
                self.report_missing(name, &shown, span);
                TemplateType::Any
            }
        }
    }

    fn lookup_member(&self, receiver: &TemplateType, name: &str) -> Lookup {
        match receiver {
            TemplateType::Any | TemplateType::Null | TemplateType::Undefined | TemplateType::Void => Lookup::Any,
            TemplateType::String | TemplateType::Number | TemplateType::Boolean | TemplateType::Array(_) => {
                match primitive_member(receiver, name) {
                    Some(ty) => Lookup::Type(ty),
                    None => Lookup::Missing,
                }
            }
            TemplateType::Function(_) => match name {
                "call" | "apply" | "bind" | "length" | "name" => Lookup::Any,
                _ => Lookup::Missing,
            },
            TemplateType::Object(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, ty)| Lookup::Type(ty.clone()))
                .unwrap_or(Lookup::Missing),
            TemplateType::Named { name: type_name, origin } => {
                match self.types.resolve_named_type(type_name, origin) {
                    None => Lookup::Any,
                    Some(context) => match context.get(name) {
                        Some(member) if member.access != ClassMemberAccessLevel::EcmaScriptPrivate => {
                            Lookup::Class { member: member.clone() }
                        }
                        _ => Lookup::Missing,
                    },
                }
            }
            TemplateType::Union(_) => {
                let parts = match receiver.non_nullable() {
                    TemplateType::Union(parts) => parts,
                    single => return self.lookup_member(&single, name),
                };
                let mut types = Vec::new();
                for part in &parts {
                    match self.lookup_member(part, name) {
                        Lookup::Any => return Lookup::Any,
                        Lookup::Type(ty) => types.push(ty),
                        Lookup::Class { member } => types.push(member.ty),
                        Lookup::Missing => return Lookup::Missing,
                    }
                }
                Lookup::Type(TemplateType::union(types))
            }
        }
    }

    fn report_missing(&mut self, name: &str, type_name: &str, span: AbsoluteSourceSpan) {
        self.report(ts_template_diagnostic(
            TsDiagnosticCode::PropertyDoesNotExist,
            span,
            format!("Property '{}' does not exist on type '{}'.", name, type_name),
        ));
    }

    /// The component's own template may use protected members; any other
    /// class's protected members are off limits.
    fn check_access(&mut self, member: &BindingMember, span: AbsoluteSourceSpan, own_component: bool) {
        if own_component && is_template_accessible(member.access) {
            return;
        }
        let class_name = &member.declared_in.name;
        match member.access {
            ClassMemberAccessLevel::Private => self.report(ts_template_diagnostic(
                TsDiagnosticCode::PrivateMember,
                span,
                format!(
                    "Property '{}' is private and only accessible within class '{}'.",
                    member.name, class_name
                ),
            )),
            ClassMemberAccessLevel::Protected => self.report(ts_template_diagnostic(
                TsDiagnosticCode::ProtectedMember,
                span,
                format!(
                    "Property '{}' is protected and only accessible within class '{}' and its subclasses.",
                    member.name, class_name
                ),
            )),
            _ => {}
        }
    }

    fn check_component_write(&mut self, name: &str, span: AbsoluteSourceSpan, via_this: bool) {
        if !via_this {
            if let Some(local) = self.lookup_local(name) {
                let kind = local.kind;
                let noun = if kind == LocalKind::Reference { "reference" } else { "variable" };
                self.report(ng_template_diagnostic(
                    ErrorCode::WriteToReadOnlyVariable,
                    span,
                    format!(
                        "Cannot use {} '{}' as the left-hand side of an assignment expression. Template {}s are read-only.",
                        noun, name, noun
                    ),
                ));
                return;
            }
        }
        let context = self.context;
        match context.get(name) {
            Some(member) if member.access != ClassMemberAccessLevel::EcmaScriptPrivate => {
                self.check_access(member, span, true);
                self.check_writable(member, span);
            }
            _ => self.report_missing(name, context.class_name(), span),
        }
    }

    fn check_member_write(&mut self, receiver: &TemplateType, name: &str, span: AbsoluteSourceSpan) {
        match self.lookup_member(receiver, name) {
            Lookup::Class { member } => {
                self.check_access(&member, span, false);
                self.check_writable(&member, span);
            }
            Lookup::Missing => {
                let shown = receiver.non_nullable().to_string();
                self.report_missing(name, &shown, span);
            }
            Lookup::Any | Lookup::Type(_) => {}
        }
    }

    fn check_writable(&mut self, member: &BindingMember, span: AbsoluteSourceSpan) {
        if member.kind == BindingMemberKind::Method {
            self.report(ts_template_diagnostic(
                TsDiagnosticCode::AssignToFunction,
                span,
                format!("Cannot assign to '{}' because it is a function.", member.name),
            ));
        } else if member.readonly {
            self.report(ts_template_diagnostic(
                TsDiagnosticCode::ReadOnlyProperty,
                span,
                format!("Cannot assign to '{}' because it is a read-only property.", member.name),
            ));
        }
    }

    /// The target of a two-way binding must be assignable. The target is
    /// read and written through the same lookup, so it is checked once.
    fn check_assignment_target(&mut self, ast: &AST) {
        match ast {
            AST::PropertyRead(read) if read.receiver.is_component_receiver() => {
                let via_this = matches!(read.receiver.as_ref(), AST::ThisReceiver(_));
                self.check_component_write(&read.name, read.name_span, via_this);
            }
            AST::PropertyRead(read) => {
                let receiver = self.check_expr(&read.receiver);
                self.check_member_write(&receiver, &read.name, read.name_span);
            }
            other => {
                self.check_expr(other);
            }
        }
    }
}

fn structural_variable_type(directive: &str, key_types: &HashMap<&str, TemplateType>, context_key: &str) -> TemplateType {
    match directive {
        "ngFor" | "ngForOf" => match context_key {
            "$implicit" => match key_types.get("ngForOf").map(TemplateType::non_nullable) {
                Some(TemplateType::Array(elem)) => *elem,
                _ => TemplateType::Any,
            },
            "ngForOf" => key_types.get("ngForOf").cloned().unwrap_or(TemplateType::Any),
            "index" | "count" => TemplateType::Number,
            "first" | "last" | "even" | "odd" => TemplateType::Boolean,
            _ => TemplateType::Any,
        },
        "ngIf" => match context_key {
            "$implicit" | "ngIf" => key_types
                .get("ngIf")
                .map(TemplateType::non_nullable)
                .unwrap_or(TemplateType::Any),
            _ => TemplateType::Any,
        },
        _ => TemplateType::Any,
    }
}

fn builtin_pipe_type(name: &str, input: TemplateType) -> TemplateType {
    match name {
        "slice" => input,
        "keyvalue" => TemplateType::Array(Box::new(TemplateType::Any)),
        "async" => TemplateType::Any,
        _ => TemplateType::String,
    }
}
