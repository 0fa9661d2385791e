//! Template Parser
//!
//! Scans HTML-like template text into elements, text and comments, and
//! classifies attributes into bindings with parsed expressions.

use super::ast::*;
use crate::chars;
use crate::expression_parser::ast::AbsoluteSourceSpan;
use crate::expression_parser::Parser;
use crate::parse_util::ParseError;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

const EMPTY_EXPRESSION: &str = "Empty expressions are not allowed";

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

/// Parses template text. Errors never stop the scan; every recoverable
/// problem is reported in `ParsedTemplate::errors`.
pub fn parse_template(template: &str) -> ParsedTemplate {
    TemplateParser::new(template).parse()
}

struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
    expression_parser: Parser,
    stack: Vec<Element>,
    roots: Vec<Node>,
    errors: Vec<ParseError>,
}

impl<'a> TemplateParser<'a> {
    fn new(input: &'a str) -> Self {
        TemplateParser {
            input,
            pos: 0,
            expression_parser: Parser::new(),
            stack: Vec::new(),
            roots: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> ParsedTemplate {
        while self.pos < self.input.len() {
            if self.starts_with("<!--") {
                self.consume_comment();
            } else if self.peek() == chars::LT
                && self.peek_at(1) == chars::SLASH
                && chars::is_ascii_letter(self.peek_at(2))
            {
                self.consume_end_tag();
            } else if self.peek() == chars::LT && chars::is_ascii_letter(self.peek_at(1)) {
                self.consume_start_tag();
            } else {
                self.consume_text();
            }
        }

        // Elements left open at the end of input are closed implicitly.
        while let Some(mut element) = self.stack.pop() {
            element.source_span.end = self.input.len();
            self.add_node(Node::Element(element));
        }

        ParsedTemplate {
            nodes: self.roots,
            errors: self.errors,
        }
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> char {
        self.input[self.pos..].chars().nth(n).unwrap_or(chars::EOF)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.input[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    fn starts_with(&self, text: &str) -> bool {
        self.input[self.pos..].starts_with(text)
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && chars::is_whitespace(self.peek()) {
            self.bump();
        }
    }

    fn is_tag_start(&self) -> bool {
        if self.peek() != chars::LT {
            return false;
        }
        let next = self.peek_at(1);
        chars::is_ascii_letter(next)
            || (next == chars::SLASH && chars::is_ascii_letter(self.peek_at(2)))
            || self.starts_with("<!--")
    }

    fn error(&mut self, start: usize, end: usize, msg: impl Into<String>) {
        self.errors
            .push(ParseError::new(AbsoluteSourceSpan::new(start, end), msg));
    }

    fn add_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while !self.at_end() && chars::is_name_part(self.peek()) {
            self.bump();
        }
        self.input[start..self.pos].to_string()
    }

    fn consume_text(&mut self) {
        let start = self.pos;
        // Always take the first character so a lone `<` cannot stall the scan.
        self.bump();
        while !self.at_end() && !self.is_tag_start() {
            self.bump();
        }
        let text = &self.input[start..self.pos];
        let source_span = AbsoluteSourceSpan::new(start, self.pos);
        match self.expression_parser.parse_interpolation(text, start) {
            Some(value) => {
                self.errors.extend(value.errors.iter().cloned());
                self.add_node(Node::BoundText(BoundText { value, source_span }));
            }
            None => self.add_node(Node::Text(Text {
                value: text.to_string(),
                source_span,
            })),
        }
    }

    fn consume_comment(&mut self) {
        let start = self.pos;
        self.pos += 4;
        let value = match self.input[self.pos..].find("-->") {
            Some(rel) => {
                let value = self.input[self.pos..self.pos + rel].to_string();
                self.pos += rel + 3;
                value
            }
            None => {
                let value = self.input[self.pos..].to_string();
                self.error(start, self.input.len(), "Unexpected character \"EOF\"");
                self.pos = self.input.len();
                value
            }
        };
        self.add_node(Node::Comment(Comment {
            value: value.trim().to_string(),
            source_span: AbsoluteSourceSpan::new(start, self.pos),
        }));
    }

    fn consume_end_tag(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let name = self.read_name();
        self.skip_whitespace();
        if self.peek() == chars::GT {
            self.bump();
        } else {
            self.error(start, self.pos, "Unexpected character \"EOF\"");
            while !self.at_end() && self.peek() != chars::GT {
                self.bump();
            }
            self.bump();
        }
        let end = self.pos;

        if is_void_element(&name) {
            self.error(
                start,
                end,
                format!("Void elements do not have end tags \"{}\"", name),
            );
            return;
        }

        let Some(index) = self.stack.iter().rposition(|el| el.name == name) else {
            self.error(
                start,
                end,
                format!(
                    "Unexpected closing tag \"{}\". It may happen when the tag has already been closed by another tag.",
                    name
                ),
            );
            return;
        };

        while self.stack.len() > index + 1 {
            if let Some(mut unclosed) = self.stack.pop() {
                unclosed.source_span.end = start;
                self.add_node(Node::Element(unclosed));
            }
        }
        if let Some(mut element) = self.stack.pop() {
            element.end_source_span = Some(AbsoluteSourceSpan::new(start, end));
            element.source_span.end = end;
            self.add_node(Node::Element(element));
        }
    }

    fn consume_start_tag(&mut self) {
        let start = self.pos;
        self.bump();
        let name = self.read_name();
        let mut element = Element {
            name: name.clone(),
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            references: Vec::new(),
            variables: Vec::new(),
            template_attr: None,
            children: Vec::new(),
            source_span: AbsoluteSourceSpan::new(start, start),
            start_source_span: AbsoluteSourceSpan::new(start, start),
            end_source_span: None,
        };

        let mut self_closing = false;
        let mut terminated = true;
        loop {
            self.skip_whitespace();
            let ch = self.peek();
            if self.at_end() {
                self.error(start, self.input.len(), "Unexpected character \"EOF\"");
                terminated = false;
                break;
            } else if ch == chars::GT {
                self.bump();
                break;
            } else if ch == chars::SLASH && self.peek_at(1) == chars::GT {
                self.pos += 2;
                self_closing = true;
                break;
            } else if chars::is_name_part(ch) {
                if !self.consume_attribute(&mut element) {
                    terminated = false;
                    break;
                }
            } else {
                let at = self.pos;
                self.bump();
                self.error(at, self.pos, format!("Unexpected character \"{}\"", ch));
            }
        }

        element.start_source_span = AbsoluteSourceSpan::new(start, self.pos);
        element.source_span = element.start_source_span;

        if !terminated || self_closing || is_void_element(&name) {
            self.add_node(Node::Element(element));
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
            self.consume_raw_text(element);
            return;
        }

        self.stack.push(element);
    }

    fn consume_raw_text(&mut self, mut element: Element) {
        let closing = format!("</{}", element.name);
        let content_start = self.pos;
        let content_end = self.input[self.pos..]
            .find(&closing)
            .map(|rel| self.pos + rel)
            .unwrap_or(self.input.len());
        if content_end > content_start {
            element.children.push(Node::Text(Text {
                value: self.input[content_start..content_end].to_string(),
                source_span: AbsoluteSourceSpan::new(content_start, content_end),
            }));
        }
        self.pos = content_end;
        self.stack.push(element);
        if !self.at_end() {
            self.consume_end_tag();
        }
    }

    /// Returns false when the attribute value runs to the end of input.
    fn consume_attribute(&mut self, element: &mut Element) -> bool {
        let attr_start = self.pos;
        let name = self.read_name();
        let key_span = AbsoluteSourceSpan::new(attr_start, self.pos);
        self.skip_whitespace();

        let mut value = String::new();
        let mut value_start = self.pos;
        let mut terminated = true;
        if self.peek() == chars::EQ {
            self.bump();
            self.skip_whitespace();
            let quote = self.peek();
            if quote == chars::SQ || quote == chars::DQ {
                self.bump();
                value_start = self.pos;
                match self.input[self.pos..].find(quote) {
                    Some(rel) => {
                        value = self.input[self.pos..self.pos + rel].to_string();
                        self.pos += rel + 1;
                    }
                    None => {
                        value = self.input[self.pos..].to_string();
                        self.error(attr_start, self.input.len(), "Unexpected character \"EOF\"");
                        self.pos = self.input.len();
                        terminated = false;
                    }
                }
            } else {
                value_start = self.pos;
                while !self.at_end() && !chars::is_whitespace(self.peek()) && self.peek() != chars::GT
                {
                    self.bump();
                }
                value = self.input[value_start..self.pos].to_string();
            }
        }

        let source_span = AbsoluteSourceSpan::new(attr_start, self.pos);
        let value_span = AbsoluteSourceSpan::new(value_start, value_start + value.len());
        self.classify_attribute(
            element,
            AttributeParts {
                name,
                value,
                source_span,
                key_span,
                value_span,
            },
        );
        terminated
    }

    fn classify_attribute(&mut self, element: &mut Element, attr: AttributeParts) {
        let name = attr.name.as_str();

        if let Some(prop) = strip_delimiters(name, "[(", ")]").or_else(|| name.strip_prefix("bindon-"))
        {
            let value = self.parse_property_value(&attr);
            if !value.ast.is_empty()
                && !matches!(
                    value.ast,
                    crate::expression_parser::AST::PropertyRead(_)
                        | crate::expression_parser::AST::KeyedRead(_)
                )
            {
                self.error(
                    attr.value_span.start,
                    attr.value_span.end,
                    "Unsupported expression in a two-way binding",
                );
            }
            element.inputs.push(BoundAttribute {
                name: prop.to_string(),
                kind: BindingKind::TwoWay,
                value,
                source_span: attr.source_span,
                key_span: attr.key_span,
                value_span: attr.value_span,
            });
        } else if let Some(prop) =
            strip_delimiters(name, "[", "]").or_else(|| name.strip_prefix("bind-"))
        {
            let value = self.parse_property_value(&attr);
            element.inputs.push(BoundAttribute {
                name: prop.to_string(),
                kind: BindingKind::Property,
                value,
                source_span: attr.source_span,
                key_span: attr.key_span,
                value_span: attr.value_span,
            });
        } else if let Some(event) =
            strip_delimiters(name, "(", ")").or_else(|| name.strip_prefix("on-"))
        {
            if attr.value.trim().is_empty() {
                self.error(attr.source_span.start, attr.source_span.end, EMPTY_EXPRESSION);
            }
            let handler = self
                .expression_parser
                .parse_action(&attr.value, attr.value_span.start);
            self.errors.extend(handler.errors.iter().cloned());
            element.outputs.push(BoundEvent {
                name: event.to_string(),
                handler,
                source_span: attr.source_span,
                key_span: attr.key_span,
            });
        } else if let Some(directive) = name.strip_prefix('*') {
            if element.template_attr.is_some() {
                self.error(
                    attr.source_span.start,
                    attr.source_span.end,
                    "Can't have multiple template bindings on one element. Use only one attribute prefixed with *",
                );
                return;
            }
            let result = self.expression_parser.parse_template_bindings(
                directive,
                &attr.value,
                attr.value_span.start,
            );
            self.errors.extend(result.errors);
            element.template_attr = Some(StructuralDirective {
                name: directive.to_string(),
                bindings: result.template_bindings,
                source_span: attr.source_span,
                key_span: attr.key_span,
            });
        } else if let Some(reference) = name.strip_prefix('#').or_else(|| name.strip_prefix("ref-")) {
            if reference.contains('-') {
                self.error(
                    attr.key_span.start,
                    attr.key_span.end,
                    "\"-\" is not allowed in reference names",
                );
            }
            element.references.push(Reference {
                name: reference.to_string(),
                value: attr.value,
                source_span: attr.source_span,
                key_span: attr.key_span,
            });
        } else if let Some(variable) = name.strip_prefix("let-") {
            if !element.is_ng_template() {
                self.error(
                    attr.source_span.start,
                    attr.source_span.end,
                    "\"let-\" is only supported on ng-template elements.",
                );
            }
            let value = if attr.value.is_empty() {
                "$implicit".to_string()
            } else {
                attr.value
            };
            element.variables.push(Variable {
                name: variable.to_string(),
                value,
                source_span: attr.source_span,
                key_span: attr.key_span,
            });
        } else {
            match self
                .expression_parser
                .parse_interpolation(&attr.value, attr.value_span.start)
            {
                Some(value) => {
                    self.errors.extend(value.errors.iter().cloned());
                    element.inputs.push(BoundAttribute {
                        name: attr.name,
                        kind: BindingKind::Interpolated,
                        value,
                        source_span: attr.source_span,
                        key_span: attr.key_span,
                        value_span: attr.value_span,
                    });
                }
                None => element.attributes.push(TextAttribute {
                    name: attr.name,
                    value: attr.value,
                    source_span: attr.source_span,
                    key_span: attr.key_span,
                }),
            }
        }
    }

    fn parse_property_value(
        &mut self,
        attr: &AttributeParts,
    ) -> crate::expression_parser::ASTWithSource {
        if attr.value.trim().is_empty() {
            self.error(attr.source_span.start, attr.source_span.end, EMPTY_EXPRESSION);
        }
        let value = self
            .expression_parser
            .parse_binding(&attr.value, attr.value_span.start);
        self.errors.extend(value.errors.iter().cloned());
        value
    }
}

struct AttributeParts {
    name: String,
    value: String,
    source_span: AbsoluteSourceSpan,
    key_span: AbsoluteSourceSpan,
    value_span: AbsoluteSourceSpan,
}

fn strip_delimiters<'n>(name: &'n str, open: &str, close: &str) -> Option<&'n str> {
    name.strip_prefix(open)?.strip_suffix(close)
}
