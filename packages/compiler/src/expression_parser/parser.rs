/**
 * Angular Expression Parser
 *
 * Recursive descent parser for template expressions. Errors are collected
 * rather than returned so a single bad binding never hides the rest of the
 * template.
 */
use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::parse_util::ParseError;

/// Result of parsing microsyntax (`*ngFor="let item of items"`)
#[derive(Debug, Clone, Default)]
pub struct TemplateBindingParseResult {
    pub template_bindings: Vec<TemplateBinding>,
    pub errors: Vec<ParseError>,
}

/// Parser for Angular expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    /// Parse an action expression (event handler). Assignments and chains are
    /// allowed, pipes are not.
    pub fn parse_action(&self, input: &str, absolute_offset: usize) -> ASTWithSource {
        let tokens = self.lexer.tokenize(input);
        let mut parse_ast = ParseAST::new(input, input, 0, absolute_offset, tokens, true);
        let ast = parse_ast.parse_chain();
        ASTWithSource {
            ast,
            source: input.to_string(),
            absolute_offset,
            errors: parse_ast.errors,
        }
    }

    /// Parse a binding expression (property binding or interpolation part).
    pub fn parse_binding(&self, input: &str, absolute_offset: usize) -> ASTWithSource {
        let tokens = self.lexer.tokenize(input);
        let mut parse_ast = ParseAST::new(input, input, 0, absolute_offset, tokens, false);
        let ast = parse_ast.parse_chain();
        ASTWithSource {
            ast,
            source: input.to_string(),
            absolute_offset,
            errors: parse_ast.errors,
        }
    }

    /// Parse text containing `{{ }}` interpolations. Returns `None` when the
    /// text has no interpolation at all.
    pub fn parse_interpolation(&self, input: &str, absolute_offset: usize) -> Option<ASTWithSource> {
        let split = split_interpolation(input)?;
        let mut errors = Vec::new();
        let mut expressions = Vec::new();

        for piece in &split.expressions {
            let text = &input[piece.start..piece.end];
            if text.trim().is_empty() {
                errors.push(ParseError::new(
                    AbsoluteSourceSpan::new(
                        absolute_offset + piece.start - 2,
                        absolute_offset + piece.end + 2,
                    ),
                    format!(
                        "Parser Error: Blank expressions are not allowed in interpolated strings at column {} in [{}]",
                        piece.start - 1,
                        input
                    ),
                ));
                let span = ParseSpan::new(piece.start, piece.end);
                expressions.push(AST::EmptyExpr(EmptyExpr {
                    span,
                    source_span: span.to_absolute(absolute_offset),
                }));
                continue;
            }
            let tokens = self.lexer.tokenize(text);
            let mut parse_ast =
                ParseAST::new(input, text, piece.start, absolute_offset, tokens, false);
            expressions.push(parse_ast.parse_chain());
            errors.extend(parse_ast.errors);
        }

        if let Some(start) = split.unterminated_at {
            errors.push(ParseError::new(
                AbsoluteSourceSpan::new(absolute_offset + start, absolute_offset + input.len()),
                format!(
                    "Parser Error: Unterminated interpolation: missing '}}}}' at column {} in [{}]",
                    start + 1,
                    input
                ),
            ));
        }

        let span = ParseSpan::new(0, input.len());
        Some(ASTWithSource {
            ast: AST::Interpolation(Interpolation {
                span,
                source_span: span.to_absolute(absolute_offset),
                strings: split.strings,
                expressions,
            }),
            source: input.to_string(),
            absolute_offset,
            errors,
        })
    }

    /// Parse the microsyntax of a structural directive. `template_key` is the
    /// directive name without the `*`.
    pub fn parse_template_bindings(
        &self,
        template_key: &str,
        template_value: &str,
        value_absolute_offset: usize,
    ) -> TemplateBindingParseResult {
        let tokens = self.lexer.tokenize(template_value);
        let mut parse_ast = ParseAST::new(
            template_value,
            template_value,
            0,
            value_absolute_offset,
            tokens,
            false,
        );
        let template_bindings = parse_ast.parse_template_bindings(template_key);
        TemplateBindingParseResult {
            template_bindings,
            errors: parse_ast.errors,
        }
    }
}

/// Byte range of one expression inside `{{ }}`.
#[derive(Debug, Clone, Copy)]
struct InterpolationPiece {
    start: usize,
    end: usize,
}

#[derive(Debug)]
struct SplitInterpolation {
    strings: Vec<String>,
    expressions: Vec<InterpolationPiece>,
    unterminated_at: Option<usize>,
}

fn split_interpolation(input: &str) -> Option<SplitInterpolation> {
    if !input.contains("{{") {
        return None;
    }
    let mut strings = Vec::new();
    let mut expressions = Vec::new();
    let mut unterminated_at = None;
    let mut cursor = 0;

    while cursor < input.len() {
        let Some(rel_start) = input[cursor..].find("{{") else {
            break;
        };
        let start = cursor + rel_start;
        let expr_start = start + 2;
        match find_interpolation_end(input, expr_start) {
            Some(expr_end) => {
                strings.push(input[cursor..start].to_string());
                expressions.push(InterpolationPiece {
                    start: expr_start,
                    end: expr_end,
                });
                cursor = expr_end + 2;
            }
            None => {
                unterminated_at = Some(start);
                break;
            }
        }
    }

    match unterminated_at {
        Some(start) => strings.push(input[cursor..start].to_string()),
        None => strings.push(input[cursor.min(input.len())..].to_string()),
    }

    Some(SplitInterpolation {
        strings,
        expressions,
        unterminated_at,
    })
}

/// Finds the `}}` closing an interpolation, ignoring braces inside quotes.
fn find_interpolation_end(input: &str, from: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = from;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => {
                if b == b'\'' || b == b'"' || b == b'`' {
                    quote = Some(b);
                } else if b == b'}' && bytes.get(i + 1) == Some(&b'}') {
                    return Some(i);
                }
            }
        }
        i += 1;
    }
    None
}

struct ParseAST<'a> {
    /// Full text used in error messages.
    input: &'a str,
    /// Text the tokens were produced from.
    text: &'a str,
    /// Offset of `text` inside `input`.
    location_offset: usize,
    absolute_offset: usize,
    tokens: Vec<Token>,
    index: usize,
    last_end: usize,
    action: bool,
    errors: Vec<ParseError>,
    eof: Token,
}

impl<'a> ParseAST<'a> {
    fn new(
        input: &'a str,
        text: &'a str,
        location_offset: usize,
        absolute_offset: usize,
        tokens: Vec<Token>,
        action: bool,
    ) -> Self {
        ParseAST {
            input,
            text,
            location_offset,
            absolute_offset,
            tokens,
            index: 0,
            last_end: location_offset,
            action,
            errors: Vec::new(),
            eof: Token::new(text.len(), text.len(), TokenType::Character, 0.0, String::new()),
        }
    }

    fn next(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.index + offset).unwrap_or(&self.eof)
    }

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn advance(&mut self) {
        if let Some(token) = self.tokens.get(self.index) {
            self.last_end = self.location_offset + token.end;
            self.index += 1;
        }
    }

    /// Offset of the next token relative to `input`.
    fn input_index(&self) -> usize {
        match self.tokens.get(self.index) {
            Some(token) => self.location_offset + token.index,
            None => self.location_offset + self.text.len(),
        }
    }

    fn span(&self, start: usize) -> ParseSpan {
        ParseSpan::new(start, self.last_end.max(start))
    }

    fn source_span(&self, start: usize) -> AbsoluteSourceSpan {
        self.span(start).to_absolute(self.absolute_offset)
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.next().is_character(code) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.next().is_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_character(&mut self, code: char) {
        if !self.consume_optional_character(code) {
            self.error(&format!("Missing expected {}", code));
        }
    }

    fn error(&mut self, message: &str) {
        let (location, span) = match self.tokens.get(self.index) {
            Some(token) => {
                let start = self.location_offset + token.index;
                let end = self.location_offset + token.end;
                (
                    format!("at column {} in", start + 1),
                    AbsoluteSourceSpan::new(self.absolute_offset + start, self.absolute_offset + end),
                )
            }
            None => {
                let end = self.absolute_offset + self.location_offset + self.text.len();
                (
                    "at the end of the expression".to_string(),
                    AbsoluteSourceSpan::new(end, end),
                )
            }
        };
        self.errors.push(ParseError::new(
            span,
            format!("Parser Error: {} {} [{}]", message, location, self.input),
        ));
    }

    /// Skips to the next `;` after an error.
    fn skip(&mut self) {
        while !self.at_end() && !self.next().is_character(';') {
            self.advance();
        }
    }

    fn empty(&self, start: usize) -> AST {
        let span = ParseSpan::new(start, start);
        AST::EmptyExpr(EmptyExpr {
            span,
            source_span: span.to_absolute(self.absolute_offset),
        })
    }

    fn parse_chain(&mut self) -> AST {
        let start = self.input_index();
        let mut expressions = Vec::new();
        while !self.at_end() {
            let errors_before = self.errors.len();
            expressions.push(self.parse_pipe());

            if self.consume_optional_character(';') {
                if !self.action {
                    self.error("Binding expression cannot contain chained expression");
                }
                while self.consume_optional_character(';') {}
            } else if !self.at_end() {
                let token = self.next().to_string();
                self.error(&format!("Unexpected token '{}'", token));
                self.advance();
                self.skip();
            } else if self.errors.len() > errors_before {
                self.skip();
            }
        }

        match expressions.len() {
            0 => self.empty(start),
            1 => expressions.remove(0),
            _ => AST::Chain(Chain {
                span: self.span(start),
                source_span: self.source_span(start),
                expressions,
            }),
        }
    }

    fn parse_pipe(&mut self) -> AST {
        let start = self.input_index();
        let mut result = self.parse_expression();
        if self.next().is_operator("|") {
            if self.action {
                self.error("Cannot have a pipe in an action expression");
            }
            while self.consume_optional_operator("|") {
                let name_start = self.input_index();
                let token = self.next().clone();
                let name = if token.is_identifier() || token.is_keyword() {
                    self.advance();
                    token.str_value
                } else {
                    self.error("expected identifier or keyword");
                    String::new()
                };
                let name_span = self.source_span(name_start);

                let mut args = Vec::new();
                while self.consume_optional_character(':') {
                    args.push(self.parse_expression());
                }
                result = AST::BindingPipe(BindingPipe {
                    span: self.span(start),
                    source_span: self.source_span(start),
                    name_span,
                    exp: Box::new(result),
                    name,
                    args,
                });
            }
        }
        result
    }

    fn parse_expression(&mut self) -> AST {
        self.parse_conditional()
    }

    fn parse_conditional(&mut self) -> AST {
        let start = self.input_index();
        let result = self.parse_logical_or();
        if !self.consume_optional_operator("?") {
            return result;
        }
        let true_exp = self.parse_pipe();
        let false_exp = if self.consume_optional_character(':') {
            self.parse_pipe()
        } else {
            let end = self.input_index();
            let expression = self.input[start..end.min(self.input.len())].to_string();
            self.error(&format!(
                "Conditional expression {} requires all 3 expressions",
                expression
            ));
            self.empty(end)
        };
        AST::Conditional(Conditional {
            span: self.span(start),
            source_span: self.source_span(start),
            condition: Box::new(result),
            true_exp: Box::new(true_exp),
            false_exp: Box::new(false_exp),
        })
    }

    fn parse_binary(&mut self, operators: &[&str], operand: fn(&mut Self) -> AST) -> AST {
        let start = self.input_index();
        let mut result = operand(self);
        loop {
            let token = self.next();
            let Some(operation) = operators
                .iter()
                .find(|op| token.is_operator(op))
                .map(|op| op.to_string())
            else {
                break;
            };
            self.advance();
            let right = operand(self);
            result = AST::Binary(Binary {
                span: self.span(start),
                source_span: self.source_span(start),
                operation,
                left: Box::new(result),
                right: Box::new(right),
            });
        }
        result
    }

    fn parse_logical_or(&mut self) -> AST {
        self.parse_binary(&["||"], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> AST {
        self.parse_binary(&["&&"], Self::parse_nullish_coalescing)
    }

    fn parse_nullish_coalescing(&mut self) -> AST {
        self.parse_binary(&["??"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> AST {
        self.parse_binary(&["==", "!=", "===", "!=="], Self::parse_relational)
    }

    fn parse_relational(&mut self) -> AST {
        self.parse_binary(&["<", ">", "<=", ">="], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> AST {
        self.parse_binary(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> AST {
        self.parse_binary(&["*", "%", "/"], Self::parse_prefix)
    }

    fn parse_prefix(&mut self) -> AST {
        let start = self.input_index();
        let token = self.next().clone();
        if token.token_type == TokenType::Operator {
            match token.str_value.as_str() {
                "+" | "-" => {
                    self.advance();
                    let expr = self.parse_prefix();
                    return AST::Unary(Unary {
                        span: self.span(start),
                        source_span: self.source_span(start),
                        operator: token.str_value,
                        expr: Box::new(expr),
                    });
                }
                "!" => {
                    self.advance();
                    let expression = self.parse_prefix();
                    return AST::PrefixNot(PrefixNot {
                        span: self.span(start),
                        source_span: self.source_span(start),
                        expression: Box::new(expression),
                    });
                }
                _ => {}
            }
        } else if token.is_keyword_value("typeof") {
            self.advance();
            let expression = self.parse_prefix();
            return AST::TypeofExpression(TypeofExpression {
                span: self.span(start),
                source_span: self.source_span(start),
                expression: Box::new(expression),
            });
        }
        self.parse_call_chain()
    }

    fn parse_call_chain(&mut self) -> AST {
        let start = self.input_index();
        let mut result = self.parse_primary();
        loop {
            if self.consume_optional_character('.') {
                result = self.parse_access_member(result, start, false);
            } else if self.consume_optional_operator("?.") {
                if self.consume_optional_character('(') {
                    result = self.parse_call(result, start, true);
                } else if self.consume_optional_character('[') {
                    result = self.parse_keyed(result, start, true);
                } else {
                    result = self.parse_access_member(result, start, true);
                }
            } else if self.consume_optional_character('[') {
                result = self.parse_keyed(result, start, false);
            } else if self.consume_optional_character('(') {
                result = self.parse_call(result, start, false);
            } else if self.consume_optional_operator("!") {
                result = AST::NonNullAssert(NonNullAssert {
                    span: self.span(start),
                    source_span: self.source_span(start),
                    expression: Box::new(result),
                });
            } else {
                return result;
            }
        }
    }

    fn parse_call(&mut self, receiver: AST, start: usize, safe: bool) -> AST {
        let mut args = Vec::new();
        if !self.next().is_character(')') {
            loop {
                args.push(self.parse_pipe());
                if !self.consume_optional_character(',') {
                    break;
                }
            }
        }
        self.expect_character(')');
        AST::Call(Call {
            span: self.span(start),
            source_span: self.source_span(start),
            receiver: Box::new(receiver),
            args,
            safe,
        })
    }

    fn parse_keyed(&mut self, receiver: AST, start: usize, safe: bool) -> AST {
        let key = self.parse_pipe();
        self.expect_character(']');
        if !safe && self.next().is_operator("=") {
            if !self.action {
                self.error("Bindings cannot contain assignments");
            }
            self.advance();
            let value = self.parse_conditional();
            return AST::KeyedWrite(KeyedWrite {
                span: self.span(start),
                source_span: self.source_span(start),
                receiver: Box::new(receiver),
                key: Box::new(key),
                value: Box::new(value),
            });
        }
        AST::KeyedRead(KeyedRead {
            span: self.span(start),
            source_span: self.source_span(start),
            receiver: Box::new(receiver),
            key: Box::new(key),
            safe,
        })
    }

    fn parse_access_member(&mut self, receiver: AST, start: usize, safe: bool) -> AST {
        let name_start = self.input_index();
        let token = self.next().clone();
        let name = if token.is_identifier() || token.is_keyword() {
            self.advance();
            token.str_value
        } else {
            self.error("expected identifier for property access");
            String::new()
        };
        let name_span = self.source_span(name_start);

        if self.next().is_operator("=") {
            if safe {
                self.error("The '?.' operator cannot be used in the assignment");
                self.advance();
                self.parse_conditional();
            } else {
                if !self.action {
                    self.error("Bindings cannot contain assignments");
                }
                self.advance();
                let value = self.parse_conditional();
                return AST::PropertyWrite(PropertyWrite {
                    span: self.span(start),
                    source_span: self.source_span(start),
                    name_span,
                    receiver: Box::new(receiver),
                    name,
                    value: Box::new(value),
                });
            }
        }

        AST::PropertyRead(PropertyRead {
            span: self.span(start),
            source_span: self.source_span(start),
            name_span,
            receiver: Box::new(receiver),
            name,
            safe,
        })
    }

    fn parse_primary(&mut self) -> AST {
        let start = self.input_index();
        let token = self.next().clone();

        if self.at_end() {
            let input = self.input.to_string();
            self.error(&format!("Unexpected end of expression: {}", input));
            return self.empty(start);
        }

        if token.is_character('(') {
            self.advance();
            let result = self.parse_pipe();
            self.expect_character(')');
            return result;
        }

        if token.is_keyword() {
            let value = match token.str_value.as_str() {
                "null" => Some(LiteralValue::Null),
                "undefined" => Some(LiteralValue::Undefined),
                "true" => Some(LiteralValue::Boolean(true)),
                "false" => Some(LiteralValue::Boolean(false)),
                _ => None,
            };
            if let Some(value) = value {
                self.advance();
                return self.literal(start, value);
            }
            if token.str_value == "this" {
                self.advance();
                return AST::ThisReceiver(ThisReceiver {
                    span: self.span(start),
                    source_span: self.source_span(start),
                });
            }
        }

        if token.is_character('[') {
            self.advance();
            let mut expressions = Vec::new();
            if !self.next().is_character(']') {
                loop {
                    expressions.push(self.parse_pipe());
                    if !self.consume_optional_character(',') {
                        break;
                    }
                }
            }
            self.expect_character(']');
            return AST::LiteralArray(LiteralArray {
                span: self.span(start),
                source_span: self.source_span(start),
                expressions,
            });
        }

        if token.is_character('{') {
            self.advance();
            return self.parse_literal_map(start);
        }

        if token.is_identifier() {
            let receiver = AST::ImplicitReceiver(ImplicitReceiver {
                span: ParseSpan::new(start, start),
                source_span: ParseSpan::new(start, start).to_absolute(self.absolute_offset),
            });
            return self.parse_access_member(receiver, start, false);
        }

        match token.token_type {
            TokenType::Number => {
                self.advance();
                self.literal(start, LiteralValue::Number(token.num_value))
            }
            TokenType::String => {
                self.advance();
                self.literal(start, LiteralValue::String(token.str_value))
            }
            TokenType::PrivateIdentifier => {
                self.error(&format!(
                    "Private identifiers are not supported. Unexpected private identifier: {}",
                    token
                ));
                self.advance();
                self.empty(start)
            }
            TokenType::Error => {
                self.error(&token.str_value);
                self.advance();
                self.empty(start)
            }
            _ => {
                self.error(&format!("Unexpected token {}", token));
                self.advance();
                self.empty(start)
            }
        }
    }

    fn literal(&self, start: usize, value: LiteralValue) -> AST {
        AST::LiteralPrimitive(LiteralPrimitive {
            span: self.span(start),
            source_span: self.source_span(start),
            value,
        })
    }

    fn parse_literal_map(&mut self, start: usize) -> AST {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.next().is_character('}') {
            loop {
                let key_start = self.input_index();
                let token = self.next().clone();
                let quoted = token.is_string();
                if !(quoted || token.is_identifier() || token.is_keyword()) {
                    self.error("expected identifier, keyword, or string");
                    self.advance();
                    break;
                }
                self.advance();
                let key = token.str_value;

                if self.consume_optional_character(':') {
                    values.push(self.parse_pipe());
                } else {
                    // Shorthand `{a}` reads `a` from the component.
                    let span = self.span(key_start);
                    let name_span = span.to_absolute(self.absolute_offset);
                    values.push(AST::PropertyRead(PropertyRead {
                        span,
                        source_span: name_span,
                        name_span,
                        receiver: Box::new(AST::ImplicitReceiver(ImplicitReceiver {
                            span: ParseSpan::new(key_start, key_start),
                            source_span: ParseSpan::new(key_start, key_start)
                                .to_absolute(self.absolute_offset),
                        })),
                        name: key.clone(),
                        safe: false,
                    }));
                }
                keys.push(LiteralMapKey { key, quoted });

                if !self.consume_optional_character(',') {
                    break;
                }
            }
        }
        self.expect_character('}');
        AST::LiteralMap(LiteralMap {
            span: self.span(start),
            source_span: self.source_span(start),
            keys,
            values,
        })
    }

    fn parse_template_bindings(&mut self, template_key: &str) -> Vec<TemplateBinding> {
        let mut bindings = Vec::new();
        let key_span = AbsoluteSourceSpan::new(self.absolute_offset, self.absolute_offset);
        bindings.extend(self.parse_directive_keyword_bindings(template_key.to_string(), key_span));

        while !self.at_end() {
            if self.next().is_keyword_value("let") {
                bindings.push(self.parse_let_binding());
            } else {
                let key_start = self.input_index();
                let key = self.expect_template_binding_key();
                let key_span = self.source_span(key_start);
                match self.parse_as_binding(&key, key_start) {
                    Some(binding) => bindings.push(binding),
                    None => {
                        let full_key = format!("{}{}", template_key, capitalize(&key));
                        bindings.extend(self.parse_directive_keyword_bindings(full_key, key_span));
                    }
                }
            }
            self.consume_statement_terminator();
        }
        bindings
    }

    fn parse_directive_keyword_bindings(
        &mut self,
        key: String,
        key_span: AbsoluteSourceSpan,
    ) -> Vec<TemplateBinding> {
        let mut bindings = Vec::new();
        self.consume_optional_character(':');
        let value = self.get_directive_bound_target();
        let end = value
            .as_ref()
            .map(|v| v.ast.source_span().end)
            .unwrap_or(key_span.end);
        bindings.push(TemplateBinding::Expression(ExpressionBinding {
            source_span: AbsoluteSourceSpan::new(key_span.start, end),
            key: key.clone(),
            value,
        }));
        let as_start = self.input_index();
        if let Some(binding) = self.parse_as_binding(&key, as_start) {
            bindings.push(binding);
        }
        self.consume_statement_terminator();
        bindings
    }

    fn get_directive_bound_target(&mut self) -> Option<ASTWithSource> {
        if self.at_end()
            || self.next().is_keyword_value("as")
            || self.next().is_keyword_value("let")
        {
            return None;
        }
        let start = self.input_index();
        let errors_before = self.errors.len();
        let ast = self.parse_pipe();
        let end = self.last_end.max(start);
        Some(ASTWithSource {
            ast,
            source: self.input[start..end.min(self.input.len())].to_string(),
            absolute_offset: self.absolute_offset + start,
            errors: self.errors[errors_before..].to_vec(),
        })
    }

    /// `value as alias`
    fn parse_as_binding(&mut self, value: &str, start: usize) -> Option<TemplateBinding> {
        if !self.next().is_keyword_value("as") {
            return None;
        }
        self.advance();
        let name = self.expect_template_binding_key();
        self.consume_statement_terminator();
        Some(TemplateBinding::Variable(VariableBinding {
            source_span: self.source_span(start),
            name,
            value: value.to_string(),
        }))
    }

    /// `let name` or `let name = key`
    fn parse_let_binding(&mut self) -> TemplateBinding {
        let start = self.input_index();
        self.advance();
        let name = self.expect_template_binding_key();
        let value = if self.consume_optional_operator("=") {
            self.expect_template_binding_key()
        } else {
            "$implicit".to_string()
        };
        TemplateBinding::Variable(VariableBinding {
            source_span: self.source_span(start),
            name,
            value,
        })
    }

    fn expect_template_binding_key(&mut self) -> String {
        let token = self.next().clone();
        if token.is_identifier() || token.is_keyword() || token.is_string() {
            self.advance();
            let mut key = token.str_value;
            // Keys such as `ng-for-of` are joined across `-` operators.
            while self.next().is_operator("-") && self.peek(1).is_identifier() {
                self.advance();
                key.push('-');
                key.push_str(&self.next().str_value.clone());
                self.advance();
            }
            key
        } else {
            self.error("expected identifier, keyword or string");
            self.advance();
            String::new()
        }
    }

    fn consume_statement_terminator(&mut self) {
        if !self.consume_optional_character(';') {
            self.consume_optional_character(',');
        }
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
