// TypeCheck Types
//
// Reads TypeScript type annotations into template types, and knows the
// members of the built-in primitive and array types.

use super::super::api::{FunctionType, ParamType, TemplateType};
use crate::ngtsc::file_system::AbsoluteFsPath;

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Str,
    Num,
    Arrow,
    Ellipsis,
    Punct(char),
}

fn tokenize(text: &str) -> Vec<Tok> {
    let chars: Vec<char> = text.chars().collect();
    let mut toks = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$') {
                i += 1;
            }
            toks.push(Tok::Ident(chars[start..i].iter().collect()));
        } else if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).map_or(false, |n| n.is_ascii_digit())) {
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_') {
                i += 1;
            }
            toks.push(Tok::Num);
        } else if c == '\'' || c == '"' || c == '`' {
            i += 1;
            while i < chars.len() && chars[i] != c {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            i += 1;
            toks.push(Tok::Str);
        } else if c == '=' && chars.get(i + 1) == Some(&'>') {
            i += 2;
            toks.push(Tok::Arrow);
        } else if c == '.' && chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') {
            i += 3;
            toks.push(Tok::Ellipsis);
        } else {
            i += 1;
            toks.push(Tok::Punct(c));
        }
    }
    toks
}

struct TypeTextParser<'o> {
    toks: Vec<Tok>,
    pos: usize,
    origin: &'o AbsoluteFsPath,
}

impl<'o> TypeTextParser<'o> {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Tok> {
        self.toks.get(self.pos + offset)
    }

    fn is_punct(&self, c: char) -> bool {
        self.peek() == Some(&Tok::Punct(c))
    }

    fn is_ident(&self, name: &str) -> bool {
        matches!(self.peek(), Some(Tok::Ident(ident)) if ident == name)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.is_punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.toks.len()
    }

    /// Skip a balanced group starting at the current `open` token.
    fn skip_group(&mut self, open: char, close: char) {
        let mut depth = 0usize;
        while let Some(tok) = self.peek() {
            let tok = tok.clone();
            self.pos += 1;
            if tok == Tok::Punct(open) {
                depth += 1;
            } else if tok == Tok::Punct(close) {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
    }

    fn parse_type(&mut self) -> TemplateType {
        self.eat('|');
        let mut parts = vec![self.parse_intersection()];
        while self.eat('|') {
            parts.push(self.parse_intersection());
        }
        if self.is_ident("extends") {
            // Conditional types are out of reach.
            self.pos = self.toks.len();
            return TemplateType::Any;
        }
        TemplateType::union(parts)
    }

    fn parse_intersection(&mut self) -> TemplateType {
        self.eat('&');
        let first = self.parse_postfix();
        if !self.is_punct('&') {
            return first;
        }
        while self.eat('&') {
            self.parse_postfix();
        }
        TemplateType::Any
    }

    fn parse_postfix(&mut self) -> TemplateType {
        let mut ty = self.parse_primary();
        while self.is_punct('[') {
            if self.peek_at(1) == Some(&Tok::Punct(']')) {
                self.pos += 2;
                ty = TemplateType::Array(Box::new(ty));
            } else {
                self.skip_group('[', ']');
                ty = TemplateType::Any;
            }
        }
        ty
    }

    fn parse_primary(&mut self) -> TemplateType {
        let tok = match self.peek() {
            Some(tok) => tok.clone(),
            None => return TemplateType::Any,
        };
        match tok {
            Tok::Punct('(') => {
                if self.is_function_type() {
                    self.parse_function_type()
                } else {
                    self.pos += 1;
                    let ty = self.parse_type();
                    self.eat(')');
                    ty
                }
            }
            Tok::Punct('<') => {
                self.skip_group('<', '>');
                self.parse_function_type()
            }
            Tok::Punct('{') => self.parse_object_type(),
            Tok::Punct('[') => {
                self.skip_group('[', ']');
                TemplateType::Array(Box::new(TemplateType::Any))
            }
            Tok::Str => {
                self.pos += 1;
                TemplateType::String
            }
            Tok::Num => {
                self.pos += 1;
                TemplateType::Number
            }
            Tok::Ident(name) => {
                self.pos += 1;
                self.parse_named(&name)
            }
            Tok::Punct(',') | Tok::Punct(')') | Tok::Punct('}') | Tok::Punct(']') | Tok::Punct('>')
            | Tok::Punct(';') => TemplateType::Any,
            _ => {
                self.pos += 1;
                TemplateType::Any
            }
        }
    }

    fn parse_named(&mut self, name: &str) -> TemplateType {
        match name {
            "string" => return TemplateType::String,
            "number" | "bigint" => return TemplateType::Number,
            "boolean" | "true" | "false" => return TemplateType::Boolean,
            "null" => return TemplateType::Null,
            "undefined" => return TemplateType::Undefined,
            "void" | "never" => return TemplateType::Void,
            "any" | "unknown" | "object" | "symbol" => return TemplateType::Any,
            "typeof" => {
                if matches!(self.peek(), Some(Tok::Ident(_))) {
                    self.pos += 1;
                }
                self.parse_qualified_rest();
                return TemplateType::Any;
            }
            "keyof" => {
                self.parse_postfix();
                return TemplateType::String;
            }
            "readonly" => return self.parse_postfix(),
            "new" | "abstract" => {
                if self.is_ident("new") {
                    self.pos += 1;
                }
                self.parse_function_type();
                return TemplateType::Any;
            }
            _ => {}
        }

        let qualified = self.parse_qualified_rest();
        let mut args = Vec::new();
        if self.eat('<') {
            while !self.at_end() && !self.is_punct('>') {
                args.push(self.parse_type());
                if !self.eat(',') && !self.is_punct('>') {
                    self.pos += 1;
                }
            }
            self.eat('>');
        }
        if qualified {
            return TemplateType::Any;
        }
        match name {
            "Array" | "ReadonlyArray" => {
                TemplateType::Array(Box::new(args.into_iter().next().unwrap_or(TemplateType::Any)))
            }
            "String" => TemplateType::String,
            "Number" => TemplateType::Number,
            "Boolean" => TemplateType::Boolean,
            "Function" => TemplateType::Function(FunctionType::variadic(TemplateType::Any)),
            _ => TemplateType::Named {
                name: name.to_string(),
                origin: self.origin.clone(),
            },
        }
    }

    /// Consume `.b.c` after a name. Returns whether anything was consumed.
    fn parse_qualified_rest(&mut self) -> bool {
        let mut qualified = false;
        while self.is_punct('.') && matches!(self.peek_at(1), Some(Tok::Ident(_))) {
            self.pos += 2;
            qualified = true;
        }
        qualified
    }

    fn is_function_type(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.pos;
        while let Some(tok) = self.toks.get(i) {
            match tok {
                Tok::Punct('(') => depth += 1,
                Tok::Punct(')') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.toks.get(i + 1) == Some(&Tok::Arrow);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn parse_params(&mut self) -> Vec<ParamType> {
        let mut params = Vec::new();
        if !self.eat('(') {
            return params;
        }
        while !self.at_end() && !self.is_punct(')') {
            let rest = self.peek() == Some(&Tok::Ellipsis);
            if rest {
                self.pos += 1;
            }
            let name = match self.peek().cloned() {
                Some(Tok::Ident(name)) => {
                    self.pos += 1;
                    Some(name)
                }
                Some(Tok::Punct('{')) => {
                    self.skip_group('{', '}');
                    None
                }
                Some(Tok::Punct('[')) => {
                    self.skip_group('[', ']');
                    None
                }
                _ => None,
            };
            let optional = self.eat('?');
            let ty = if self.eat(':') {
                self.parse_type()
            } else {
                TemplateType::Any
            };
            if name.as_deref() != Some("this") {
                params.push(ParamType {
                    name,
                    ty,
                    optional: optional || rest,
                    rest,
                });
            }
            if !self.eat(',') && !self.is_punct(')') {
                self.pos += 1;
            }
        }
        self.eat(')');
        params
    }

    fn parse_function_type(&mut self) -> TemplateType {
        let params = self.parse_params();
        let ret = if self.peek() == Some(&Tok::Arrow) {
            self.pos += 1;
            self.parse_type()
        } else {
            TemplateType::Any
        };
        TemplateType::Function(FunctionType {
            params,
            ret: Box::new(ret),
        })
    }

    fn parse_object_type(&mut self) -> TemplateType {
        self.eat('{');
        let mut fields = Vec::new();
        let mut open_ended = false;
        while !self.at_end() && !self.is_punct('}') {
            let start = self.pos;
            if self.is_ident("readonly") && matches!(self.peek_at(1), Some(Tok::Ident(_)) | Some(Tok::Str)) {
                self.pos += 1;
            }
            let name = match self.peek().cloned() {
                Some(Tok::Ident(name)) => {
                    self.pos += 1;
                    Some(name)
                }
                Some(Tok::Punct('[')) => {
                    self.skip_group('[', ']');
                    open_ended = true;
                    None
                }
                _ => None,
            };
            self.eat('?');
            let ty = if self.is_punct('(') || self.is_punct('<') {
                if self.is_punct('<') {
                    self.skip_group('<', '>');
                }
                let params = self.parse_params();
                let ret = if self.eat(':') {
                    self.parse_type()
                } else {
                    TemplateType::Any
                };
                TemplateType::Function(FunctionType {
                    params,
                    ret: Box::new(ret),
                })
            } else if self.eat(':') {
                self.parse_type()
            } else {
                TemplateType::Any
            };
            if let Some(name) = name {
                fields.push((name, ty));
            }
            if !self.eat(';') {
                self.eat(',');
            }
            if self.pos == start {
                self.pos += 1;
            }
        }
        self.eat('}');
        if open_ended {
            TemplateType::Any
        } else {
            TemplateType::Object(fields)
        }
    }
}

/// Read a TypeScript type annotation. Anything not understood becomes `any`.
pub fn parse_type_text(text: &str, origin: &AbsoluteFsPath) -> TemplateType {
    let mut parser = TypeTextParser {
        toks: tokenize(text),
        pos: 0,
        origin,
    };
    let ty = parser.parse_type();
    if parser.at_end() {
        ty
    } else {
        TemplateType::Any
    }
}

fn method(ret: TemplateType) -> TemplateType {
    TemplateType::Function(FunctionType::variadic(ret))
}

/// Type of member `name` on a primitive or array type, `None` when the type
/// has no such member.
pub fn primitive_member(ty: &TemplateType, name: &str) -> Option<TemplateType> {
    use TemplateType as T;
    let member = match ty {
        T::String => match name {
            "length" => T::Number,
            "toUpperCase" | "toLowerCase" | "toLocaleUpperCase" | "toLocaleLowerCase" | "trim"
            | "trimStart" | "trimEnd" | "charAt" | "slice" | "substring" | "substr" | "replace"
            | "replaceAll" | "concat" | "padStart" | "padEnd" | "repeat" | "at" | "toString"
            | "valueOf" | "normalize" => method(T::String),
            "indexOf" | "lastIndexOf" | "charCodeAt" | "codePointAt" | "localeCompare" | "search" => {
                method(T::Number)
            }
            "includes" | "startsWith" | "endsWith" => method(T::Boolean),
            "split" => method(T::Array(Box::new(T::String))),
            "match" | "matchAll" => method(T::Any),
            _ => return None,
        },
        T::Number => match name {
            "toFixed" | "toString" | "toPrecision" | "toExponential" | "toLocaleString" => {
                method(T::String)
            }
            "valueOf" => method(T::Number),
            _ => return None,
        },
        T::Boolean => match name {
            "toString" => method(T::String),
            "valueOf" => method(T::Boolean),
            _ => return None,
        },
        T::Array(elem) => {
            let elem = elem.as_ref().clone();
            match name {
                "length" => T::Number,
                "join" | "toString" | "toLocaleString" => method(T::String),
                "filter" | "slice" | "concat" | "reverse" | "sort" | "splice" | "toReversed"
                | "toSorted" => method(T::Array(Box::new(elem))),
                "find" | "findLast" | "at" | "pop" | "shift" => method(elem),
                "includes" | "some" | "every" => method(T::Boolean),
                "indexOf" | "lastIndexOf" | "findIndex" | "findLastIndex" | "push" | "unshift" => {
                    method(T::Number)
                }
                "forEach" => method(T::Void),
                "map" | "flatMap" | "flat" | "reduce" | "reduceRight" | "keys" | "values"
                | "entries" | "fill" => method(T::Any),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(member)
}
