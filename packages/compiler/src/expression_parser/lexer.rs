/**
 * Angular Expression Lexer
 *
 * Tokenizes template expressions (bindings, actions and microsyntax) into
 * tokens for the recursive descent parser.
 */
use crate::chars;

/// Token types in template expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Character,
    Identifier,
    PrivateIdentifier,
    Keyword,
    String,
    Operator,
    Number,
    Error,
}

const KEYWORDS: &[&str] = &[
    "var", "let", "as", "null", "undefined", "true", "false", "if", "else", "this", "typeof",
];

/// Token representation. `index` and `end` are offsets into the lexed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(
        index: usize,
        end: usize,
        token_type: TokenType,
        num_value: f64,
        str_value: String,
    ) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.starts_with(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_private_identifier(&self) -> bool {
        self.token_type == TokenType::PrivateIdentifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_keyword_value(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Number => write!(f, "{}", self.num_value),
            _ => write!(f, "{}", self.str_value),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(text);
        let mut tokens = Vec::new();
        while let Some(token) = scanner.scan_token() {
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }
}

struct Scanner<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek_at(&self, pos: usize) -> char {
        self.chars.get(pos).map(|(_, c)| *c).unwrap_or(chars::EOF)
    }

    fn peek(&self) -> char {
        self.peek_at(self.pos)
    }

    fn offset(&self, pos: usize) -> usize {
        self.chars
            .get(pos)
            .map(|(i, _)| *i)
            .unwrap_or(self.input.len())
    }

    fn scan_token(&mut self) -> Option<Token> {
        while self.pos < self.chars.len() && chars::is_whitespace(self.peek()) {
            self.pos += 1;
        }
        if self.pos >= self.chars.len() {
            return None;
        }

        let start = self.pos;
        let ch = self.peek();

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier(start));
        }
        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::PERIOD => {
                self.pos += 1;
                if chars::is_digit(self.peek()) {
                    self.pos = start;
                    return Some(self.scan_number(start));
                }
                Some(self.character(start))
            }
            chars::LPAREN
            | chars::RPAREN
            | chars::LBRACE
            | chars::RBRACE
            | chars::LBRACKET
            | chars::RBRACKET
            | chars::COMMA
            | chars::COLON
            | chars::SEMICOLON => {
                self.pos += 1;
                Some(self.character(start))
            }
            chars::SQ | chars::DQ => Some(self.scan_string(start)),
            chars::HASH => Some(self.scan_private_identifier(start)),
            chars::PLUS | chars::MINUS | chars::STAR | chars::SLASH | chars::PERCENT => {
                self.pos += 1;
                Some(self.operator(start))
            }
            chars::QUESTION => {
                self.pos += 1;
                if self.peek() == chars::PERIOD || self.peek() == chars::QUESTION {
                    self.pos += 1;
                }
                Some(self.operator(start))
            }
            chars::LT | chars::GT => {
                self.pos += 1;
                if self.peek() == chars::EQ {
                    self.pos += 1;
                }
                Some(self.operator(start))
            }
            chars::BANG | chars::EQ => {
                self.pos += 1;
                if self.peek() == chars::EQ {
                    self.pos += 1;
                    if self.peek() == chars::EQ {
                        self.pos += 1;
                    }
                }
                Some(self.operator(start))
            }
            chars::AMPERSAND => self.scan_double(start, chars::AMPERSAND),
            chars::BAR => {
                self.pos += 1;
                if self.peek() == chars::BAR {
                    self.pos += 1;
                }
                Some(self.operator(start))
            }
            _ => {
                self.pos += 1;
                Some(self.error(start, format!("Unexpected character [{}]", ch)))
            }
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.input[self.offset(start)..self.offset(end)].to_string()
    }

    fn character(&self, start: usize) -> Token {
        Token::new(
            self.offset(start),
            self.offset(self.pos),
            TokenType::Character,
            0.0,
            self.text(start, self.pos),
        )
    }

    fn operator(&self, start: usize) -> Token {
        Token::new(
            self.offset(start),
            self.offset(self.pos),
            TokenType::Operator,
            0.0,
            self.text(start, self.pos),
        )
    }

    fn error(&self, start: usize, message: String) -> Token {
        Token::new(
            self.offset(start),
            self.offset(self.pos),
            TokenType::Error,
            0.0,
            message,
        )
    }

    fn scan_double(&mut self, start: usize, second: char) -> Option<Token> {
        self.pos += 1;
        if self.peek() == second {
            self.pos += 1;
            return Some(self.operator(start));
        }
        Some(self.error(start, format!("Unexpected character [{}]", second)))
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        while chars::is_identifier_part(self.peek()) {
            self.pos += 1;
        }
        let value = self.text(start, self.pos);
        let token_type = if KEYWORDS.contains(&value.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(
            self.offset(start),
            self.offset(self.pos),
            token_type,
            0.0,
            value,
        )
    }

    fn scan_private_identifier(&mut self, start: usize) -> Token {
        self.pos += 1;
        if !chars::is_identifier_start(self.peek()) {
            return self.error(start, "Invalid character [#]".to_string());
        }
        while chars::is_identifier_part(self.peek()) {
            self.pos += 1;
        }
        Token::new(
            self.offset(start),
            self.offset(self.pos),
            TokenType::PrivateIdentifier,
            0.0,
            self.text(start, self.pos),
        )
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut seen_period = false;
        loop {
            let ch = self.peek();
            if chars::is_digit(ch) || ch == chars::UNDERSCORE {
                self.pos += 1;
            } else if ch == chars::PERIOD && !seen_period {
                seen_period = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let raw = self.text(start, self.pos).replace('_', "");
        match raw.parse::<f64>() {
            Ok(value) => Token::new(
                self.offset(start),
                self.offset(self.pos),
                TokenType::Number,
                value,
                raw,
            ),
            Err(_) => self.error(start, format!("Invalid number [{}]", raw)),
        }
    }

    fn scan_string(&mut self, start: usize) -> Token {
        let quote = self.peek();
        self.pos += 1;
        let mut value = String::new();
        loop {
            let ch = self.peek();
            if self.pos >= self.chars.len() {
                return self.error(start, "Unterminated quote".to_string());
            }
            self.pos += 1;
            if ch == quote {
                break;
            }
            if ch == chars::BACKSLASH {
                let escaped = self.peek();
                self.pos += 1;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                value.push(ch);
            }
        }
        Token::new(
            self.offset(start),
            self.offset(self.pos),
            TokenType::String,
            0.0,
            value,
        )
    }
}
