/**
 * Lexer Tests
 *
 * Token kinds and offsets produced by the expression lexer.
 */

#[cfg(test)]
mod tests {
    use angular_compiler::expression_parser::lexer::{Lexer, Token};

    fn lex(text: &str) -> Vec<Token> {
        Lexer::new().tokenize(text)
    }

    fn expect_token(token: &Token, index: usize, end: usize) {
        assert_eq!(token.index, index, "Token index mismatch");
        assert_eq!(token.end, end, "Token end mismatch");
    }

    mod token {
        use super::*;

        #[test]
        fn should_tokenize_a_simple_identifier() {
            let tokens = lex("j");
            assert_eq!(tokens.len(), 1);
            assert!(tokens[0].is_identifier());
            expect_token(&tokens[0], 0, 1);
        }

        #[test]
        fn should_tokenize_a_dotted_identifier() {
            let tokens = lex("j.k");
            assert_eq!(tokens.len(), 3);
            assert!(tokens[0].is_identifier());
            assert!(tokens[1].is_character('.'));
            assert!(tokens[2].is_identifier());
            expect_token(&tokens[2], 2, 3);
        }

        #[test]
        fn should_tokenize_keywords() {
            let tokens = lex("this null undefined true false typeof");
            assert!(tokens.iter().all(|t| t.is_keyword()));
            assert!(tokens[0].is_keyword_value("this"));
        }

        #[test]
        fn should_tokenize_numbers_with_separators() {
            let tokens = lex("1_000.5");
            assert_eq!(tokens.len(), 1);
            assert!(tokens[0].is_number());
            assert_eq!(tokens[0].num_value, 1000.5);
        }

        #[test]
        fn should_tokenize_a_leading_period_number() {
            let tokens = lex(".5");
            assert!(tokens[0].is_number());
            assert_eq!(tokens[0].num_value, 0.5);
        }

        #[test]
        fn should_tokenize_strings_with_escapes() {
            let tokens = lex(r#"'a\'b' "c""#);
            assert_eq!(tokens.len(), 2);
            assert!(tokens[0].is_string());
            assert_eq!(tokens[0].str_value, "a'b");
            assert_eq!(tokens[1].str_value, "c");
            expect_token(&tokens[1], 7, 10);
        }

        #[test]
        fn should_tokenize_multi_character_operators() {
            let tokens = lex("a ?. b ?? c !== d && e || f <= g");
            let operators: Vec<&str> = tokens
                .iter()
                .filter(|t| !t.is_identifier())
                .map(|t| t.str_value.as_str())
                .collect();
            assert_eq!(operators, vec!["?.", "??", "!==", "&&", "||", "<="]);
        }

        #[test]
        fn should_tokenize_the_pipe_operator() {
            let tokens = lex("a | b:1");
            assert!(tokens[1].is_operator("|"));
            assert!(tokens[3].is_character(':'));
        }

        #[test]
        fn should_tokenize_private_identifiers() {
            let tokens = lex("#secret");
            assert!(tokens[0].is_private_identifier());
            assert_eq!(tokens[0].str_value, "#secret");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_an_unterminated_quote() {
            let tokens = lex("'abc");
            assert_eq!(tokens.len(), 1);
            assert!(tokens[0].is_error());
            assert_eq!(tokens[0].str_value, "Unterminated quote");
        }

        #[test]
        fn should_stop_after_an_unexpected_character() {
            let tokens = lex("a ^ b");
            assert_eq!(tokens.len(), 2);
            assert!(tokens[1].is_error());
            assert_eq!(tokens[1].str_value, "Unexpected character [^]");
        }

        #[test]
        fn should_reject_a_single_ampersand() {
            let tokens = lex("a & b");
            assert!(tokens[1].is_error());
        }
    }
}
