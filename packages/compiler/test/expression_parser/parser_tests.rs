/**
 * Parser Tests
 *
 * Expression trees, spans and error reporting of the expression parser.
 */

#[cfg(test)]
mod tests {
    use angular_compiler::expression_parser::ast::*;
    use angular_compiler::expression_parser::Parser;
    use angular_compiler::parse_util::AbsoluteSourceSpan;

    fn parse_binding(text: &str) -> ASTWithSource {
        Parser::new().parse_binding(text, 0)
    }

    fn parse_action(text: &str) -> ASTWithSource {
        Parser::new().parse_action(text, 0)
    }

    fn error_messages(ast: &ASTWithSource) -> Vec<String> {
        ast.errors.iter().map(|e| e.msg.clone()).collect()
    }

    mod bindings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_property_reads_on_the_implicit_receiver() {
            let result = parse_binding("user.name");
            assert!(!result.has_errors());
            let AST::PropertyRead(outer) = &result.ast else {
                panic!("expected property read, got {:?}", result.ast);
            };
            assert_eq!(outer.name, "name");
            let AST::PropertyRead(inner) = outer.receiver.as_ref() else {
                panic!("expected nested property read");
            };
            assert_eq!(inner.name, "user");
            assert!(inner.receiver.is_component_receiver());
            assert_eq!(inner.name_span, AbsoluteSourceSpan::new(0, 4));
            assert_eq!(outer.name_span, AbsoluteSourceSpan::new(5, 9));
        }

        #[test]
        fn should_offset_spans_by_the_absolute_offset() {
            let result = Parser::new().parse_binding("a + b", 10);
            assert_eq!(result.ast.source_span(), AbsoluteSourceSpan::new(10, 15));
        }

        #[test]
        fn should_parse_safe_navigation() {
            let result = parse_binding("a?.b");
            let AST::PropertyRead(read) = &result.ast else {
                panic!("expected property read");
            };
            assert!(read.safe);
        }

        #[test]
        fn should_respect_operator_precedence() {
            let result = parse_binding("a + b * c");
            let AST::Binary(binary) = &result.ast else {
                panic!("expected binary");
            };
            assert_eq!(binary.operation, "+");
            assert!(matches!(binary.right.as_ref(), AST::Binary(b) if b.operation == "*"));
        }

        #[test]
        fn should_parse_conditionals() {
            let result = parse_binding("a ? 1 : 'x'");
            assert!(matches!(result.ast, AST::Conditional(_)));
        }

        #[test]
        fn should_parse_calls_with_arguments() {
            let result = parse_binding("greet('a', 1)");
            let AST::Call(call) = &result.ast else {
                panic!("expected call");
            };
            assert_eq!(call.args.len(), 2);
            assert!(matches!(call.receiver.as_ref(), AST::PropertyRead(r) if r.name == "greet"));
        }

        #[test]
        fn should_parse_pipes_with_arguments() {
            let result = parse_binding("birthday | date:'short':tz");
            let AST::BindingPipe(pipe) = &result.ast else {
                panic!("expected pipe");
            };
            assert_eq!(pipe.name, "date");
            assert_eq!(pipe.args.len(), 2);
            assert_eq!(pipe.name_span, AbsoluteSourceSpan::new(11, 15));
        }

        #[test]
        fn should_parse_literal_maps_and_arrays() {
            let result = parse_binding("{a: 1, 'b': [x, y], c}");
            let AST::LiteralMap(map) = &result.ast else {
                panic!("expected literal map");
            };
            let keys: Vec<&str> = map.keys.iter().map(|k| k.key.as_str()).collect();
            assert_eq!(keys, vec!["a", "b", "c"]);
            assert!(map.keys[1].quoted);
            assert!(matches!(map.values[1], AST::LiteralArray(_)));
        }

        #[test]
        fn should_parse_keyed_reads_and_non_null_assertions() {
            let result = parse_binding("items[0]!.name");
            let AST::PropertyRead(read) = &result.ast else {
                panic!("expected property read");
            };
            assert!(matches!(read.receiver.as_ref(), AST::NonNullAssert(_)));
        }

        #[test]
        fn should_parse_this_receiver() {
            let result = parse_binding("this.title");
            let AST::PropertyRead(read) = &result.ast else {
                panic!("expected property read");
            };
            assert!(matches!(read.receiver.as_ref(), AST::ThisReceiver(_)));
        }

        #[test]
        fn should_report_assignments_in_bindings() {
            let result = parse_binding("a = 1");
            assert_eq!(result.errors.len(), 1);
            assert!(error_messages(&result)[0].contains("Bindings cannot contain assignments"));
        }

        #[test]
        fn should_report_chains_in_bindings() {
            let result = parse_binding("a; b");
            assert!(error_messages(&result)
                .iter()
                .any(|m| m.contains("Binding expression cannot contain chained expression")));
        }

        #[test]
        fn should_report_unexpected_tokens_with_their_column() {
            let result = parse_binding("a b");
            assert_eq!(
                error_messages(&result),
                vec!["Parser Error: Unexpected token 'b' at column 3 in [a b]".to_string()]
            );
            assert_eq!(result.errors[0].span, AbsoluteSourceSpan::new(2, 3));
        }

        #[test]
        fn should_report_an_unexpected_end_of_expression() {
            let result = parse_binding("a +");
            assert_eq!(result.errors.len(), 1);
            assert!(error_messages(&result)[0].contains("Unexpected end of expression: a +"));
        }

        #[test]
        fn should_report_lexer_errors() {
            let result = parse_binding("'abc");
            assert!(error_messages(&result)[0].contains("Unterminated quote"));
        }

        #[test]
        fn should_parse_an_empty_binding_without_errors() {
            let result = parse_binding("");
            assert!(result.ast.is_empty());
            assert!(!result.has_errors());
        }
    }

    mod actions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_property_writes() {
            let result = parse_action("count = count + 1");
            assert!(!result.has_errors());
            let AST::PropertyWrite(write) = &result.ast else {
                panic!("expected property write");
            };
            assert_eq!(write.name, "count");
        }

        #[test]
        fn should_parse_chains() {
            let result = parse_action("a(); b = $event");
            assert!(!result.has_errors());
            let AST::Chain(chain) = &result.ast else {
                panic!("expected chain");
            };
            assert_eq!(chain.expressions.len(), 2);
        }

        #[test]
        fn should_report_pipes_in_actions() {
            let result = parse_action("a | b");
            assert!(error_messages(&result)[0].contains("Cannot have a pipe in an action expression"));
        }
    }

    mod interpolation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_return_none_without_interpolation() {
            assert!(Parser::new().parse_interpolation("plain text", 0).is_none());
        }

        #[test]
        fn should_split_strings_and_expressions() {
            let result = Parser::new()
                .parse_interpolation("Hi {{ name }}, you are {{age}}!", 5)
                .expect("interpolation");
            assert!(!result.has_errors());
            let AST::Interpolation(interpolation) = &result.ast else {
                panic!("expected interpolation");
            };
            assert_eq!(interpolation.strings, vec!["Hi ", ", you are ", "!"]);
            assert_eq!(interpolation.expressions.len(), 2);
            let AST::PropertyRead(name) = &interpolation.expressions[0] else {
                panic!("expected property read");
            };
            assert_eq!(name.name_span, AbsoluteSourceSpan::new(11, 15));
        }

        #[test]
        fn should_ignore_braces_inside_quotes() {
            let result = Parser::new()
                .parse_interpolation("{{ '}}' + a }}", 0)
                .expect("interpolation");
            assert!(!result.has_errors());
        }

        #[test]
        fn should_report_unterminated_interpolation() {
            let result = Parser::new()
                .parse_interpolation("Hello {{ name", 0)
                .expect("interpolation");
            assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].msg.contains("Unterminated interpolation"));
            assert_eq!(result.errors[0].span, AbsoluteSourceSpan::new(6, 13));
        }

        #[test]
        fn should_report_blank_expressions() {
            let result = Parser::new()
                .parse_interpolation("{{ }}", 0)
                .expect("interpolation");
            assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0]
                .msg
                .contains("Blank expressions are not allowed in interpolated strings"));
        }
    }

    mod template_bindings {
        use super::*;
        use pretty_assertions::assert_eq;

        fn bindings(key: &str, value: &str) -> Vec<TemplateBinding> {
            let result = Parser::new().parse_template_bindings(key, value, 0);
            assert!(result.errors.is_empty(), "{:?}", result.errors);
            result.template_bindings
        }

        fn variables(bindings: &[TemplateBinding]) -> Vec<(String, String)> {
            bindings
                .iter()
                .filter_map(|b| match b {
                    TemplateBinding::Variable(v) => Some((v.name.clone(), v.value.clone())),
                    TemplateBinding::Expression(_) => None,
                })
                .collect()
        }

        fn expression_keys(bindings: &[TemplateBinding]) -> Vec<String> {
            bindings
                .iter()
                .filter_map(|b| match b {
                    TemplateBinding::Expression(e) => Some(e.key.clone()),
                    TemplateBinding::Variable(_) => None,
                })
                .collect()
        }

        #[test]
        fn should_parse_ng_for_microsyntax() {
            let result = bindings("ngFor", "let item of items; let i = index; trackBy: byId");
            assert_eq!(
                expression_keys(&result),
                vec!["ngFor", "ngForOf", "ngForTrackBy"]
            );
            assert_eq!(
                variables(&result),
                vec![
                    ("item".to_string(), "$implicit".to_string()),
                    ("i".to_string(), "index".to_string()),
                ]
            );
        }

        #[test]
        fn should_parse_keyword_as_aliases() {
            let result = bindings("ngFor", "let item of items; index as i");
            assert!(variables(&result).contains(&("i".to_string(), "index".to_string())));
        }

        #[test]
        fn should_parse_ng_if_with_alias_and_else() {
            let result = bindings("ngIf", "user$ | async as user; else loading");
            assert_eq!(expression_keys(&result), vec!["ngIf", "ngIfElse"]);
            assert_eq!(
                variables(&result),
                vec![("user".to_string(), "ngIf".to_string())]
            );
            let TemplateBinding::Expression(first) = &result[0] else {
                panic!("expected expression binding");
            };
            let value = first.value.as_ref().expect("bound value");
            assert_eq!(value.source, "user$ | async");
            assert!(matches!(value.ast, AST::BindingPipe(_)));
        }

        #[test]
        fn should_offset_bound_expressions() {
            let result = Parser::new().parse_template_bindings("ngIf", "show", 20);
            let TemplateBinding::Expression(first) = &result.template_bindings[0] else {
                panic!("expected expression binding");
            };
            let value = first.value.as_ref().expect("bound value");
            assert_eq!(value.ast.source_span(), AbsoluteSourceSpan::new(20, 24));
        }
    }
}
