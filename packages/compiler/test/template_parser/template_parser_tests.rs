/**
 * Template Parser Tests
 *
 * Element structure, attribute classification and structural errors.
 */

#[cfg(test)]
mod tests {
    use angular_compiler::expression_parser::ast::{TemplateBinding, AST};
    use angular_compiler::parse_util::AbsoluteSourceSpan;
    use angular_compiler::template_parser::*;

    fn parse_ok(template: &str) -> Vec<Node> {
        let parsed = parse_template(template);
        assert!(parsed.errors.is_empty(), "unexpected errors: {:?}", parsed.errors);
        parsed.nodes
    }

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(el) => el,
            other => panic!("expected element, got {:?}", other),
        }
    }

    fn messages(template: &str) -> Vec<String> {
        parse_template(template)
            .errors
            .into_iter()
            .map(|e| e.msg)
            .collect()
    }

    mod structure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_parse_nested_elements_and_text() {
            let nodes = parse_ok("<div><span>hi</span> there</div>");
            assert_eq!(nodes.len(), 1);
            let div = element(&nodes[0]);
            assert_eq!(div.name, "div");
            assert_eq!(div.children.len(), 2);
            assert_eq!(element(&div.children[0]).name, "span");
            assert_eq!(div.source_span, AbsoluteSourceSpan::new(0, 32));
        }

        #[test]
        fn should_not_expect_children_of_void_elements() {
            let nodes = parse_ok("<input><br/><p>x</p>");
            assert_eq!(nodes.len(), 3);
            assert!(element(&nodes[0]).children.is_empty());
        }

        #[test]
        fn should_parse_interpolated_text() {
            let nodes = parse_ok("<p>Hello {{ name }}</p>");
            let p = element(&nodes[0]);
            let Node::BoundText(text) = &p.children[0] else {
                panic!("expected bound text");
            };
            assert_eq!(text.source_span, AbsoluteSourceSpan::new(3, 19));
            assert!(matches!(text.value.ast, AST::Interpolation(_)));
        }

        #[test]
        fn should_keep_comparison_operators_inside_text() {
            let nodes = parse_ok("{{ a < b }}");
            assert!(matches!(nodes[0], Node::BoundText(_)));
        }

        #[test]
        fn should_parse_comments() {
            let nodes = parse_ok("<!-- note --><div></div>");
            assert!(matches!(&nodes[0], Node::Comment(c) if c.value == "note"));
        }

        #[test]
        fn should_not_parse_interpolation_in_raw_text() {
            let nodes = parse_ok("<style>a { color: red }</style>");
            let style = element(&nodes[0]);
            assert!(matches!(style.children[0], Node::Text(_)));
        }

        #[test]
        fn should_close_open_elements_at_end_of_input() {
            let nodes = parse_ok("<div><span>");
            let div = element(&nodes[0]);
            assert_eq!(element(&div.children[0]).name, "span");
            assert!(div.end_source_span.is_none());
        }
    }

    mod attributes {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_classify_bindings() {
            let nodes = parse_ok(
                r#"<input id="x" [value]="name" (input)="name = $event" [(ngModel)]="model" #box title="a {{b}}">"#,
            );
            let input = element(&nodes[0]);
            assert_eq!(input.attributes.len(), 1);
            assert_eq!(input.attributes[0].name, "id");

            let kinds: Vec<(&str, BindingKind)> = input
                .inputs
                .iter()
                .map(|i| (i.name.as_str(), i.kind))
                .collect();
            assert_eq!(
                kinds,
                vec![
                    ("value", BindingKind::Property),
                    ("ngModel", BindingKind::TwoWay),
                    ("title", BindingKind::Interpolated),
                ]
            );
            assert_eq!(input.outputs[0].name, "input");
            assert_eq!(input.references[0].name, "box");
        }

        #[test]
        fn should_place_binding_expressions_at_their_template_offset() {
            let nodes = parse_ok(r#"<b [title]="label"></b>"#);
            let b = element(&nodes[0]);
            assert_eq!(b.inputs[0].value_span, AbsoluteSourceSpan::new(12, 17));
            assert_eq!(
                b.inputs[0].value.ast.source_span(),
                AbsoluteSourceSpan::new(12, 17)
            );
        }

        #[test]
        fn should_parse_canonical_prefixes() {
            let nodes = parse_ok(r#"<b bind-title="t" on-click="go()" ref-me></b>"#);
            let b = element(&nodes[0]);
            assert_eq!(b.inputs[0].name, "title");
            assert_eq!(b.outputs[0].name, "click");
            assert_eq!(b.references[0].name, "me");
        }

        #[test]
        fn should_parse_structural_directives() {
            let nodes = parse_ok(r#"<li *ngFor="let item of items; let i = index">{{item}}</li>"#);
            let li = element(&nodes[0]);
            let directive = li.template_attr.as_ref().expect("structural directive");
            assert_eq!(directive.name, "ngFor");
            let names: Vec<&str> = directive
                .bindings
                .iter()
                .filter_map(|b| match b {
                    TemplateBinding::Variable(v) => Some(v.name.as_str()),
                    TemplateBinding::Expression(_) => None,
                })
                .collect();
            assert_eq!(names, vec!["item", "i"]);
        }

        #[test]
        fn should_parse_template_variables() {
            let nodes = parse_ok(r#"<ng-template let-row let-idx="index"></ng-template>"#);
            let tpl = element(&nodes[0]);
            assert!(tpl.is_ng_template());
            assert_eq!(tpl.variables[0].value, "$implicit");
            assert_eq!(tpl.variables[1].value, "index");
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn should_report_unterminated_interpolation() {
            let errors = messages("<p>{{ name </p>");
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("Unterminated interpolation"));
        }

        #[test]
        fn should_report_unexpected_closing_tags() {
            let errors = messages("<div></span></div>");
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("Unexpected closing tag \"span\""));
        }

        #[test]
        fn should_report_unterminated_tags() {
            let parsed = parse_template("<div [x]=\"a\"");
            assert_eq!(parsed.errors.len(), 1);
            assert_eq!(parsed.errors[0].msg, "Unexpected character \"EOF\"");
            assert_eq!(parsed.errors[0].span, AbsoluteSourceSpan::new(0, 12));
        }

        #[test]
        fn should_report_unterminated_attribute_values() {
            let errors = messages("<div title=\"abc></div>");
            assert_eq!(errors, vec!["Unexpected character \"EOF\"".to_string()]);
        }

        #[test]
        fn should_report_empty_bindings() {
            let errors = messages(r#"<button (click)="" [disabled]=""></button>"#);
            assert_eq!(
                errors,
                vec![
                    "Empty expressions are not allowed".to_string(),
                    "Empty expressions are not allowed".to_string(),
                ]
            );
        }

        #[test]
        fn should_report_expression_errors_with_template_spans() {
            let parsed = parse_template(r#"<b [x]="a b"></b>"#);
            assert_eq!(parsed.errors.len(), 1);
            assert_eq!(parsed.errors[0].span, AbsoluteSourceSpan::new(10, 11));
        }

        #[test]
        fn should_report_multiple_structural_directives() {
            let errors = messages(r#"<div *ngIf="a" *ngFor="let x of xs"></div>"#);
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("Can't have multiple template bindings"));
        }

        #[test]
        fn should_report_end_tags_on_void_elements() {
            let errors = messages("<input></input>");
            assert_eq!(errors, vec!["Void elements do not have end tags \"input\"".to_string()]);
        }
    }
}
