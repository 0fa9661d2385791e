use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::reflection::{
    ClassMemberAccessLevel, ClassMemberKind, InitializerKind, ReflectedModule, ReflectionHost,
    StaticValue, TypeScriptReflectionHost,
};

fn reflect(source: &str) -> ReflectedModule {
    let host = TypeScriptReflectionHost::new();
    let module = host.reflect_module(&AbsoluteFsPath::new("/test.ts".to_string()), source);
    assert!(module.parse_errors.is_empty(), "Parse errors: {:?}", module.parse_errors);
    module
}

mod classes {
    use super::*;

    #[test]
    fn should_find_exported_and_local_classes() {
        let module = reflect(
            r#"
            class Local {}
            export class Exported {}
            class Later {}
            export { Later };
            export default class Default {}
        "#,
        );
        let names: Vec<(&str, bool)> = module
            .classes
            .iter()
            .map(|c| (c.name.as_str(), c.exported))
            .collect();
        assert_eq!(
            names,
            vec![("Local", false), ("Exported", true), ("Later", true), ("Default", true)]
        );
    }

    #[test]
    fn should_record_the_base_class_identifier() {
        let module = reflect("class Base {}\nclass Sub extends Base {}");
        let host = TypeScriptReflectionHost::new();
        let sub = module.get_class("Sub").unwrap();
        assert!(host.has_base_class(sub));
        assert_eq!(sub.base_class.as_deref(), Some("Base"));
        assert!(!host.has_base_class(module.get_class("Base").unwrap()));
    }

    #[test]
    fn should_record_imports_and_re_exports() {
        let module = reflect(
            r#"
            import {Component as Cmp} from '@angular/core';
            import Default from './default';
            import * as ns from './ns';
            export {Base as Renamed} from './base';
        "#,
        );
        let cmp = module.get_import("Cmp").unwrap();
        assert_eq!(cmp.imported_name, "Component");
        assert_eq!(cmp.from, "@angular/core");
        assert_eq!(module.get_import("Default").unwrap().imported_name, "default");
        assert_eq!(module.get_import("ns").unwrap().imported_name, "*");
        assert_eq!(module.re_exports.len(), 1);
        assert_eq!(module.re_exports[0].0, "Renamed");
        assert_eq!(module.re_exports[0].1.imported_name, "Base");
    }
}

mod decorators {
    use super::*;

    #[test]
    fn should_read_literal_decorator_arguments() {
        let source = r#"
            import {Component} from '@angular/core';
            @Component({
              selector: 'test-cmp',
              templateUrl: './test.html',
              standalone: true,
              imports: [Foo],
            })
            export class Cmp {}
        "#;
        let module = reflect(source);
        let cmp = module.get_class("Cmp").unwrap();
        assert_eq!(cmp.decorators.len(), 1);
        let decorator = &cmp.decorators[0];
        assert_eq!(decorator.name, "Component");
        assert_eq!(decorator.import.as_ref().unwrap().from, "@angular/core");

        let args = decorator.args.as_ref().unwrap();
        let meta = args[0].as_object().unwrap();
        assert_eq!(meta["selector"].as_str(), Some("test-cmp"));
        assert_eq!(meta["standalone"], StaticValue::Bool(true));
        match &meta["templateUrl"] {
            StaticValue::String { value, span } => {
                assert_eq!(value, "./test.html");
                assert_eq!(&source[span.start as usize..span.end as usize], "'./test.html'");
            }
            other => panic!("unexpected {:?}", other),
        }
        match &meta["imports"] {
            StaticValue::Array(items) => assert!(matches!(items[0], StaticValue::Dynamic { .. })),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn should_treat_substitution_free_template_literals_as_strings() {
        let module = reflect("@Component({template: `<b>{{x}}</b>`, styles: TPL + 1}) class Cmp {}");
        let meta = module.classes[0].decorators[0].args.as_ref().unwrap()[0].clone();
        let meta = meta.as_object().unwrap();
        assert_eq!(meta["template"].as_str(), Some("<b>{{x}}</b>"));
        assert!(matches!(meta["styles"], StaticValue::Dynamic { .. }));
    }

    #[test]
    fn should_read_decorators_without_a_call() {
        let module = reflect("@Injectable class Svc {}");
        let decorator = &module.classes[0].decorators[0];
        assert_eq!(decorator.name, "Injectable");
        assert!(decorator.args.is_none());
        assert!(decorator.import.is_none());
    }
}

mod members {
    use super::*;

    #[test]
    fn should_read_member_shapes() {
        let module = reflect(
            r#"
            class Cmp {
              title: string = 'x';
              count = 0;
              items = [1, 2];
              optional?: number;
              readonly fixed = true;
              private secret = 'a';
              protected guarded: number;
              #hidden = 1;
              static shared = 1;
              onClick = (event: MouseEvent): void => {};
              get label(): string { return ''; }
              greet(name: string, suffix?: string, ...rest: string[]): string { return name; }
            }
        "#,
        );
        let cmp = module.get_class("Cmp").unwrap();
        let member = |name: &str| cmp.members.iter().find(|m| m.name == name).unwrap();

        assert_eq!(member("title").type_text.as_deref(), Some("string"));
        assert_eq!(member("count").initializer, Some(InitializerKind::Number));
        assert_eq!(member("items").initializer, Some(InitializerKind::Array));
        assert!(member("optional").optional);
        assert_eq!(member("fixed").access_level, ClassMemberAccessLevel::PublicReadonly);
        assert_eq!(member("secret").access_level, ClassMemberAccessLevel::Private);
        assert_eq!(member("guarded").access_level, ClassMemberAccessLevel::Protected);
        assert_eq!(member("hidden").access_level, ClassMemberAccessLevel::EcmaScriptPrivate);
        assert!(member("shared").is_static);

        let on_click = member("onClick");
        assert_eq!(on_click.initializer, Some(InitializerKind::Function));
        assert_eq!(on_click.parameters[0].type_text.as_deref(), Some("MouseEvent"));
        assert_eq!(on_click.return_type.as_deref(), Some("void"));

        let label = member("label");
        assert_eq!(label.kind, ClassMemberKind::Getter);
        assert_eq!(label.type_text.as_deref(), Some("string"));

        let greet = member("greet");
        assert_eq!(greet.kind, ClassMemberKind::Method);
        assert_eq!(greet.parameters.len(), 3);
        assert!(!greet.parameters[0].optional);
        assert!(greet.parameters[1].optional);
        assert!(greet.parameters[2].rest);
        assert_eq!(greet.return_type.as_deref(), Some("string"));
    }

    #[test]
    fn should_read_constructor_parameter_properties() {
        let module = reflect(
            r#"
            class Cmp {
              constructor(public name: string, private readonly svc: Service, plain: number) {}
            }
        "#,
        );
        let cmp = module.get_class("Cmp").unwrap();
        let names: Vec<&str> = cmp.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["name", "svc", "constructor"]);
        assert_eq!(cmp.members[0].access_level, ClassMemberAccessLevel::PublicWritable);
        assert_eq!(cmp.members[1].access_level, ClassMemberAccessLevel::Private);
        assert_eq!(cmp.members[2].kind, ClassMemberKind::Constructor);
    }
}
