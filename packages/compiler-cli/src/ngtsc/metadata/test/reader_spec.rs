use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::metadata::{
    get_all_metadata, DecoratorMetadataReader, DecoratorShapeError, MetaKind, MetadataReader,
    TemplateDecl,
};
use crate::ngtsc::program_driver::SourceFile;
use crate::ngtsc::reflection::{ReflectionHost, TypeScriptReflectionHost};

fn source_file(text: &str) -> SourceFile {
    let path = AbsoluteFsPath::new("/app/cmp.ts".to_string());
    let module = TypeScriptReflectionHost::new().reflect_module(&path, text);
    SourceFile {
        path,
        text: text.to_string(),
        module,
    }
}

fn template_of(text: &str) -> Result<TemplateDecl, DecoratorShapeError> {
    let sf = source_file(text);
    let clazz = &sf.module.classes[0];
    DecoratorMetadataReader::new()
        .get_component_metadata(&sf, clazz)
        .expect("component metadata")
        .template
}

mod component {
    use super::*;

    #[test]
    fn should_read_an_inline_template_with_its_literal_span() {
        let text = "import {Component} from '@angular/core';\n@Component({selector: 'app-a', template: '<b></b>'})\nexport class A {}\n";
        match template_of(text) {
            Ok(TemplateDecl::Inline { text: template, span }) => {
                assert_eq!(template, "<b></b>");
                assert_eq!(&text[span.start as usize..span.end as usize], "'<b></b>'");
            }
            other => panic!("unexpected template: {:?}", other),
        }
    }

    #[test]
    fn should_prefer_template_url_over_template() {
        let text = "import {Component} from '@angular/core';\n@Component({template: 'x', templateUrl: './a.html'})\nexport class A {}\n";
        assert!(matches!(template_of(text), Ok(TemplateDecl::Url { ref url, .. }) if url == "./a.html"));
    }

    #[test]
    fn should_flag_non_literal_template_fields() {
        let text = "import {Component} from '@angular/core';\nconst url = './a.html';\n@Component({templateUrl: url})\nexport class A {}\n";
        assert!(matches!(
            template_of(text),
            Ok(TemplateDecl::NonLiteral { field: "templateUrl", .. })
        ));
    }

    #[test]
    fn should_report_a_missing_template() {
        let text = "import {Component} from '@angular/core';\n@Component({selector: 'app-a'})\nexport class A {}\n";
        assert_eq!(template_of(text), Ok(TemplateDecl::Missing));
    }

    #[test]
    fn should_report_decorator_shape_errors() {
        let text = "import {Component} from '@angular/core';\n@Component\nexport class A {}\n";
        assert!(matches!(template_of(text), Err(DecoratorShapeError::ArityWrong { arity: None, .. })));

        let text = "import {Component} from '@angular/core';\n@Component('x')\nexport class A {}\n";
        assert!(matches!(template_of(text), Err(DecoratorShapeError::ArgNotLiteral { .. })));
    }

    #[test]
    fn should_ignore_decorators_from_other_modules() {
        let sf = source_file("import {Component} from 'other-lib';\n@Component({template: ''})\nexport class A {}\n");
        let clazz = &sf.module.classes[0];
        assert!(DecoratorMetadataReader::new().get_component_metadata(&sf, clazz).is_none());
    }
}

mod directives_and_pipes {
    use super::*;

    #[test]
    fn should_collect_all_metadata_in_declaration_order() {
        let sf = source_file(
            "import {Component, Directive, Pipe} from '@angular/core';\n\
             @Pipe({name: 'shout', pure: false}) export class ShoutPipe {}\n\
             @Directive({selector: '[appHighlight]', exportAs: 'hl, highlight'}) export class Hl {}\n\
             @Component({template: ''}) export class Cmp {}\n\
             export class Plain {}\n",
        );
        let all = get_all_metadata(&DecoratorMetadataReader::new(), &sf);
        let kinds: Vec<MetaKind> = all.iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, vec![MetaKind::Pipe, MetaKind::Directive, MetaKind::Component]);

        let reader = DecoratorMetadataReader::new();
        let pipe = reader.get_pipe_metadata(&sf, &sf.module.classes[0]).unwrap();
        assert_eq!(pipe.pipe_name, "shout");
        assert!(!pipe.is_pure);

        let directive = reader.get_directive_metadata(&sf, &sf.module.classes[1]).unwrap();
        assert_eq!(directive.attribute_selectors, vec!["appHighlight".to_string()]);
        assert_eq!(directive.export_as, vec!["hl".to_string(), "highlight".to_string()]);
    }

    #[test]
    fn should_skip_pipes_without_a_literal_name() {
        let sf = source_file("import {Pipe} from '@angular/core';\nconst n = 'x';\n@Pipe({name: n}) export class P {}\n");
        let reader = DecoratorMetadataReader::new();
        assert!(reader.get_pipe_metadata(&sf, &sf.module.classes[0]).is_none());
    }
}
