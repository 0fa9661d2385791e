// tsconfig.json
//
// Reads root files and `angularCompilerOptions` from a TypeScript project
// file on disk.

use crate::ngtsc::core::NgCompilerOptions;
use crate::ngtsc::file_system::AbsoluteFsPath;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot find a tsconfig.json at '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    angular_compiler_options: Option<RawAngularCompilerOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAngularCompilerOptions {
    strict_templates: Option<bool>,
}

/// Parsed configuration from tsconfig.json.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConfiguration {
    /// Path to the project file.
    pub project: PathBuf,
    pub root_names: Vec<AbsoluteFsPath>,
    pub options: NgCompilerOptions,
}

const DEFAULT_INCLUDE: &str = "**/*.ts";
const DEFAULT_EXCLUDE: &str = "node_modules/**";

/// Read `project`, a tsconfig.json or a directory containing one.
///
/// `files` lists roots explicitly; otherwise `include` globs (default
/// `**/*.ts`) are expanded, minus `exclude`. Paths are relative to the
/// project file's directory.
pub fn read_configuration(project: &Path) -> Result<ParsedConfiguration, ConfigError> {
    let tsconfig_path = if project.is_dir() {
        project.join("tsconfig.json")
    } else {
        project.to_path_buf()
    };
    if !tsconfig_path.is_file() {
        return Err(ConfigError::NotFound(tsconfig_path));
    }
    let tsconfig_path = tsconfig_path.canonicalize().map_err(|source| ConfigError::Io {
        path: tsconfig_path.clone(),
        source,
    })?;
    let content = std::fs::read_to_string(&tsconfig_path).map_err(|source| ConfigError::Io {
        path: tsconfig_path.clone(),
        source,
    })?;
    let raw: RawTsConfig =
        serde_json::from_str(&strip_json_comments(&content)).map_err(|source| ConfigError::Parse {
            path: tsconfig_path.clone(),
            source,
        })?;

    let base_dir = tsconfig_path.parent().unwrap_or_else(|| Path::new("/")).to_path_buf();
    let root_names = match &raw.files {
        Some(files) if !files.is_empty() => files
            .iter()
            .map(|file| AbsoluteFsPath::from(normalize_path(&base_dir.join(file))))
            .collect(),
        _ => {
            let include = raw
                .include
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()]);
            let exclude = raw
                .exclude
                .clone()
                .unwrap_or_else(|| vec![DEFAULT_EXCLUDE.to_string()]);
            discover_files(&base_dir, &include, &exclude)?
        }
    };

    let options = NgCompilerOptions {
        strict_templates: raw
            .angular_compiler_options
            .and_then(|o| o.strict_templates)
            .unwrap_or(false),
    };
    tracing::debug!(project = %tsconfig_path.display(), roots = root_names.len(), ?options, "read configuration");

    Ok(ParsedConfiguration {
        project: tsconfig_path,
        root_names,
        options,
    })
}

/// Remove `//` and `/* */` comments outside string literals.
fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(ch),
        }
    }
    out
}

/// TypeScript sources matching `include` and no `exclude` pattern, sorted
/// and without duplicates.
fn discover_files(base_dir: &Path, include: &[String], exclude: &[String]) -> Result<Vec<AbsoluteFsPath>, ConfigError> {
    let excluded = exclude
        .iter()
        .map(|pattern| {
            let full = base_dir.join(pattern).to_string_lossy().into_owned();
            glob::Pattern::new(&full).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut files: Vec<PathBuf> = Vec::new();
    for pattern in include {
        let full = base_dir.join(pattern).to_string_lossy().into_owned();
        let paths = glob::glob(&full).map_err(|source| ConfigError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable path");
                    continue;
                }
            };
            let is_source = path.extension().map_or(false, |ext| ext == "ts")
                && !path.to_string_lossy().ends_with(".d.ts");
            if !is_source || !path.is_file() {
                continue;
            }
            if excluded.iter().any(|p| p.matches_path(&path)) {
                continue;
            }
            files.push(path);
        }
    }
    files.sort();
    files.dedup();
    Ok(files.iter().map(|p| AbsoluteFsPath::from(normalize_path(p))).collect())
}

/// Drop `.` segments and fold `..` segments without touching the disk.
fn normalize_path(path: &Path) -> PathBuf {
    use std::path::Component;
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// A fresh directory under the system temp dir, removed on drop.
    struct TempProject {
        root: PathBuf,
    }

    impl TempProject {
        fn new(name: &str) -> Self {
            let root = std::env::temp_dir().join(format!("ngc-config-{}-{}", name, std::process::id()));
            let _ = fs::remove_dir_all(&root);
            fs::create_dir_all(&root).unwrap();
            TempProject {
                root: root.canonicalize().unwrap(),
            }
        }

        fn write(&self, path: &str, content: &str) {
            let full = self.root.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }

        fn abs(&self, path: &str) -> AbsoluteFsPath {
            AbsoluteFsPath::from(self.root.join(path))
        }
    }

    impl Drop for TempProject {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    mod read_configuration_tests {
        use super::*;

        #[test]
        fn should_read_files_and_strict_templates() {
            let project = TempProject::new("files");
            project.write(
                "tsconfig.json",
                r#"{
                    // explicit roots
                    "files": ["./src/cmp.ts"],
                    /* Angular options */
                    "angularCompilerOptions": {"strictTemplates": true}
                }"#,
            );
            project.write("src/cmp.ts", "export class Cmp {}");

            let config = read_configuration(&project.root.join("tsconfig.json")).unwrap();
            assert_eq!(config.root_names, vec![project.abs("src/cmp.ts")]);
            assert!(config.options.strict_templates);
        }

        #[test]
        fn should_expand_include_globs_and_skip_excluded_files() {
            let project = TempProject::new("include");
            project.write(
                "tsconfig.json",
                r#"{"include": ["src/**/*"], "exclude": ["src/legacy/**"]}"#,
            );
            project.write("src/b.ts", "");
            project.write("src/a/a.ts", "");
            project.write("src/a/a.html", "");
            project.write("src/types.d.ts", "");
            project.write("src/legacy/old.ts", "");

            let config = read_configuration(&project.root).unwrap();
            assert_eq!(
                config.root_names,
                vec![project.abs("src/a/a.ts"), project.abs("src/b.ts")]
            );
            assert!(!config.options.strict_templates);
        }

        #[test]
        fn should_default_to_every_typescript_file_outside_node_modules() {
            let project = TempProject::new("defaults");
            project.write("tsconfig.json", "{}");
            project.write("main.ts", "");
            project.write("node_modules/lib/index.ts", "");

            let config = read_configuration(&project.root).unwrap();
            assert_eq!(config.root_names, vec![project.abs("main.ts")]);
        }

        #[test]
        fn should_report_missing_and_malformed_projects() {
            let project = TempProject::new("errors");
            assert!(matches!(
                read_configuration(&project.root),
                Err(ConfigError::NotFound(_))
            ));

            project.write("tsconfig.json", "{\"files\": [");
            assert!(matches!(
                read_configuration(&project.root),
                Err(ConfigError::Parse { .. })
            ));
        }
    }

    mod strip_json_comments_tests {
        use super::*;

        #[test]
        fn should_keep_comment_markers_inside_strings() {
            let stripped = strip_json_comments("{\"a\": \"http://x/*y*/\" // trailing\n}");
            assert_eq!(stripped, "{\"a\": \"http://x/*y*/\" \n}");
        }
    }
}
