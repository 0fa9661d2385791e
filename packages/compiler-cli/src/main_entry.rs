// Main Entry Point
//
// Command line handling for `ngc`.

use crate::config::read_configuration;
use crate::ngtsc::diagnostics::format_diagnostics;
use crate::ngtsc::file_system::{NodeJSFileSystem, PathManipulation};
use crate::ngtsc::logging::{init_tracing, LogLevel};
use crate::perform_compile::{exit_code_from_result, perform_compilation};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// The `ngc` command line.
pub fn command() -> Command {
    Command::new("ngc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Type-checks Angular component templates")
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PATH")
                .help("Path to tsconfig.json, or a directory containing one"),
        )
        .arg(
            Arg::new("strict-templates")
                .long("strict-templates")
                .action(ArgAction::SetTrue)
                .help("Report semantic template errors regardless of angularCompilerOptions"),
        )
        .arg(
            Arg::new("template-owners")
                .long("template-owners")
                .value_name("FILE")
                .help("Print the components whose templateUrl resolves to FILE"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["debug", "info", "warn", "error"])
                .default_value("warn")
                .help("Log verbosity; RUST_LOG takes precedence"),
        )
}

/// Run `ngc` with `args` (program name first). Diagnostics and errors go to
/// `stderr`, template owners to `stdout`. Returns the process exit code.
pub fn main_fn<I, O, E>(args: I, stdout: &mut O, stderr: &mut E) -> i32
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            let _ = write!(stderr, "{}", err);
            return err.exit_code();
        }
    };

    let level = matches
        .get_one::<String>("log-level")
        .and_then(|l| l.parse::<LogLevel>().ok())
        .unwrap_or_default();
    init_tracing(level);

    match run(&matches, stdout, stderr) {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(stderr, "error: {:#}", err);
            1
        }
    }
}

fn run<O: Write, E: Write>(matches: &ArgMatches, stdout: &mut O, stderr: &mut E) -> anyhow::Result<i32> {
    let project = matches
        .get_one::<String>("project")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tsconfig.json"));
    let mut config = read_configuration(&project)?;
    if matches.get_flag("strict-templates") {
        config.options.strict_templates = true;
    }

    let fs = NodeJSFileSystem::new();
    let template_file = matches
        .get_one::<String>("template-owners")
        .map(|file| fs.resolve(&[file.as_str()]));

    let result = perform_compilation(&fs, &config, template_file.as_ref(), None)?;

    if let Some(owners) = &result.template_owners {
        for owner in owners {
            writeln!(stdout, "{}", owner)?;
        }
    }
    if !result.diagnostics.is_empty() {
        write!(stderr, "{}", format_diagnostics(&result.diagnostics, &fs))?;
    }
    Ok(exit_code_from_result(&result.diagnostics))
}
