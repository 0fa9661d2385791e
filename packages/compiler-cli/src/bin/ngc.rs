/**
 * Angular Compiler CLI - ngc (ng compiler)
 *
 * Type-checks the component templates of a TypeScript project.
 */
use angular_compiler_cli::main_entry::main_fn;
use std::process;

fn main() {
    let code = main_fn(std::env::args_os(), &mut std::io::stdout(), &mut std::io::stderr());
    process::exit(code);
}
