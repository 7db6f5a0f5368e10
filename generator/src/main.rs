//! DejaVu font package generator entrypoint.
//!
//! Downloads (or opens) the DejaVu TTF release archive and writes one Rust
//! package per font under the output directory.

use clap::Parser;
use dejavu_gen::cli::Cli;
use dejavu_gen::error::{Result, error_chain};
use dejavu_gen::logging;
use dejavu_gen::pipeline::{RunSummary, generate};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level());
    let mut stderr = std::io::stderr();
    let run_result = run(&cli);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let config = cli.generation_config();
    generate(&config)
}

fn exit_code_for_run_result(result: Result<RunSummary>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("dejavu-gen: {}", error_chain(&err)));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
