//! Build command gate CLI entrypoint.
//!
//! Reads one inline-signed build request from standard input and, if it
//! validates, writes the canonical signature and the command line to the two
//! paths given on the command line. Any failure prints a single diagnostic
//! line and exits with status 1.

use build_command_gate::cli::Cli;
use build_command_gate::driver;
use build_command_gate::error::Result;
use clap::Parser;
use std::io::Write;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = driver::run(&cli, std::io::stdin().lock(), &mut stderr).map(|_| ());
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
