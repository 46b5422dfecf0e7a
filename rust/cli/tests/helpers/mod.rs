//! Shared runner for the integration tests: drives `run_with_input` with
//! in-memory streams and captures the result.

use std::io::Cursor;

pub struct CliOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_cli(args: &[&str], input: &str) -> CliOutput {
    let mut argv = vec!["holdem"];
    argv.extend_from_slice(args);
    let mut input = Cursor::new(input.to_string());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run_with_input(argv, &mut input, &mut out, &mut err);
    CliOutput {
        code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Sum of the stack column printed under "Final stacks:" or after
/// "Hands played:".
#[allow(dead_code)]
pub fn listed_stacks(stdout: &str, header: &str) -> u64 {
    stdout
        .lines()
        .skip_while(|l| !l.starts_with(header))
        .skip(1)
        .take_while(|l| l.starts_with("  "))
        .filter_map(|l| l.split_whitespace().last())
        .filter_map(|v| v.parse::<u64>().ok())
        .sum()
}
