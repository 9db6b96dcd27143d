use std::process::{Command, ExitCode};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for expecto")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo fmt --check
    Fmt,
    /// Run cargo check
    Check,
    /// Run cargo clippy
    Clippy,
    /// Run cargo test
    Test {
        /// Extra arguments passed to the test binaries
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Run the property tests with more cases
    Props {
        /// Number of cases per property
        #[arg(long, default_value_t = 2048)]
        cases: u32,
    },
    /// Build the API docs, failing on broken links
    Doc,
    /// Run all CI checks (fmt, check, clippy, test, doc)
    Ci,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Fmt => cmd_fmt(),
        Commands::Check => cmd_check(),
        Commands::Clippy => cmd_clippy(),
        Commands::Test { args } => cmd_test(&args),
        Commands::Props { cases } => cmd_props(cases),
        Commands::Doc => cmd_doc(),
        Commands::Ci => cmd_ci(),
    }
}

fn cmd_fmt() -> Result<()> {
    cargo(&["fmt", "--all", "--check"], &[])
}

fn cmd_check() -> Result<()> {
    cargo(&["check", "--workspace", "--all-targets"], &[])
}

fn cmd_clippy() -> Result<()> {
    cargo(
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        &[],
    )
}

fn cmd_test(args: &[String]) -> Result<()> {
    let mut cmd_args = vec!["test", "--workspace"];
    if !args.is_empty() {
        cmd_args.push("--");
        cmd_args.extend(args.iter().map(String::as_str));
    }
    cargo(&cmd_args, &[])
}

fn cmd_props(cases: u32) -> Result<()> {
    let cases = cases.to_string();
    cargo(
        &["test", "-p", "expecto-core", "--test", "integration_tests", "prop_"],
        &[("PROPTEST_CASES", cases.as_str())],
    )
}

fn cmd_doc() -> Result<()> {
    cargo(
        &["doc", "--workspace", "--no-deps"],
        &[("RUSTDOCFLAGS", "-D warnings")],
    )
}

fn cmd_ci() -> Result<()> {
    cmd_fmt()?;
    cmd_check()?;
    cmd_clippy()?;
    cmd_test(&[])?;
    cmd_doc()?;
    Ok(())
}

fn cargo(args: &[&str], envs: &[(&str, &str)]) -> Result<()> {
    exec("cargo", args, envs)
}

fn exec(program: &str, args: &[&str], envs: &[(&str, &str)]) -> Result<()> {
    let cmd_line = format!("{program} {}", args.join(" "));
    eprintln!("$ {cmd_line}");

    let status = Command::new(program)
        .args(args)
        .envs(envs.iter().copied())
        .status()
        .with_context(|| format!("Failed to execute: {cmd_line}"))?;

    if !status.success() {
        let code_info = match status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        bail!("{cmd_line}: {code_info}");
    }
    Ok(())
}
