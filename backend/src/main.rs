//! numgroup CLI - rearrange lines into grouped triplets
//!
//! # Commands
//!
//! ```bash
//! numgroup generate input.txt -m 3          # Print grouped output
//! cat input.txt | numgroup generate -m 3    # Read from stdin
//! numgroup generate input.txt -m 3 -o out   # Write output to a file
//! numgroup check input.txt -m 3             # Validate only, show counts
//! numgroup serve                            # Start HTTP server (port 3000)
//! ```

use clap::{Parser, Subcommand};
use numgroup::{
    api::logs::LOG_BROADCASTER, check_text, decode_with, ensure_size, generate_bytes,
    parse_group_size, read_input, Settings,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "numgroup")]
#[command(about = "Rearrange lines into grouped triplets by group size", long_about = None)]
struct Cli {
    /// Suppress progress logs on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rearrange lines and print the result
    Generate {
        /// Input text file (default: stdin)
        input: Option<PathBuf>,

        /// Lines per group (M)
        #[arg(short = 'm', long = "group-size", allow_hyphen_values = true)]
        group_size: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input encoding (auto-detect if not specified)
        #[arg(short, long)]
        encoding: Option<String>,
    },

    /// Check that the input can be grouped, without producing output
    Check {
        /// Input text file (default: stdin)
        input: Option<PathBuf>,

        /// Lines per group (M)
        #[arg(short = 'm', long = "group-size", allow_hyphen_values = true)]
        group_size: String,

        /// Input encoding (auto-detect if not specified)
        #[arg(short, long)]
        encoding: Option<String>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: NUMGROUP_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::from_env();
    LOG_BROADCASTER.set_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Generate {
            input,
            group_size,
            output,
            encoding,
        } => cmd_generate(
            input.as_deref(),
            &group_size,
            output.as_deref(),
            encoding.as_deref(),
            &settings,
        ),

        Commands::Check {
            input,
            group_size,
            encoding,
        } => cmd_check(input.as_deref(), &group_size, encoding.as_deref(), &settings),

        Commands::Serve { port } => cmd_serve(settings.with_port(port)).await,
    };

    std::process::exit(exit_code(&result));
}

/// Process exit status for a command result, reporting any error on stderr.
fn exit_code(result: &Result<(), Box<dyn std::error::Error>>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            1
        }
    }
}

fn cmd_generate(
    input: Option<&Path>,
    group_size: &str,
    output: Option<&Path>,
    encoding: Option<&str>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let m = parse_group_size(group_size)?;
    let bytes = read_input(input)?;
    ensure_size(bytes.len(), settings.max_input_bytes)?;

    let result = generate_bytes(&bytes, m, encoding)?;
    write_output(&result.output, output)?;

    Ok(())
}

fn cmd_check(
    input: Option<&Path>,
    group_size: &str,
    encoding: Option<&str>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let m = parse_group_size(group_size)?;
    let bytes = read_input(input)?;
    ensure_size(bytes.len(), settings.max_input_bytes)?;

    let decoded = decode_with(&bytes, encoding)?;
    let stats = check_text(&decoded.text, m)?;

    println!("Encoding:        {}", decoded.encoding);
    println!("Input lines:     {}", stats.input_lines);
    println!("Non-empty lines: {}", stats.non_empty_lines);
    println!("Groups:          {}", stats.groups);
    println!("Output lines:    {}", stats.output_lines);

    Ok(())
}

async fn cmd_serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    numgroup::server::start_server(settings).await?;
    Ok(())
}

/// Write output exactly as produced; no trailing newline is added.
fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    write_output_to(content, path, std::io::stdout().lock())
}

/// Write `content` to `path`, or to `out` when no path is given.
fn write_output_to<W: Write>(
    content: &str,
    path: Option<&Path>,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() {
        LOG_BROADCASTER.set_quiet(true);
    }

    #[test]
    fn test_write_output_to_stdout_writer() {
        let mut out = Vec::new();
        write_output_to("a\nc\n\nb\nc\n", None, &mut out).unwrap();
        assert_eq!(out, b"a\nc\n\nb\nc\n");

        let mut out = Vec::new();
        write_output_to("", None, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut unused = Vec::new();

        write_output_to("1\n2\n", Some(&path), &mut unused).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n");
        assert!(unused.is_empty());
    }

    #[test]
    fn test_generate_writes_file_without_trailing_newline() {
        quiet();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "a\nb\nc").unwrap();

        cmd_generate(Some(&input), "3", Some(&output), None, &Settings::default()).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "a\nc\n\nb\nc\n");
    }

    #[test]
    fn test_exit_code() {
        quiet();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "1\n2\n3\n4").unwrap();

        let rejected = cmd_generate(Some(&input), "3", Some(&output), None, &Settings::default());
        assert_eq!(exit_code(&rejected), 1);
        assert!(!output.exists());

        let bad_m = cmd_check(Some(&input), "three", None, &Settings::default());
        assert_eq!(exit_code(&bad_m), 1);

        let ok = cmd_generate(Some(&input), "2", Some(&output), None, &Settings::default());
        assert_eq!(exit_code(&ok), 0);
    }

    #[test]
    fn test_oversized_input_fails() {
        quiet();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "1\n2\n").unwrap();

        let settings = Settings { max_input_bytes: 2, ..Settings::default() };
        let result = cmd_generate(Some(&input), "2", None, None, &settings);
        assert_eq!(exit_code(&result), 1);
    }

    #[test]
    fn test_negative_group_size_parses() {
        let cli = Cli::try_parse_from(["numgroup", "generate", "-m", "-3"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate { ref group_size, .. } if group_size == "-3"));

        let cli = Cli::try_parse_from(["numgroup", "-q", "check", "in.txt", "--group-size", "4"]).unwrap();
        assert!(cli.quiet);
    }
}
