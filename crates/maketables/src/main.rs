use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use precomp::{write_sprite_tables, TableGenConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUT_DIR: &str = "assets/generated";

#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    Generate { out_dir: PathBuf },
    ShowHelp,
}

fn main() -> ExitCode {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let out_dir = match parse_args(&args) {
        Ok(Invocation::Generate { out_dir }) => out_dir,
        Ok(Invocation::ShowHelp) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    init_tracing();
    info!("=== X16 Sprite Table Generator ===");

    if let Err(err) = write_sprite_tables(&out_dir, &TableGenConfig::default()) {
        error!(error = %err, "generation_failed");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    if args.is_empty() {
        return Ok(Invocation::Generate { out_dir: PathBuf::from(DEFAULT_OUT_DIR) });
    }
    if args.len() > 1 {
        return Err(format!("expected at most one output directory\n\n{}", usage_text()));
    }

    let arg = args[0].as_str();
    if arg == "-h" || arg == "--help" {
        return Ok(Invocation::ShowHelp);
    }
    if arg.starts_with('-') {
        return Err(format!("unknown option '{arg}'\n\n{}", usage_text()));
    }
    Ok(Invocation::Generate { out_dir: PathBuf::from(arg) })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    println!("{}", usage_text());
}

fn usage_text() -> String {
    [
        "maketables - sprite path and pixel collision table generator",
        "",
        "Usage:",
        "  maketables [out_dir]",
        "",
        "Writes sprite_paths.asm, sprite_hits.asm, and tables.manifest.json",
        "into out_dir. Every run recomputes the tables from compile-time",
        "constants and replaces the files.",
        "",
        "Defaults:",
        "  out_dir assets/generated",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, String> {
        let owned = args.iter().map(ToString::to_string).collect::<Vec<_>>();
        parse_args(&owned)
    }

    #[test]
    fn no_args_lands_in_the_default_directory() {
        assert_eq!(
            parse(&[]),
            Ok(Invocation::Generate { out_dir: PathBuf::from(DEFAULT_OUT_DIR) })
        );
    }

    #[test]
    fn one_arg_picks_the_output_directory() {
        assert_eq!(
            parse(&["build/tables"]),
            Ok(Invocation::Generate { out_dir: PathBuf::from("build/tables") })
        );
    }

    #[test]
    fn help_flags_short_circuit_generation() {
        assert_eq!(parse(&["-h"]), Ok(Invocation::ShowHelp));
        assert_eq!(parse(&["--help"]), Ok(Invocation::ShowHelp));
    }

    #[test]
    fn unknown_options_are_usage_errors() {
        let err = parse(&["--fast"]).expect_err("unknown option");
        assert!(err.contains("unknown option '--fast'"));
        assert!(err.contains("Usage:"));
    }

    #[test]
    fn extra_arguments_are_usage_errors() {
        let err = parse(&["a", "b"]).expect_err("two directories");
        assert!(err.contains("at most one output directory"));
    }
}
