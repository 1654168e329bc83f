use crate::EXIT_CONFIG_ERROR;
use crate::cli::{Cli, ValidateArgs};
use crate::engine::{ValidateOptions, validate};
use crate::error::Result;
use crate::report::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, Summary, TextFormatter,
};

/// Notice printed to stderr when `--fix` is passed.
pub const FIX_NOT_IMPLEMENTED: &str = "--fix is not implemented yet; no files were modified";

#[must_use]
pub fn run_validate(args: &ValidateArgs, cli: &Cli) -> i32 {
    match run_validate_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates the project at `args.path` and prints the report.
///
/// # Errors
/// Returns an error if the report cannot be rendered.
pub fn run_validate_impl(args: &ValidateArgs, cli: &Cli) -> Result<i32> {
    if args.fix {
        eprintln!("{FIX_NOT_IMPLEMENTED}");
    }

    // A missing root is reported by the engine as a missing contract.
    let root = dunce::canonicalize(&args.path).unwrap_or_else(|_| args.path.clone());
    let options = ValidateOptions {
        exclude: args.exclude.clone(),
    };
    let summary = validate(&root, &options);

    let output = format_output(args.format, &summary, cli.color.into(), cli.verbose)?;
    if !cli.quiet {
        print!("{output}");
    }
    Ok(summary.exit_code())
}

/// Render `summary` in the requested format.
///
/// # Errors
/// Returns an error if the formatter fails.
pub fn format_output(
    format: OutputFormat,
    summary: &Summary,
    color_mode: ColorMode,
    verbose: u8,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(summary),
        OutputFormat::Json => JsonFormatter.format(summary),
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
