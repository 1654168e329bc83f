use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};

use crate::cli::{Cli, InitArgs};
use crate::config::Mode;
use crate::error::Result;
use crate::language::LanguageRegistry;
use crate::scaffold::{DEFAULT_LANGUAGE, Scaffold};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args, cli.quiet) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Writes a new contract and agent README into `args.path`.
///
/// # Errors
/// Returns an error if a file already exists (without --force), a prompt
/// fails, or a file cannot be written.
pub fn run_init_impl(args: &InitArgs, quiet: bool) -> Result<()> {
    let interactive = !args.yes && std::io::stdin().is_terminal();
    let scaffold = resolve_scaffold(args, interactive)?;

    for path in scaffold.write(&args.path, args.force)? {
        if !quiet {
            println!("Created {}", path.display());
        }
    }
    Ok(())
}

/// Combine flags with prompted answers; prompts only run when `interactive`
/// and the value was not given on the command line.
///
/// # Errors
/// Returns an error if a prompt fails.
pub fn resolve_scaffold(args: &InitArgs, interactive: bool) -> Result<Scaffold> {
    let languages = if !args.languages.is_empty() || !interactive {
        args.languages.clone()
    } else {
        prompt_languages()?
    };

    let mode = match args.mode {
        Some(mode) => mode,
        None if interactive => prompt_mode()?,
        None => Mode::default(),
    };

    Ok(Scaffold::new(languages, mode))
}

fn prompt_languages() -> Result<Vec<String>> {
    let registry = LanguageRegistry::default();
    let names: Vec<&str> = registry.all().iter().map(|l| l.name.as_str()).collect();
    let defaults: Vec<bool> = names.iter().map(|n| *n == DEFAULT_LANGUAGE).collect();

    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Languages used in this project")
        .items(&names)
        .defaults(&defaults)
        .interact()?;

    Ok(chosen.into_iter().map(|i| names[i].to_string()).collect())
}

fn prompt_mode() -> Result<Mode> {
    let modes = [Mode::Strict, Mode::Lite];
    let labels: Vec<&str> = modes.iter().map(|m| m.as_str()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Enforcement mode")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(modes[selection])
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
