// twain: side-by-side file comparison from the command line.
// Reads two files, runs the configured diff program, aligns the result and
// prints it as JSON or as a text listing.

mod compare;
mod render;
mod settings;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use settings::{OutputFormat, TwainSettings};

#[derive(Parser, Debug)]
#[command(name = "twain", version, about = "Render two text files side by side")]
struct Cli {
    /// Settings file to use instead of the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Align two files and print the side-by-side view.
    Compare {
        from: PathBuf,
        to: PathBuf,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Diff program to run (must support unified output).
        #[arg(long)]
        diff_program: Option<String>,
        /// Argument passed to the diff program; repeat for several.
        #[arg(long = "diff-arg", allow_hyphen_values = true)]
        diff_args: Vec<String>,
        /// Maximum width of the from column in text output.
        #[arg(long)]
        width: Option<usize>,
    },
    /// Print a single file's lines as JSON.
    View { file: PathBuf },
}

// ──────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings: TwainSettings = match &cli.config {
        Some(path) => settings::load_settings_from(path),
        None => settings::load_settings(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Compare { from, to, format, diff_program, diff_args, width } => {
            if let Some(program) = diff_program {
                settings.diff.program = program;
            }
            if !diff_args.is_empty() {
                settings.diff.args = diff_args;
            }
            if let Some(format) = format {
                settings.render.format = format;
            }
            if let Some(width) = width {
                settings.render.column_width = width;
            }

            let oracle = settings.diff.oracle();
            let view = compare::compare(&from, &to, &oracle).with_context(|| {
                format!("failed to compare {} with {}", from.display(), to.display())
            })?;

            match settings.render.format {
                OutputFormat::Json => {
                    let payload = compare::ComparePayload::from(view);
                    serde_json::to_writer(&mut out, &payload)?;
                    writeln!(out)?;
                }
                OutputFormat::Text => {
                    out.write_all(render::render_text(&view, settings.render.column_width).as_bytes())?;
                }
            }
        }
        Command::View { file } => {
            let payload = compare::view(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            serde_json::to_writer(&mut out, &payload)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

// ──────────────────────────────────────────────
// Entry point
// ──────────────────────────────────────────────

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        eprintln!("twain: {e:#}");
        std::process::exit(1);
    }
}
