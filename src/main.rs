/*!
 * Command-line interface for mdclip
 */

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use mdclip::config::{Args, Config, FileSettings};
use mdclip::orchestrator::CopyOrchestrator;
use mdclip::report::Reporter;
use mdclip::utils::count_files;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "mdclip", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> mdclip::Result<()> {
    let file_settings = FileSettings::load(args.config.as_deref())?;
    let config = Config::resolve(args, &file_settings);
    config.validate()?;

    let progress = build_progress(&config);

    let mut orchestrator = CopyOrchestrator::new(config.clone(), progress.clone());
    let report = orchestrator.run()?;

    progress.finish_and_clear();

    // Keep stdout clean when the document itself went there
    if !config.to_stdout {
        Reporter::new().print_report(&report);
        println!(
            "Copied {} file(s) to clipboard.",
            report.text_files + report.binary_files
        );
    }

    Ok(())
}

fn build_progress(config: &Config) -> ProgressBar {
    // No progress chatter when the document goes to stdout
    if config.to_stdout {
        return ProgressBar::hidden();
    }

    let total: u64 = config
        .targets
        .iter()
        .map(|target| {
            if target.is_dir() {
                count_files(target, config)
            } else {
                1
            }
        })
        .sum();

    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Copying");
    progress
}
