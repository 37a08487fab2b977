//! pdfcombine - Combine, reorder, subset and rotate pages of PDF files.

use clap::{CommandFactory, Parser};
use std::process;

use pdfcombine::cli::Cli;
use pdfcombine::config::Config;
use pdfcombine::error::PdfCombineError;
use pdfcombine::logging::init_logger;
use pdfcombine::merge::Combiner;
use pdfcombine::output::{OutputFormatter, display_combine_result, display_plan, plan_to_json};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if cli.wants_help() {
        let _ = Cli::command().print_help();
        return;
    }

    init_logger(cli.verbose, cli.quiet);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), PdfCombineError> {
    let config = Config::try_from(&cli)?;
    let formatter = OutputFormatter::from_config(&config);

    if config.dry_run {
        formatter.info("DRY RUN MODE - no files will be written");
    }
    formatter.debug(&format!("{} v{}", pdfcombine::NAME, pdfcombine::VERSION));
    formatter.info(&format!(
        "Combining {} input(s) into {}",
        config.inputs.len(),
        config.output.display()
    ));

    let result = Combiner::new().combine(&config).await?;

    if config.dry_run {
        if config.json {
            println!("{}", plan_to_json(&result.plan)?);
        } else {
            display_plan(&formatter, &result.plan);
        }
        if result.plan.is_empty() && !config.json {
            formatter.warning("The plan selects no pages; a real run would fail");
        }
    }

    display_combine_result(&formatter, &result);

    Ok(())
}
