use clap::Parser;
use codeagg::{
    AggregateError, Cli, CodeAgg, FileFilter, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    if cli.list_extensions {
        return handle_list_extensions();
    }

    let codeagg = match CodeAgg::from_cli(&cli) {
        Ok(codeagg) => codeagg,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let Some(root) = cli.root.as_deref() else {
        codeagg
            .output_formatter()
            .error("A root directory is required");
        return 1;
    };

    if cli.dry_run {
        return handle_dry_run(&codeagg, root);
    }

    let output = cli.resolve_output_path(codeagg.config());

    match codeagg.aggregate(root, &output) {
        Ok(report) => {
            codeagg.output_formatter().print_aggregation_report(&report);

            if report.has_issues() {
                2 // Success with warnings
            } else {
                0
            }
        }
        Err(e) => {
            codeagg.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &AggregateError) -> i32 {
    match error {
        AggregateError::RootNotFound { .. } => 3,
        AggregateError::RootNotDirectory { .. } | AggregateError::RootUnreadable { .. } => 4,
        AggregateError::OutputFile { .. } | AggregateError::OutputWrite { .. } => 5,
        AggregateError::Config { .. } => 6,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "codeagg.toml".to_string());

    match CodeAgg::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  codeagg <root> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_list_extensions() -> i32 {
    for ext in FileFilter::new().get_extensions() {
        println!(".{}", ext);
    }
    0
}

fn handle_dry_run(codeagg: &CodeAgg, root: &std::path::Path) -> i32 {
    let formatter = codeagg.output_formatter();

    formatter.info("DRY RUN MODE - no output file will be written");

    match codeagg.plan(root) {
        Ok(files) => {
            formatter.print_header(&format!("{} files would be aggregated", files.len()));
            formatter.print_plan(&files);
            0
        }
        Err(e) => {
            codeagg.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn print_startup_error(error: &AggregateError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
