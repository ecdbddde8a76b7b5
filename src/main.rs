//! Candidate ranker: rank a candidate pool against a job requirement

use candidate_ranker::cli::{self, Cli, Commands, ConfigAction};
use candidate_ranker::config::Config;
use candidate_ranker::error::{RankerError, Result};
use candidate_ranker::input::InputManager;
use candidate_ranker::output::formatter::{
    resolve_save_path, save_report_to_file, ConsoleFormatter, ReportGenerator,
};
use candidate_ranker::output::report::RankingReport;
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;

const INPUT_EXTENSIONS: &[&str] = &["json", "toml"];

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Maintenance actions never load the file, so a broken config can be repaired
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    if let Commands::Config {
        action: Some(action @ (ConfigAction::Reset | ConfigAction::Path)),
    } = &cli.command
    {
        if let Err(e) = run_config_maintenance(action, &config_path) {
            error!("Command failed: {}", e);
            process::exit(1);
        }
        return;
    }

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank {
            candidates,
            requirement,
            output,
            save,
            all,
            limit,
            detailed,
        } => {
            validate_inputs(&candidates, &requirement)?;

            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(RankerError::InvalidInput)?
                }
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let input_manager = InputManager::new(config.scoring.max_qualification);
            let pool = input_manager.load_candidates(&candidates)?;
            let job = input_manager.load_requirement(&requirement)?;

            let ranker = config.ranker();
            let ranked = ranker.rank(&pool, &job);

            let policy = config
                .shortlist_policy()
                .with_limit(limit.or(config.shortlist.limit));
            let shortlist = if all {
                info!("Listing the full ranking without shortlist filtering");
                None
            } else {
                Some(&policy)
            };

            let report = RankingReport::from_ranking(&job, &ranked, shortlist, ranker.scorer(), detailed)
                .with_sources(
                    &candidates.to_string_lossy(),
                    &requirement.to_string_lossy(),
                );

            // Saved files never carry color codes
            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed,
                config.output.pretty_json,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_save_path(&target, &output_format, &job.title());
                    save_report_to_file(&rendered, &path)?;
                    println!(
                        "Saved {} entries ({:?}) to {}",
                        report.entries.len(),
                        output_format,
                        path.display()
                    );
                }
                None => print!("{}", rendered),
            }
        }

        Commands::Score {
            candidates,
            requirement,
            id,
        } => {
            validate_inputs(&candidates, &requirement)?;

            let input_manager = InputManager::new(config.scoring.max_qualification);
            let pool = input_manager.load_candidates(&candidates)?;
            let job = input_manager.load_requirement(&requirement)?;

            let candidate = pool
                .iter()
                .find(|c| c.id == id)
                .ok_or(RankerError::CandidateNotFound(id))?;

            let breakdown = config.fit_scorer().breakdown(candidate, &job);
            let formatter = ConsoleFormatter::new(config.output.color_output, true);
            print!("{}", formatter.format_breakdown(candidate, &breakdown));
        }

        Commands::Config { .. } => {
            println!("Current Configuration ({})\n", config_path.display());
            println!("Qualification scale: 0 - {}", config.scoring.max_qualification);
            println!("\nScoring Weights:");
            println!("  Skills: 50%");
            println!("  Qualification: 30%");
            println!("  Category: 20%");
            println!("\nRelated Category Groups:");
            for group in config.category_table().groups() {
                let labels: Vec<&str> = group.iter().map(String::as_str).collect();
                println!("  • {}", labels.join(", "));
            }
            println!("\nShortlist:");
            println!("  Minimum skill score: > {}", config.shortlist.min_skill_score);
            match config.shortlist.limit {
                Some(limit) => println!("  Limit: {}", limit),
                None => println!("  Limit: none"),
            }
            println!("\nOutput format: {:?}", config.output.format);
        }
    }

    Ok(())
}

fn run_config_maintenance(action: &ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Reset => {
            println!("Resetting configuration to defaults...");
            Config::reset(config_path)?;
            println!("Configuration reset: {}", config_path.display());
        }
        ConfigAction::Path => println!("{}", config_path.display()),
        ConfigAction::Show => {}
    }
    Ok(())
}

fn validate_inputs(candidates: &Path, requirement: &Path) -> Result<()> {
    cli::validate_file_extension(candidates, INPUT_EXTENSIONS)
        .map_err(|e| RankerError::InvalidInput(format!("Candidates file: {}", e)))?;
    cli::validate_file_extension(requirement, INPUT_EXTENSIONS)
        .map_err(|e| RankerError::InvalidInput(format!("Requirement file: {}", e)))?;
    Ok(())
}
