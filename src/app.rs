//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - reads mesh files and hands them to the viewer
//! - runs the solver and writes its output

use clap::Parser;
use log::LevelFilter;

use crate::cli::{Command, MeshArgs, SolveArgs};
use crate::domain::{MeshSummary, SolveConfig};
use crate::error::AppError;
use crate::math::format_tick;

pub mod pipeline;

/// Environment variable holding the log filter (`env_logger` syntax).
pub const LOG_ENV: &str = "MESHPLOT_LOG";

/// Entry point for the `meshplot` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // `meshplot --filename x` should behave like `meshplot plot --filename x`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Plot(args) => handle_plot(args),
        Command::Info(args) => handle_info(args),
        Command::Solve(args) => handle_solve(args),
    }
}

fn init_logging() {
    let _ = env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or(LOG_ENV, "warn"))
        .try_init();
}

fn handle_plot(args: MeshArgs) -> Result<(), AppError> {
    let data = pipeline::load_surface(&args.filename)?;
    log::info!("opening viewer for '{}'", args.filename.display());
    crate::tui::run(&data)
}

fn handle_info(args: MeshArgs) -> Result<(), AppError> {
    let (n, summary) = pipeline::load_summary(&args.filename)?;
    println!("{}", format_summary(&args.filename.display().to_string(), n, &summary));
    Ok(())
}

fn handle_solve(args: SolveArgs) -> Result<(), AppError> {
    let config = solve_config_from_args(&args);
    let solution = crate::solver::solve_dirichlet(&config)?;

    println!(
        "Finished computing! Latest absolute change was: {}",
        solution.last_change
    );
    println!("Total number of iterations on mesh: {}", solution.iterations);
    println!("Total time spent: {} seconds", solution.elapsed.as_secs_f64());
    println!(
        "Total time per iteration: {} seconds",
        solution.seconds_per_iteration()
    );

    crate::io::write_mesh(&config.output, &solution.mesh)?;
    Ok(())
}

pub fn solve_config_from_args(args: &SolveArgs) -> SolveConfig {
    SolveConfig {
        n: args.n,
        epsilon: args.epsilon,
        max_iterations: args.max_iterations,
        output: args.output.clone(),
    }
}

/// Multi-line summary printed by `meshplot info`.
pub fn format_summary(source: &str, n: usize, summary: &MeshSummary) -> String {
    let range = match (summary.finite_min, summary.finite_max) {
        (Some(lo), Some(hi)) => format!("[{}, {}]", format_tick(lo), format_tick(hi)),
        _ => "-".to_string(),
    };
    format!(
        "file: {source}\nn: {n} ({n}x{n} values)\nrange: {range}\nnon-finite: {}",
        summary.non_finite
    )
}

/// Rewrite argv so a bare `--filename` defaults to `plot`.
///
/// Rules:
/// - `meshplot`                         -> unchanged (clap prints usage, exits non-zero)
/// - `meshplot --filename x ...`        -> `meshplot plot --filename x ...`
/// - `meshplot --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "plot" | "info" | "solve");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "plot flags".
    if arg1.starts_with('-') {
        argv.insert(1, "plot".to_string());
        return argv;
    }

    argv
}
