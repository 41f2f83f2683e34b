use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use skyline_core::config::Config;
use skyline_core::pipeline::AnalysisPipeline;
use skyline_report::{json, text};
use skyline_typescript::TypeScriptAnalyzer;

#[derive(Parser)]
#[command(name = "skyline")]
#[command(about = "Generate a 3D-visualizer UML snapshot from a source tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project and write the UML snapshot JSON
    Analyze {
        /// Path to the project root
        path: PathBuf,
        /// Snapshot output path (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Config file path (defaults to .skyline.toml in project root)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Only analyze paths starting with this prefix (repeatable)
        #[arg(long = "include")]
        include: Vec<String>,
        /// Skip paths containing this substring (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
        /// Print the snapshot to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
        /// Emit compact JSON (with --stdout)
        #[arg(long)]
        compact: bool,
    },
    /// Create a default .skyline.toml configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            output,
            config,
            include,
            exclude,
            stdout,
            compact,
        } => cmd_analyze(
            &path,
            output.as_deref(),
            config.as_deref(),
            include,
            exclude,
            stdout,
            compact,
        ),
        Commands::Init { force } => cmd_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_analyze(
    path: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    include: Vec<String>,
    exclude: Vec<String>,
    stdout: bool,
    compact: bool,
) -> Result<()> {
    let mut config = load_config(path, config_path)?;
    if !include.is_empty() {
        config.scan.include = include;
    }
    if !exclude.is_empty() {
        config.scan.exclude = exclude;
    }

    let analyzer = TypeScriptAnalyzer::new().context("failed to initialize TypeScript analyzer")?;
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.path));

    let pipeline = AnalysisPipeline::new(Box::new(analyzer), config);
    let snapshot = pipeline.analyze(path)?;

    if stdout {
        println!("{}", json::format_snapshot(&snapshot, compact));
        eprint!("{}", text::format_summary(&snapshot));
    } else {
        json::write_snapshot(&snapshot, &output_path)?;
        print!("{}", text::format_summary(&snapshot));
        println!("\nSnapshot written to {}", output_path.display());
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let target = PathBuf::from(".skyline.toml");
    if target.exists() && !force {
        anyhow::bail!(".skyline.toml already exists. Use --force to overwrite.");
    }
    std::fs::write(&target, Config::default_toml())?;
    println!("Created .skyline.toml with default configuration.");
    Ok(())
}

fn load_config(project_path: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => Config::load(p),
        None => Ok(Config::load_or_default(project_path)),
    }
}
