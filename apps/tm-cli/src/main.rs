use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tm_app::{
    AppResult, ExportFormat, RunMode, RunOutcome, RunRequest, load_document, load_inputs,
    parameter_rows, run_service, validate_document,
};
use tm_profile::{ContinuityPolicy, CoveragePolicy, EngineOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tm-cli")]
#[command(about = "TrainMotion CLI - phase-by-phase train motion profiles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a profile document, its segment table and parameters
    Validate {
        /// Path to the profile document (YAML or JSON)
        profile_path: PathBuf,
    },
    /// List the run parameters of a profile
    Params {
        /// Path to the profile document (YAML or JSON)
        profile_path: PathBuf,
    },
    /// List the acceleration segments of a profile
    Segments {
        /// Path to the profile document (YAML or JSON)
        profile_path: PathBuf,
    },
    /// Calculate the acceleration phase only
    Accel {
        /// Path to the profile document (YAML or JSON)
        profile_path: PathBuf,
        #[command(flatten)]
        calc: CalcArgs,
    },
    /// Calculate all five phases and print a phase table
    Run {
        /// Path to the profile document (YAML or JSON)
        profile_path: PathBuf,
        #[command(flatten)]
        calc: CalcArgs,
    },
    /// Export the speed-distance points of a run
    Export {
        /// Path to the profile document (YAML or JSON)
        profile_path: PathBuf,
        #[command(flatten)]
        calc: CalcArgs,
        /// Only export the acceleration phase
        #[arg(long)]
        acceleration_only: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write to a timestamped file in the current directory
        #[arg(long, conflicts_with = "output")]
        timestamped: bool,
    },
}

#[derive(Args)]
struct CalcArgs {
    /// Override a parameter, e.g. --set constant_time_s=45 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
    /// Fail when the target speed lies above the segment table
    #[arg(long)]
    strict_coverage: bool,
    /// Stop at the top of the segment table instead of failing
    #[arg(long, conflicts_with = "strict_coverage")]
    permissive_coverage: bool,
    /// Fail when the cruise speed differs from the speed carried into it
    #[arg(long)]
    strict_continuity: bool,
}

impl CalcArgs {
    /// Document options with any command-line policy flags applied.
    fn options(&self, mut options: EngineOptions) -> Option<EngineOptions> {
        if !(self.strict_coverage || self.permissive_coverage || self.strict_continuity) {
            return None;
        }
        if self.strict_coverage {
            options.coverage = CoveragePolicy::Strict;
        }
        if self.permissive_coverage {
            options.coverage = CoveragePolicy::Permissive;
        }
        if self.strict_continuity {
            options.continuity = ContinuityPolicy::Strict;
        }
        Some(options)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so exports on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { profile_path } => cmd_validate(&profile_path),
        Commands::Params { profile_path } => cmd_params(&profile_path),
        Commands::Segments { profile_path } => cmd_segments(&profile_path),
        Commands::Accel { profile_path, calc } => {
            cmd_run(&profile_path, &calc, RunMode::AccelerationOnly)
        }
        Commands::Run { profile_path, calc } => cmd_run(&profile_path, &calc, RunMode::AllPhases),
        Commands::Export {
            profile_path,
            calc,
            acceleration_only,
            format,
            output,
            timestamped,
        } => {
            let mode = if acceleration_only {
                RunMode::AccelerationOnly
            } else {
                RunMode::AllPhases
            };
            cmd_export(
                &profile_path,
                &calc,
                mode,
                format.into(),
                output.as_deref(),
                timestamped,
            )
        }
    }
}

fn cmd_validate(profile_path: &Path) -> AppResult<()> {
    println!("Validating profile: {}", profile_path.display());
    let doc = load_document(profile_path)?;
    validate_document(&doc)?;
    println!("✓ Profile is valid");
    Ok(())
}

fn cmd_params(profile_path: &Path) -> AppResult<()> {
    let doc = load_document(profile_path)?;
    let inputs = load_inputs(&doc)?;

    println!("Parameters for '{}':", inputs.name);
    for row in parameter_rows(&inputs.params) {
        println!(
            "  {:<28} {:>10} {:<6} ({})",
            row.label, row.value, row.unit, row.key
        );
    }
    Ok(())
}

fn cmd_segments(profile_path: &Path) -> AppResult<()> {
    let doc = load_document(profile_path)?;
    let inputs = load_inputs(&doc)?;

    println!("Segments for '{}':", inputs.name);
    println!("  {:>10} {:>10} {:>12}", "low km/h", "high km/h", "acc cm/s²");
    for seg in inputs.segments.iter() {
        println!(
            "  {:>10} {:>10} {:>12}",
            seg.speed_low_kmh, seg.speed_high_kmh, seg.acc_cm_s2
        );
    }
    let (low, high) = inputs.segments.coverage();
    println!("  Coverage: {} - {} km/h", low, high);
    for (from, to) in inputs.segments.gaps() {
        println!("  ! Gap: {} - {} km/h", from, to);
    }
    Ok(())
}

fn calculate(profile_path: &Path, calc: &CalcArgs, mode: RunMode) -> AppResult<RunOutcome> {
    let doc = load_document(profile_path)?;
    let inputs = load_inputs(&doc)?;
    let request = RunRequest {
        mode,
        overrides: calc.overrides.clone(),
        options: calc.options(inputs.options),
    };
    run_service::run(&inputs, &request)
}

fn cmd_run(profile_path: &Path, calc: &CalcArgs, mode: RunMode) -> AppResult<()> {
    let outcome = calculate(profile_path, calc, mode)?;

    println!("Profile: {}", outcome.name);
    println!("  {:<18} {:>12} {:>14}", "Phase", "Time (s)", "Distance (m)");
    for phase in &outcome.phases {
        println!(
            "  {:<18} {:>12.3} {:>14.3}",
            phase.kind().label(),
            phase.duration_s(),
            phase.distance_m()
        );
    }
    println!(
        "  {:<18} {:>12.3} {:>14.3}",
        "Total", outcome.total_time_s, outcome.total_distance_m
    );
    println!("  Curve points: {}", outcome.points.len());
    Ok(())
}

fn cmd_export(
    profile_path: &Path,
    calc: &CalcArgs,
    mode: RunMode,
    format: ExportFormat,
    output: Option<&Path>,
    timestamped: bool,
) -> AppResult<()> {
    let outcome = calculate(profile_path, calc, mode)?;
    let contents = tm_app::render(&outcome, format)?;

    let target = if timestamped {
        let now = chrono::Local::now().naive_local();
        Some(PathBuf::from(tm_app::default_export_name(
            "speed_distance",
            format,
            now,
        )))
    } else {
        output.map(Path::to_path_buf)
    };

    // Write to file or stdout
    if let Some(path) = target {
        tm_app::write_export(&path, &contents)?;
        info!(path = %path.display(), points = outcome.points.len(), "export written");
        println!(
            "✓ Exported {} points to {}",
            outcome.points.len(),
            path.display()
        );
    } else {
        print!("{}", contents);
    }

    Ok(())
}
