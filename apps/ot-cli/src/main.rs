use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use ot_core::NodeId;
use ot_core::timing::{RunTiming, Timer, enable_timing};
use ot_project::{ModelDef, SolarModelDef, load_model, reference_model, save_json, save_yaml};
use ot_results::{
    RunManifest, RunStore, TemperatureUnit, compute_run_id, timestamp_now, write_csv,
};
use ot_sim::{
    CasePreset, CaseSelector, LoadMode, SimOptions, SimProgress, TemperatureHistory,
    ThermalNetwork, check_limits, face_load_sweep, node_extremes, run_orbit_with_progress,
};

mod error;

use error::{CliError, CliResult};

const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "ot-cli")]
#[command(about = "Orbitherm CLI - one-orbit satellite thermal network simulation", long_about = None)]
struct Cli {
    /// Print a wall-clock timing summary after runs
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a model file
    Validate {
        /// Path to the model file (YAML or JSON)
        model_path: PathBuf,
    },
    /// Write the built-in reference model
    DumpModel {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ModelFormat::Yaml)]
        format: ModelFormat,
    },
    /// Simulate one orbit window for a case
    Run(RunArgs),
    /// Tabulate external loads per face over one revolution
    Loads {
        /// Model file; the built-in reference model when omitted
        #[arg(long)]
        model: Option<PathBuf>,
        /// inc (per unit area), bol or eol
        #[arg(long, default_value = "inc")]
        mode: String,
        #[arg(long, default_value_t = 361)]
        samples: usize,
        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List saved runs
    Runs {
        #[arg(long)]
        model: Option<PathBuf>,
        /// Only runs of this model name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show extremes of a saved run
    ShowRun {
        run_id: String,
        #[arg(long)]
        model: Option<PathBuf>,
        #[arg(long)]
        celsius: bool,
    },
    /// Export node temperature series of a saved run as CSV
    ExportSeries {
        run_id: String,
        #[arg(long)]
        model: Option<PathBuf>,
        /// Node numbers to export (repeatable); all physical nodes when omitted
        #[arg(long = "node")]
        nodes: Vec<u8>,
        #[arg(long)]
        celsius: bool,
        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelFormat {
    Yaml,
    Json,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Model file; the built-in reference model when omitted
    #[arg(long)]
    model: Option<PathBuf>,
    /// Case to simulate: hot or cold
    #[arg(long)]
    case: String,
    /// Time step in seconds (overrides the model)
    #[arg(long)]
    dt: Option<f64>,
    /// Simulated window in seconds (overrides the model)
    #[arg(long)]
    duration: Option<f64>,
    /// Evaluate node updates in parallel
    #[arg(long)]
    parallel: bool,
    /// Use each exposed node's own face orientation for direct sunlight
    #[arg(long)]
    per_face: bool,
    /// Save the run to the run store
    #[arg(long)]
    save: bool,
    /// Skip the run store lookup and force a re-run
    #[arg(long)]
    no_cache: bool,
    /// Export node series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Report temperatures in Celsius
    #[arg(long)]
    celsius: bool,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.timing {
        enable_timing();
    }

    match cli.command {
        Commands::Validate { model_path } => cmd_validate(&model_path),
        Commands::DumpModel { output, format } => cmd_dump_model(output.as_deref(), format),
        Commands::Run(args) => cmd_run(&args),
        Commands::Loads {
            model,
            mode,
            samples,
            output,
        } => cmd_loads(model.as_deref(), &mode, samples, output.as_deref()),
        Commands::Runs { model, name } => cmd_runs(model.as_deref(), name.as_deref()),
        Commands::ShowRun {
            run_id,
            model,
            celsius,
        } => cmd_show_run(&run_id, model.as_deref(), unit(celsius)),
        Commands::ExportSeries {
            run_id,
            model,
            nodes,
            celsius,
            output,
        } => cmd_export_series(
            &run_id,
            model.as_deref(),
            &nodes,
            unit(celsius),
            output.as_deref(),
        ),
    }
}

fn unit(celsius: bool) -> TemperatureUnit {
    if celsius {
        TemperatureUnit::Celsius
    } else {
        TemperatureUnit::Kelvin
    }
}

fn load(model_path: Option<&Path>) -> CliResult<ModelDef> {
    match model_path {
        Some(path) => Ok(load_model(path)?),
        None => Ok(reference_model()),
    }
}

fn open_store(model_path: Option<&Path>) -> CliResult<RunStore> {
    match model_path {
        Some(path) => Ok(RunStore::for_model(path)?),
        None => Ok(RunStore::new(PathBuf::from(".orbitherm").join("runs"))?),
    }
}

fn output_writer(output: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match output {
        Some(path) => Ok(Box::new(File::create(path)?)),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn cmd_validate(model_path: &Path) -> CliResult<()> {
    println!("Validating model: {}", model_path.display());
    let model = load_model(model_path)?;
    let network = ThermalNetwork::from_model(&model)?;
    println!(
        "✓ Model '{}' is valid ({} nodes, {} limits)",
        network.name,
        network.nodes.len(),
        model.limits.len()
    );
    Ok(())
}

fn cmd_dump_model(output: Option<&Path>, format: ModelFormat) -> CliResult<()> {
    let model = reference_model();
    match (output, format) {
        (Some(path), ModelFormat::Yaml) => save_yaml(path, &model)?,
        (Some(path), ModelFormat::Json) => save_json(path, &model)?,
        (None, ModelFormat::Yaml) => print!("{}", serde_yaml::to_string(&model)?),
        (None, ModelFormat::Json) => println!("{}", serde_json::to_string_pretty(&model)?),
    }
    if let Some(path) = output {
        println!("✓ Wrote reference model to {}", path.display());
    }
    Ok(())
}

fn cmd_run(args: &RunArgs) -> CliResult<()> {
    let mut timing = RunTiming::default();
    let load_timer = Timer::start("load");

    let case: CaseSelector = args.case.parse()?;
    let mut model = load(args.model.as_deref())?;
    if args.per_face {
        model.solar_model = SolarModelDef::PerFace;
    }
    let network = ThermalNetwork::from_model(&model)?;
    let preset = CasePreset::select(&model, case)?;

    let mut opts = SimOptions::from_def(&model.simulation);
    if let Some(dt) = args.dt {
        opts.dt_s = dt;
    }
    if let Some(duration) = args.duration {
        opts.duration_s = duration;
    }
    opts.parallel = args.parallel;
    let steps = opts.step_count()?;
    timing.load_time_s = load_timer.elapsed_s();

    println!("Running {} case for model: {}", case, model.name);
    println!(
        "  dt = {:.3} s, duration = {:.3} s, steps = {}, solar model = {}",
        opts.dt_s,
        opts.duration_s,
        steps,
        network.solar_model.as_str()
    );

    let run_id = compute_run_id(&model, case, &opts, SOLVER_VERSION);
    let store = if args.save {
        Some(open_store(args.model.as_deref())?)
    } else {
        None
    };

    let cached = match &store {
        Some(store) if !args.no_cache => store.cached_history(&run_id),
        _ => None,
    };

    let history = match cached {
        Some(history) => {
            tracing::info!(run_id = %run_id, "loaded run from store");
            println!("✓ Loaded from run store: {}", run_id);
            history
        }
        None => {
            let integrate_timer = Timer::start("integrate");
            let mut last_emit = Instant::now();
            let history = run_orbit_with_progress(
                &network,
                &preset,
                &opts,
                Some(&mut |p| {
                    if last_emit.elapsed().as_millis() >= 100 || p.fraction_complete >= 1.0 {
                        render_progress(&p);
                        last_emit = Instant::now();
                    }
                }),
            )?;
            clear_progress_line();
            timing.integrate_time_s = integrate_timer.elapsed_s();

            match &store {
                Some(store) => {
                    let save_timer = Timer::start("save");
                    let manifest = RunManifest {
                        run_id: run_id.clone(),
                        model_name: model.name.clone(),
                        case: case.to_string(),
                        timestamp: timestamp_now(),
                        dt_s: opts.dt_s,
                        duration_s: opts.duration_s,
                        steps: history.steps(),
                        solar_model: network.solar_model.as_str().to_string(),
                        solver_version: SOLVER_VERSION.to_string(),
                    };
                    store.save_history(&manifest, &history, &network.geometry)?;
                    timing.save_time_s = save_timer.elapsed_s();
                    println!("✓ Simulation completed and saved: {}", run_id);
                }
                None => println!("✓ Simulation completed"),
            }
            history
        }
    };
    timing.steps = history.steps();

    let celsius = unit(args.celsius);
    print_extremes(&history, &network, celsius);
    print_limits(&history, &model);

    if let Some(path) = &args.csv {
        write_csv(File::create(path)?, &history, &[], celsius)?;
        println!("\n✓ Exported {} steps to {}", history.steps(), path.display());
    }

    if let Some(summary) = timing.summary() {
        println!("\n{}", summary);
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_progress(p: &SimProgress) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.0}/{:.0}s  theta={:>6.2}°  step={}/{}",
        bar,
        p.fraction_complete * 100.0,
        p.sim_time,
        p.t_end,
        p.theta_deg,
        p.step,
        p.steps
    );
    let _ = io::stdout().flush();
}

fn print_extremes(history: &TemperatureHistory, network: &ThermalNetwork, unit: TemperatureUnit) {
    println!("\nNode extremes [{}]:", unit.suffix());
    println!("  {:>4}  {:<24} {:>10} {:>10}", "node", "name", "max", "min");
    for ext in node_extremes(history) {
        let name = network
            .node(ext.node)
            .map(|n| n.name.as_str())
            .unwrap_or("");
        println!(
            "  {:>4}  {:<24} {:>10.2} {:>10.2}",
            ext.node.number(),
            name,
            unit.convert(ext.max_k),
            unit.convert(ext.min_k)
        );
    }
}

fn print_limits(history: &TemperatureHistory, model: &ModelDef) {
    if model.limits.is_empty() {
        return;
    }
    let checks = check_limits(&node_extremes(history), &model.limits);
    println!("\nAllowable flight temperatures [C]:");
    for check in checks {
        let mark = if check.status.is_ok() { "✓" } else { "✗" };
        println!(
            "  {} node {:>2} {:<16} range {:>6.1}..{:<6.1} observed {:>7.2}..{:<7.2} {}",
            mark,
            check.node.number(),
            check.label,
            check.min_c,
            check.max_c,
            check.observed_min_c,
            check.observed_max_c,
            check.status.as_str()
        );
    }
}

fn cmd_loads(
    model_path: Option<&Path>,
    mode: &str,
    samples: usize,
    output: Option<&Path>,
) -> CliResult<()> {
    let mode: LoadMode = mode.parse()?;
    let model = load(model_path)?;
    let network = ThermalNetwork::from_model(&model)?;
    let hot = CasePreset::select(&model, CaseSelector::Hot)?;
    let cold = CasePreset::select(&model, CaseSelector::Cold)?;
    let sweep = face_load_sweep(&network, (&hot, &cold), mode, samples)?;

    let mut wtr = csv::Writer::from_writer(output_writer(output)?);
    let mut header = vec!["theta_deg".to_string()];
    for face in &sweep.faces {
        let label = face.face.label();
        header.push(format!("{label}_solar"));
        header.push(format!("{label}_albedo"));
        header.push(format!("{label}_ir"));
    }
    wtr.write_record(&header)?;

    for (i, theta) in sweep.theta_deg.iter().enumerate() {
        let mut row = vec![theta.to_string()];
        for face in &sweep.faces {
            row.push(face.solar[i].to_string());
            row.push(face.albedo[i].to_string());
            row.push(face.planet_ir[i].to_string());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    if let Some(path) = output {
        println!(
            "✓ Wrote {} load samples ({}) to {}",
            sweep.theta_deg.len(),
            sweep.mode,
            path.display()
        );
    }
    Ok(())
}

fn cmd_runs(model_path: Option<&Path>, name: Option<&str>) -> CliResult<()> {
    let store = open_store(model_path)?;
    let runs = store.list_runs(name)?;

    if runs.is_empty() {
        println!("No saved runs in {}", store.root_dir().display());
    } else {
        println!("Saved runs in {}:", store.root_dir().display());
        for manifest in runs {
            println!(
                "  {} {} {:<4} dt={} s steps={} ({})",
                manifest.run_id,
                manifest.model_name,
                manifest.case,
                manifest.dt_s,
                manifest.steps,
                manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(run_id: &str, model_path: Option<&Path>, unit: TemperatureUnit) -> CliResult<()> {
    println!("Loading run: {}", run_id);

    let store = open_store(model_path)?;
    let manifest = store.load_manifest(run_id)?;
    let history = store.load_history(run_id)?;
    let model = load(model_path)?;
    let network = ThermalNetwork::from_model(&model)?;

    println!("\nRun Summary:");
    println!("  Model: {}", manifest.model_name);
    println!("  Case: {}", manifest.case);
    println!("  Solar model: {}", manifest.solar_model);
    println!("  Steps: {} (dt = {} s)", manifest.steps, manifest.dt_s);
    println!(
        "  Time range: 0.000 - {:.3} s",
        history.time_s(history.steps().saturating_sub(1))
    );
    println!("  Saved: {}", manifest.timestamp);

    print_extremes(&history, &network, unit);
    print_limits(&history, &model);
    Ok(())
}

fn cmd_export_series(
    run_id: &str,
    model_path: Option<&Path>,
    nodes: &[u8],
    unit: TemperatureUnit,
    output: Option<&Path>,
) -> CliResult<()> {
    let ids = nodes
        .iter()
        .map(|&n| NodeId::from_number(n).ok_or(CliError::InvalidNode(n)))
        .collect::<CliResult<Vec<_>>>()?;

    let store = open_store(model_path)?;
    let history = store.load_history(run_id)?;
    write_csv(output_writer(output)?, &history, &ids, unit)?;

    if let Some(path) = output {
        println!(
            "✓ Exported {} steps to {}",
            history.steps(),
            path.display()
        );
    }
    Ok(())
}
