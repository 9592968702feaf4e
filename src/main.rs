use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::error;
use nalgebra::Vector3;

use charm_sweep::deck::{edit_charm_input, ParameterEdit};
use charm_sweep::frame::{transform_vector_frame, FrameDirection, Orientation};
use charm_sweep::perf::{self, read_last_line};
use charm_sweep::process::ShellCommand;
use charm_sweep::sweep::{run_sweep, SweepConfig};
use charm_sweep::Result;

/// Parameter sweeps for CHARM rotor runs
#[derive(Parser)]
#[command(name = "charm-sweep", version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every case of a YAML sweep definition
    Run {
        config: PathBuf,

        /// Directory the config's relative paths are resolved against
        #[arg(long, default_value = ".")]
        base: PathBuf,
    },

    /// Set values in an input deck, e.g. `OMEGA=418.9 X,Y,Z=-90@3`
    Patch {
        file: PathBuf,

        #[arg(required = true, value_name = "NAME=VALUE[@OFFSET]")]
        edits: Vec<ParameterEdit>,
    },

    /// Print hub forces and moments from a run directory
    Extract {
        run_dir: PathBuf,

        /// Case name; with --process, post-process `<CASE>hubacr.dat` first
        #[arg(long, requires = "process")]
        case: Option<String>,

        /// Post-processor command line
        #[arg(long, requires = "case")]
        process: Option<String>,
    },

    /// Rotate a vector between inertial and aircraft frames
    Transform {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,

        /// Degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        yaw: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pitch: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        roll: f64,

        /// Input is in the aircraft frame (default: inertial)
        #[arg(long)]
        aircraft_input: bool,
    },

    /// Print the last line of a solver output file
    Tail { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Run { config, base } => {
            let config = SweepConfig::load(&config)?;
            let results = run_sweep(&config, &base)?;

            println!();
            println!("  {:>9}  {:>7}  {:>8}   Fx Fy Fz (lb)  Mx My Mz (lb*ft)", "U (ft/s)", "tilt", "rpm");
            println!("  {}", "─".repeat(110));
            for r in &results {
                println!(
                    "  {:>9.2}  {:>7.2}  {:>8.1}  {}",
                    r.case.u_inf, r.case.tilt, r.case.rpm, r.force_moments
                );
            }
            println!();
        }

        Commands::Patch { file, edits } => {
            let report = edit_charm_input(&file, &edits)?;
            for a in &report.applied {
                println!(
                    "{}:{}  {}  {} -> {}",
                    file.display(),
                    a.line,
                    a.parameter,
                    a.previous,
                    a.value
                );
            }
            for p in &report.skipped {
                println!("{}  {}  not found", file.display(), p);
            }
        }

        Commands::Extract {
            run_dir,
            case,
            process,
        } => {
            let fm = match (case, process) {
                (Some(case), Some(process)) => {
                    perf::performance_mrev(&run_dir, &case, &ShellCommand::new(process))?
                }
                _ => perf::performance_nrev(&run_dir)?,
            };
            println!("{}", fm);
        }

        Commands::Transform {
            x,
            y,
            z,
            yaw,
            pitch,
            roll,
            aircraft_input,
        } => {
            let v = transform_vector_frame(
                &Vector3::new(x, y, z),
                &Orientation::new(yaw, pitch, roll),
                FrameDirection::from_aircraft_input(aircraft_input),
            );
            println!("{:.6} {:.6} {:.6}", v.x, v.y, v.z);
        }

        Commands::Tail { file } => {
            println!("{}", read_last_line(&file)?);
        }
    }

    Ok(())
}
