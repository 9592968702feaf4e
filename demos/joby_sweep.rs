//! Joby propeller in the wind tunnel: hover and edgewise/axial inflow cases.
//!
//! Usage: `cargo run --example joby_sweep -- demos/joby_sweep.yaml`

use std::path::Path;

use charm_sweep::sweep::{run_sweep, SweepConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/joby_sweep.yaml".to_string());
    let config = SweepConfig::load(&config_path)?;

    println!("=== CHARM sweep: {} ({} cases) ===\n", config.case_name, config.rpms.len());
    for case in config.cases()? {
        println!(
            "  U={:>7.2} ft/s  tilt={:>6.1} deg  rpm={:>7.1}  omega={:>7.2} rad/s",
            case.u_inf,
            case.tilt,
            case.rpm,
            case.omega()
        );
    }
    println!();

    let results = run_sweep(&config, Path::new("."))?;
    for r in &results {
        println!("{}\n  {}", r.run_dir.display(), r.force_moments);
    }
    println!("\nResults table: {}", config.output_file.display());
    Ok(())
}
