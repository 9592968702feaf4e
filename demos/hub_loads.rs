//! Express post-processed hub loads of a tilted rotor in the inertial frame.
//!
//! Usage: `cargo run --example hub_loads -- <run_dir> [tilt_deg]`

use charm_sweep::frame::{transform_vector_frame, FrameDirection, Orientation};
use charm_sweep::perf::performance_nrev;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let run_dir = args.next().unwrap_or_else(|| ".".to_string());
    let tilt: f64 = match args.next() {
        Some(t) => t.parse()?,
        None => -90.0,
    };

    let fm = performance_nrev(&run_dir)?;
    let attitude = Orientation::new(0.0, tilt, 0.0);
    let force = transform_vector_frame(&fm.force(), &attitude, FrameDirection::AircraftToInertial);
    let moment = transform_vector_frame(&fm.moment(), &attitude, FrameDirection::AircraftToInertial);

    println!("=== Hub loads: {} (tilt {:.1} deg) ===\n", run_dir, tilt);
    println!("  Solver frame    F = [{:>10.3} {:>10.3} {:>10.3}] lb", fm.fx, fm.fy, fm.fz);
    println!("                  M = [{:>10.3} {:>10.3} {:>10.3}] lb*ft", fm.mx, fm.my, fm.mz);
    println!("  Inertial frame  F = [{:>10.3} {:>10.3} {:>10.3}] lb", force.x, force.y, force.z);
    println!("                  M = [{:>10.3} {:>10.3} {:>10.3}] lb*ft", moment.x, moment.y, moment.z);
    Ok(())
}
