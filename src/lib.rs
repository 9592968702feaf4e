pub mod error;
pub mod frame;
pub mod deck;
pub mod process;
pub mod perf;
pub mod io;
pub mod sweep;

pub use error::{Error, Result};

// Flat re-exports of the everyday entry points
pub use deck::{edit_charm_input, ParameterEdit, PatchReport};
pub use frame::{transform_vector_frame, FrameDirection, Orientation};
pub use perf::{performance_mrev, performance_nrev, ForceMoments};
pub use sweep::{run_sweep, CaseParams, SweepConfig};
