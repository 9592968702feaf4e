pub mod extract;
pub mod force;
pub mod table;
pub mod tail;

pub use extract::{
    hub_loads_file, load_force_moments, performance_mrev, performance_nrev, PERFORMANCE_TABLE,
    PROCESS_INPUT,
};
pub use force::ForceMoments;
pub use table::{last_row, load_table};
pub use tail::read_last_line;
