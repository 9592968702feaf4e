pub mod results;

pub use results::{write_header, write_row, ResultsFile, RESULTS_HEADER};
