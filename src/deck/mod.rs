pub mod edit;
pub mod patcher;

pub use edit::ParameterEdit;
pub use patcher::{edit_charm_input, AppliedEdit, Deck, EditOutcome, PatchReport};
