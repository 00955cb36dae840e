pub mod edit;
pub mod file;

// Public library API - hosts embedding the engine should only need these.
pub use edit::confirm::{ApproveAll, Confirm, ConsoleConfirm};
pub use edit::driver::{replace, ReplaceError, Replacement};
pub use edit::operation::{EditError, EditMetadata, EditResult, Editor};
pub use file::find::{edit_distance, similarity};
