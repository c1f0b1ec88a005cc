// Roster Admin - Core Library
// Exposes all modules for use in the terminal UI, the CLI, and tests

pub mod config;
pub mod entities;
pub mod forms;
pub mod logging;
pub mod money;
pub mod remote;
pub mod roster;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use entities::{Agent, AgentId, CompensationUpdate, NewAgent};
pub use forms::{CreateForm, EditForm};
pub use money::{normalize, sanitize, validate, RejectReason, ValidationOutcome};
pub use remote::{CollectionError, FieldErrors, HttpCollection, RemoteCollection};
pub use roster::{
    MutationOutcome, RefreshOutcome, Roster, RosterSnapshot, RowAction, RowState,
    RowTransitionError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
