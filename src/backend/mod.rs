// Backend module for the atom space
//
// Layered bottom-up:
// - `symbol`, `models`: atoms and bindings
// - `grounded`: the extension point for external payloads
// - `matcher`: matching and unification
// - `space`: atom storage and queries
// - `types`: type checking over typing facts stored in a space

pub mod config;
pub mod grounded;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod space;
pub mod symbol;
pub mod types;

pub use config::{ConfigError, EngineConfig, LoggingConfig, SpaceConfig};
pub use grounded::{ExecError, Grounded, GroundedAtom, ValueAtom};
pub use logging::{init_logging, LoggingError};
pub use matcher::{apply_bindings_to_atom, make_variables_unique, match_atoms, unify};
pub use models::*;
pub use space::GroundingSpace;
pub use symbol::{intern, intern_string, Symbol};
pub use types::{check_type, for_each_atom_type, get_atom_types, validate_atom};
