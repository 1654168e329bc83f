mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ContractLoader, FileContractLoader, LoadResult, load_contract, parse_contract};
pub use model::{
    AGENT_README_FILE, CANONICAL_ROLES, CONTRACT_FILE, CONTRACT_VERSION, Config, Mode,
    ModulePattern, NamingSchema, SideEffects, StateOwnership, VALID_MODES, VALID_MODULE_PATTERNS,
    VALID_NAMING_SCHEMAS, VALID_SIDE_EFFECTS, VALID_STATE_OWNERSHIP,
};
pub use validation::validate_contract;
