//! Domain error types.

/// Failures of a registry mutation. The registry is left unchanged whenever
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    #[error("portfolio is fully allocated (residual weight {residual})")]
    NoCapacity { residual: f64 },

    #[error("holding {symbol} already exists")]
    DuplicateSymbol { symbol: String },

    #[error("holdings over-allocated: weights sum to {total}")]
    OverAllocated { total: f64 },

    #[error("holdings under-allocated: weights sum to {total}, expected 1")]
    UnderAllocated { total: f64 },

    #[error("invalid holding {symbol}: {reason}")]
    InvalidHolding { symbol: String, reason: String },
}

/// Malformed user input, rejected before it reaches the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("symbol is required")]
    EmptySymbol,

    #[error("share count is required")]
    EmptyShares,

    #[error("invalid share count {input:?}: expected a non-negative integer")]
    InvalidShares { input: String },
}

/// Top-level error type for portview.
#[derive(Debug, thiserror::Error)]
pub enum PortviewError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("analytics error: {reason}")]
    Analytics { reason: String },

    #[error("holding store error: {reason}")]
    Store { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PortviewError {
    /// Process exit status reported by the CLI for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            PortviewError::Io(_) => 1,
            PortviewError::ConfigParse { .. }
            | PortviewError::ConfigMissing { .. }
            | PortviewError::ConfigInvalid { .. } => 2,
            PortviewError::Allocation(_) | PortviewError::Input(_) => 3,
            PortviewError::Analytics { .. } => 4,
            PortviewError::Store { .. } => 5,
        }
    }
}

impl From<&PortviewError> for std::process::ExitCode {
    fn from(err: &PortviewError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
