//! Error types for the `starlane-core` crate.
//!
//! [`CoreError`] separates the two kinds of failure a caller can see:
//!
//! - [`CoreError::Rejected`] wraps a player-facing [`Rejection`]. The state is
//!   unchanged and [`CoreError::reason`] is the message to show.
//! - Every other variant is a broken caller contract (no game, unknown
//!   system, corrupt catalog, arithmetic overflow). These should halt the
//!   calling code path.

use starlane_economy::{CatalogError, Rejection};
use starlane_types::SystemId;

/// Errors returned by [`crate::StateManager`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// An operation that needs a game ran before one was started.
    #[error("no game in progress")]
    NotInitialized,

    /// A system id that is not in the catalog.
    #[error("unknown system: {0}")]
    UnknownSystem(SystemId),

    /// The reference catalog is inconsistent.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        source: CatalogError,
    },

    /// A counter or credit balance overflowed.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// What was being computed.
        context: String,
    },

    /// The action was refused; nothing changed.
    #[error("{0}")]
    Rejected(#[from] Rejection),
}

impl CoreError {
    /// Player-facing reason string.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Whether this is a validation rejection rather than a contract breach.
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The rejection, if this is one.
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::NotInitialized
            | Self::UnknownSystem(_)
            | Self::Catalog { .. }
            | Self::ArithmeticOverflow { .. } => None,
        }
    }

    /// Build an [`CoreError::ArithmeticOverflow`].
    pub fn overflow(context: &str) -> Self {
        Self::ArithmeticOverflow {
            context: context.to_string(),
        }
    }
}

impl From<CatalogError> for CoreError {
    fn from(source: CatalogError) -> Self {
        match source {
            CatalogError::UnknownSystem(id) => Self::UnknownSystem(id),
            CatalogError::DuplicateSystem(_) | CatalogError::DanglingWormhole { .. } => {
                Self::Catalog { source }
            }
        }
    }
}
