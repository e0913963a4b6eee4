//! Holding persistence port trait.

use crate::domain::error::PortviewError;
use crate::domain::holding::Holding;

pub trait HoldingStorePort {
    /// Stored holdings in order. `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<Holding>>, PortviewError>;

    fn save(&self, holdings: &[Holding]) -> Result<(), PortviewError>;
}
