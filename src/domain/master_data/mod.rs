//! Master data - shared pick-list registry consumed by all wizards.

mod errors;
mod field;
mod registry;

pub use errors::MasterDataError;
pub use field::MasterDataField;
pub use registry::MasterData;
