//! Palette state: the persisted color store and the derived swatch list.

pub mod model;
pub mod store;

pub use model::{PaletteModel, Section, Slot};
pub use store::{ColorStore, Snapshot};
