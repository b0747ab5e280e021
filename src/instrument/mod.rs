//! Instrument registry
//!
//! Maps a symbol to its contract conventions and instrument class.

mod registry;
mod types;

pub use registry::{normalize_symbol, InstrumentRegistry, DEFAULT_SYMBOL};
pub use types::{Instrument, InstrumentClass, InstrumentSpec};
