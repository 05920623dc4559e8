//! Monthly series views over a station's observations.
//!
//! - [`assemble_series`]: gap-filled, January-aligned series for spectral work
//! - [`recent_history`]: labelled readings of the last few years for charts

mod assemble;
mod history;

pub use assemble::{assemble_series, monthly_means};
pub use history::{recent_history, HistoryPoint};
