#![forbid(unsafe_code)]

//! Render target types: cells, the cell buffer, and per-frame metadata.

pub mod buffer;
pub mod cell;
pub mod frame;

pub use buffer::Buffer;
pub use cell::Cell;
pub use frame::{Frame, HitData, HitGrid, HitId, HitRegion};
