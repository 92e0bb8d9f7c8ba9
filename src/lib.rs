pub mod dsp;
pub mod engine; // Voice groups, timbre mixing, scope tap
#[cfg(feature = "rtrb")]
pub mod io;
pub mod notes; // Fixed 7x9 note catalogue

pub const MAX_BLOCK_SIZE: usize = 2048;
