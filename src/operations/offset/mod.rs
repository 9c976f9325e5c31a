pub mod profile_offset;

pub use profile_offset::{OffsetResult, OffsetStats, ProfileOffset};
