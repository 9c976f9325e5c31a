//! Text record grammar shared with the profile extractor and the viewer.
//!
//! ```text
//! LINE x1 z1 x2 z2
//! ARC3_CW  x1 z1 xm zm x2 z2 cx cz [vsx vsz vex vez]
//! ARC3_CCW x1 z1 xm zm x2 z2 cx cz [vsx vsz vex vez]
//! ```

mod record;

pub use record::{format_segment, parse_profile, parse_record, write_profile};
