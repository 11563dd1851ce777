//! Per-viewer presentation state derived from log notifications and
//! wall-clock time.
//!
//! Nothing here is stored in the log itself: a viewer owns an
//! [`ActivityBlinker`] driven by its subscription callback and decay timer,
//! and recomputes [`elapsed_label`]s on its own display tick. Both timers are
//! the viewer's to cancel on teardown.

pub mod blink;
pub mod elapsed;

pub use blink::{ActivityBlinker, DEFAULT_BLINK_HIGH};
pub use elapsed::elapsed_label;
