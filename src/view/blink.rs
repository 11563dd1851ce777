//! Unseen-activity indicator state for live viewers.

/// Default count the blinker jumps to when activity arrives. At the default
/// one-second decay tick this keeps the icon blinking for a few seconds after
/// the last notification.
pub const DEFAULT_BLINK_HIGH: u8 = 6;

/// Alternating-countdown counter behind a viewer's "new activity" icon.
///
/// Each notification pushes the counter back up; a periodic decay tick walks
/// it down to zero. The rendered signal derives solely from parity, so the
/// plain countdown makes the icon blink while activity is recent, and
/// [`record_activity`](ActivityBlinker::record_activity) alternates between
/// the high value and one below it so the icon is guaranteed to toggle on
/// every notification, even when notifications arrive faster than the decay
/// timer fires.
///
/// The blinker is per-viewer state: it is driven by that viewer's
/// subscription callback and its own decay timer, and is dropped with the
/// viewer.
///
/// # Example
///
/// ```
/// use httptap::view::ActivityBlinker;
///
/// let mut blinker = ActivityBlinker::new();
/// assert!(!blinker.is_signaling());
///
/// blinker.record_activity();
/// assert_eq!(blinker.counter(), 6);
/// blinker.record_activity();
/// assert_eq!(blinker.counter(), 5); // parity flipped without a tick in between
///
/// blinker.tick(); // 4: idle frame
/// blinker.tick(); // 3: signaling frame
/// assert!(blinker.is_signaling());
///
/// while blinker.counter() > 0 {
///     blinker.tick();
/// }
/// assert!(!blinker.is_signaling());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivityBlinker {
    counter: u8,
    high: u8,
}

impl ActivityBlinker {
    pub fn new() -> Self {
        Self::with_high(DEFAULT_BLINK_HIGH)
    }

    /// Use a custom high value. `high` must be at least 2 so the two
    /// alternation targets stay above zero; lower values are raised to 2.
    pub fn with_high(high: u8) -> Self {
        Self {
            counter: 0,
            high: high.max(2),
        }
    }

    /// React to one log notification.
    ///
    /// Sets the counter to the high value, or to one below it when it is
    /// already there, so consecutive notifications produce a strictly
    /// alternating parity sequence: 0 -> 6 -> 5 -> 6 -> 5 with the default
    /// high value.
    pub fn record_activity(&mut self) {
        self.counter = if self.counter == self.high {
            self.high - 1
        } else {
            self.high
        };
    }

    /// One decay-timer step: decrement by one, floored at zero.
    pub fn tick(&mut self) {
        self.counter = self.counter.saturating_sub(1);
    }

    /// Whether the viewer should render the "new activity" icon right now.
    ///
    /// Odd counter means signaling; even (including zero) means idle. The
    /// decay ticks flip this once per interval, which is the blink.
    pub fn is_signaling(&self) -> bool {
        self.counter % 2 == 1
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }
}

impl Default for ActivityBlinker {
    fn default() -> Self {
        Self::new()
    }
}
