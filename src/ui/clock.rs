//! Header Clock
//!
//! Writes the local date and time into `#currentTime` once per tick.

use chrono::{Local, NaiveDateTime};

use crate::dom::ElementRef;

/// Source of local wall-clock time
pub trait WallClock {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl WallClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// en-US short date plus 2-digit 12-hour time, e.g. `Tue, Mar 5 · 02:07:09 PM`
pub fn format_clock(now: &NaiveDateTime) -> String {
    now.format("%a, %b %-d · %I:%M:%S %p").to_string()
}

/// Clock display bound to an optional element
#[derive(Clone)]
pub struct ClockWidget {
    display: Option<ElementRef>,
}

impl ClockWidget {
    pub fn new(display: Option<ElementRef>) -> Self {
        Self { display }
    }

    /// Render `now`; no-op when the display element is missing
    pub fn tick(&self, now: &NaiveDateTime) {
        if let Some(display) = &self.display {
            display.set_text(&format_clock(now));
        }
    }
}
