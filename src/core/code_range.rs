//! Per-level numeric code ranges
//!
//! Each level reserves a contiguous, non-overlapping block of codes:
//!
//! | Level       | Range                 |
//! |-------------|-----------------------|
//! | Trace       | `[i32::MIN, 1000)`    |
//! | Debug       | `[1000, 2000)`        |
//! | Information | `[2000, 3000)`        |
//! | Warning     | `[3000, 4000)`        |
//! | Error       | `[4000, 5000)`        |
//! | Critical    | `[5000, i32::MAX)`    |

use super::log_level::LogLevel;

/// Width of the small per-level offset callers may pass instead of a full code
pub const OFFSET_WIDTH: i32 = 1000;

/// Half-open code range `[min, max)` owned by one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub min: i32,
    pub max: i32,
}

impl CodeRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Range reserved for `level`
    pub const fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::new(i32::MIN, 1000),
            LogLevel::Debug => Self::new(1000, 2000),
            LogLevel::Information => Self::new(2000, 3000),
            LogLevel::Warning => Self::new(3000, 4000),
            LogLevel::Error => Self::new(4000, 5000),
            LogLevel::Critical => Self::new(5000, i32::MAX),
        }
    }

    #[inline]
    pub fn contains(&self, code: i32) -> bool {
        code >= self.min && code < self.max
    }

    /// Code used when the caller supplies none: offset zero
    #[inline]
    pub fn default_code(&self) -> i32 {
        self.assign(0)
    }

    /// Qualify a caller-supplied code into this range
    ///
    /// In-range codes are kept, `0..1000` is an offset from `min`,
    /// anything else collapses to `min`. An offset that would land past
    /// `max` also collapses to `min`.
    pub fn assign(&self, input: i32) -> i32 {
        if self.contains(input) {
            input
        } else if (0..OFFSET_WIDTH).contains(&input) {
            self.min
                .checked_add(input)
                .filter(|code| self.contains(*code))
                .unwrap_or(self.min)
        } else {
            self.min
        }
    }
}

/// Qualify `input` into `[min, max)`; see [`CodeRange::assign`]
pub fn assign_code(min: i32, max: i32, input: i32) -> i32 {
    CodeRange::new(min, max).assign(input)
}
