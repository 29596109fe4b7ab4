//! Destination bitset for log occurrences

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Set of destination kinds an occurrence is routed to
    ///
    /// Every kind owns exactly one bit, so kinds compose freely:
    ///
    /// ```
    /// use routed_logger::Target;
    ///
    /// let target = Target::CONSOLE | Target::FILE;
    /// assert!(target.contains(Target::FILE));
    /// assert!(!target.contains(Target::CALLBACK));
    /// assert_eq!(Target::NONE, Target::empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct Target: u32 {
        /// Registered callbacks, honoring each callback's invocation mode
        const CALLBACK = 1;
        /// Registered callbacks, all detached from the caller
        const CALLBACK_ASYNC = 1 << 1;
        /// Single formatted line on standard output
        const CONSOLE = 1 << 2;
        /// Platform event log, where a collaborator is available
        const EVENT_LOG = 1 << 3;
        /// Durable file sink
        const FILE = 1 << 4;
    }
}

impl Target {
    /// No destination
    pub const NONE: Target = Target::empty();

    /// Console plus file, the usual pairing for services
    pub const CONSOLE_AND_FILE: Target = Target::CONSOLE.union(Target::FILE);

    /// Every destination kind
    pub const EVERYTHING: Target = Target::all();

    const NAMES: [(Target, &'static str); 5] = [
        (Target::CALLBACK, "Callback"),
        (Target::CALLBACK_ASYNC, "CallbackAsync"),
        (Target::CONSOLE, "Console"),
        (Target::EVENT_LOG, "EventLog"),
        (Target::FILE, "File"),
    ];

    /// Raw bit value, as shown in formatted output
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.bits()
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::NONE
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }

        let mut first = true;
        for (flag, name) in Target::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_independent() {
        let all = Target::NAMES.iter().map(|(t, _)| t.bits());
        let mut seen = 0u32;
        for bits in all {
            assert_eq!(bits.count_ones(), 1);
            assert_eq!(seen & bits, 0);
            seen |= bits;
        }
    }

    #[test]
    fn test_console_does_not_imply_callback() {
        assert!(!Target::CONSOLE.contains(Target::CALLBACK));
        assert!(!Target::FILE.contains(Target::CONSOLE));
    }

    #[test]
    fn test_display() {
        assert_eq!(Target::NONE.to_string(), "None");
        assert_eq!(Target::CONSOLE.to_string(), "Console");
        assert_eq!(
            (Target::CALLBACK | Target::FILE).to_string(),
            "Callback, File"
        );
    }

    #[test]
    fn test_presets() {
        assert!(Target::CONSOLE_AND_FILE.contains(Target::CONSOLE));
        assert!(Target::CONSOLE_AND_FILE.contains(Target::FILE));
        assert_eq!(Target::EVERYTHING.bits(), 0b11111);
    }
}
