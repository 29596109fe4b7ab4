//! Per-level default destination table

use super::log_level::LogLevel;
use super::target::Target;
use serde::{Deserialize, Serialize};

/// One [`Target`] per [`LogLevel`]
///
/// The domain is fixed to the six levels; entries are overwritten, never
/// added or removed. Defaults route Trace nowhere and everything else to
/// the console.
///
/// ```
/// use routed_logger::{LogLevel, Target, TargetMap};
///
/// let map = TargetMap::default().with(LogLevel::Error, Target::CONSOLE | Target::FILE);
/// assert_eq!(map.get(LogLevel::Trace), Target::NONE);
/// assert!(map.get(LogLevel::Error).contains(Target::FILE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMap {
    pub trace: Target,
    pub debug: Target,
    pub information: Target,
    pub warning: Target,
    pub error: Target,
    pub critical: Target,
}

impl Default for TargetMap {
    fn default() -> Self {
        Self {
            trace: Target::NONE,
            debug: Target::CONSOLE,
            information: Target::CONSOLE,
            warning: Target::CONSOLE,
            error: Target::CONSOLE,
            critical: Target::CONSOLE,
        }
    }
}

impl TargetMap {
    /// Map routing every level to the same target
    pub fn uniform(target: Target) -> Self {
        Self {
            trace: target,
            debug: target,
            information: target,
            warning: target,
            error: target,
            critical: target,
        }
    }

    pub fn get(&self, level: LogLevel) -> Target {
        match level {
            LogLevel::Trace => self.trace,
            LogLevel::Debug => self.debug,
            LogLevel::Information => self.information,
            LogLevel::Warning => self.warning,
            LogLevel::Error => self.error,
            LogLevel::Critical => self.critical,
        }
    }

    pub fn set(&mut self, level: LogLevel, target: Target) {
        let slot = match level {
            LogLevel::Trace => &mut self.trace,
            LogLevel::Debug => &mut self.debug,
            LogLevel::Information => &mut self.information,
            LogLevel::Warning => &mut self.warning,
            LogLevel::Error => &mut self.error,
            LogLevel::Critical => &mut self.critical,
        };
        *slot = target;
    }

    /// Copy with one level replaced
    #[must_use]
    pub fn with(mut self, level: LogLevel, target: Target) -> Self {
        self.set(level, target);
        self
    }

    /// Overwrite all six entries from `other`
    pub fn merge(&mut self, other: &TargetMap) {
        *self = *other;
    }

    /// Levels paired with their targets, in severity order
    pub fn iter(&self) -> impl Iterator<Item = (LogLevel, Target)> + '_ {
        LogLevel::ALL.iter().map(move |level| (*level, self.get(*level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let map = TargetMap::default();
        assert_eq!(map.get(LogLevel::Trace), Target::NONE);
        for level in &LogLevel::ALL[1..] {
            assert_eq!(map.get(*level), Target::CONSOLE);
        }
    }

    #[test]
    fn test_set_touches_one_level() {
        let mut map = TargetMap::default();
        map.set(LogLevel::Warning, Target::FILE);
        assert_eq!(map.get(LogLevel::Warning), Target::FILE);
        assert_eq!(map.get(LogLevel::Error), Target::CONSOLE);
        assert_eq!(map.get(LogLevel::Information), Target::CONSOLE);
    }

    #[test]
    fn test_merge_overwrites_everything() {
        let mut map = TargetMap::default();
        let other = TargetMap::uniform(Target::CALLBACK);
        map.merge(&other);
        assert_eq!(map, other);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = TargetMap::default();
        let changed = base.with(LogLevel::Trace, Target::CONSOLE);
        assert_eq!(base.get(LogLevel::Trace), Target::NONE);
        assert_eq!(changed.get(LogLevel::Trace), Target::CONSOLE);
    }

    #[test]
    fn test_iter_order() {
        let levels: Vec<LogLevel> = TargetMap::default().iter().map(|(l, _)| l).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_serde_roundtrip() {
        let map = TargetMap::default().with(LogLevel::Critical, Target::CONSOLE | Target::FILE);
        let json = serde_json::to_string(&map).unwrap();
        let back: TargetMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
