//! Adapter configuration.

use horizon_sections_core::AssertionMode;

/// Behavioral options for a [`ListAdapter`](crate::ListAdapter).
///
/// # Example
///
/// ```
/// use horizon_sections::AdapterConfig;
///
/// let config = AdapterConfig::new()
///     .deduplicate_objects(false)
///     .reload_on_first_update(false);
/// assert!(!config.deduplicate_objects);
/// ```
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    /// Drop objects whose diff identifier already appeared earlier in the
    /// list. Duplicates are logged at warn level.
    pub deduplicate_objects: bool,
    /// Use a full reload instead of an animated batch for the first update.
    pub reload_on_first_update: bool,
    /// Assertion mode used while this adapter runs. `None` follows whatever
    /// is in effect for the caller, normally the process-wide
    /// [`set_assertion_mode`](horizon_sections_core::set_assertion_mode).
    /// Other adapters are unaffected.
    pub assertion_mode: Option<AssertionMode>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            deduplicate_objects: true,
            reload_on_first_update: true,
            assertion_mode: None,
        }
    }
}

impl AdapterConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable duplicate-identifier filtering.
    pub fn deduplicate_objects(mut self, enabled: bool) -> Self {
        self.deduplicate_objects = enabled;
        self
    }

    /// Enable or disable the full reload on the first update.
    pub fn reload_on_first_update(mut self, enabled: bool) -> Self {
        self.reload_on_first_update = enabled;
        self
    }

    /// Give this adapter its own assertion mode.
    pub fn assertion_mode(mut self, mode: AssertionMode) -> Self {
        self.assertion_mode = Some(mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::default();
        assert!(config.deduplicate_objects);
        assert!(config.reload_on_first_update);
        assert!(config.assertion_mode.is_none());
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::new()
            .deduplicate_objects(false)
            .assertion_mode(AssertionMode::Log);
        assert!(!config.deduplicate_objects);
        assert!(config.reload_on_first_update);
        assert_eq!(config.assertion_mode, Some(AssertionMode::Log));
    }
}
