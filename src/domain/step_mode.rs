//! Step strategy selector.
//!
//! Both strategies run the same sparse neighbor-tally pass; the parallel
//! one splits the live cells across rayon workers.

/// Available stepping strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StepMode {
    /// Single-threaded pass over the live set
    #[default]
    Serial,
    /// Rayon fold/reduce over the live set; wins for large populations
    Parallel,
}

impl StepMode {
    /// Get all available modes
    pub fn all() -> Vec<StepMode> {
        vec![StepMode::Serial, StepMode::Parallel]
    }

    /// Display name for the HUD
    pub fn name(&self) -> &'static str {
        match self {
            StepMode::Serial => "Sparse",
            StepMode::Parallel => "Sparse+Par",
        }
    }

    /// Flip between the two strategies
    pub fn toggled(self) -> Self {
        match self {
            StepMode::Serial => StepMode::Parallel,
            StepMode::Parallel => StepMode::Serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_serial() {
        assert_eq!(StepMode::default(), StepMode::Serial);
    }

    #[test]
    fn test_toggled_round_trips() {
        assert_eq!(StepMode::Serial.toggled().toggled(), StepMode::Serial);
        assert_ne!(StepMode::Serial.toggled(), StepMode::Serial);
    }
}
