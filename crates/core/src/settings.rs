//! Process-wide game settings
//!
//! Created at startup, mutated only through start-screen commands, and read by
//! the game when it clears rows.

/// Player-toggleable settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Flash cleared rows before removing them (photosensitivity toggle)
    pub flash_effect: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { flash_effect: true }
    }
}

impl Settings {
    /// Flip the flash effect, returning the new value
    pub fn toggle_flash_effect(&mut self) -> bool {
        self.flash_effect = !self.flash_effect;
        self.flash_effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_on_by_default_and_toggles() {
        let mut settings = Settings::default();
        assert!(settings.flash_effect);
        assert!(!settings.toggle_flash_effect());
        assert!(settings.toggle_flash_effect());
    }
}
