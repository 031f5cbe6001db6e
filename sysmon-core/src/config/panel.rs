//! Character panel geometry

/// Character panel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Visible characters per row
    pub columns: u8,
    /// Visible rows (1-4)
    pub rows: u8,
}

impl Default for PanelConfig {
    /// The common 16x2 keypad shield
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 2,
        }
    }
}
