/// A device thrown to capture the opposing combatant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureDevice {
    pub name: &'static str,
    pub description: &'static str,
    /// Base catch-rate multiplier, always >= 1.0.
    pub catch_rate_multiplier: f64,
}

/// A consumable that restores a fixed amount of health to the active combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestorativeItem {
    pub name: &'static str,
    pub description: &'static str,
    pub heal_amount: u32,
}
