//! Fixed catalogs of capture devices and restorative items.
//!
//! Both catalogs are closed: a name maps to one immutable record, and new
//! behavior is added by adding entries, not types. The maps are built at
//! compile time.

use phf::phf_map;
use schema::{CaptureDevice, RestorativeItem};

static CAPTURE_DEVICES: phf::Map<&'static str, CaptureDevice> = phf_map! {
    "Basic Trap" => CaptureDevice {
        name: "Basic Trap",
        description: "A basic trap for catching creatures.",
        catch_rate_multiplier: 1.0,
    },
    "Super Trap" => CaptureDevice {
        name: "Super Trap",
        description: "A better trap with higher success rate.",
        catch_rate_multiplier: 1.5,
    },
    "Ultra Trap" => CaptureDevice {
        name: "Ultra Trap",
        description: "The best trap available!",
        catch_rate_multiplier: 2.0,
    },
};

static RESTORATIVES: phf::Map<&'static str, RestorativeItem> = phf_map! {
    "Potion" => RestorativeItem {
        name: "Potion",
        description: "Restores 20 HP",
        heal_amount: 20,
    },
    "Super Potion" => RestorativeItem {
        name: "Super Potion",
        description: "Restores 50 HP",
        heal_amount: 50,
    },
};

/// Look up a capture device by its exact catalog name.
pub fn capture_device(name: &str) -> Option<&'static CaptureDevice> {
    CAPTURE_DEVICES.get(name)
}

/// Look up a restorative item by its exact catalog name.
pub fn restorative(name: &str) -> Option<&'static RestorativeItem> {
    RESTORATIVES.get(name)
}

pub fn capture_devices() -> impl Iterator<Item = &'static CaptureDevice> {
    CAPTURE_DEVICES.values()
}

pub fn restoratives() -> impl Iterator<Item = &'static RestorativeItem> {
    RESTORATIVES.values()
}
