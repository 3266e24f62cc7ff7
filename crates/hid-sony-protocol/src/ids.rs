//! Sony USB vendor and product ID constants.

use serde::{Deserialize, Serialize};

/// Sony Interactive Entertainment USB Vendor ID.
pub const SONY_VENDOR_ID: u16 = 0x054C;

/// DualShock 4 product IDs (first revision, second revision, wireless adapter).
pub const DUALSHOCK4_PRODUCT_IDS: [u16; 3] = [0x05C4, 0x09CC, 0x05C5];

/// DualSense product ID.
pub const DUALSENSE_PRODUCT_ID: u16 = 0x0CE6;

/// DualSense Edge product ID.
pub const DUALSENSE_EDGE_PRODUCT_ID: u16 = 0x0DF2;

/// Controller family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceModel {
    /// DualShock 4 (PS4)
    DualShock4,
    /// DualSense (PS5)
    DualSense,
    /// DualSense Edge (PS5 pro controller)
    DualSenseEdge,
}

impl DeviceModel {
    /// Classify a Sony product ID.
    ///
    /// # Examples
    /// ```
    /// use dualhaptics_hid_sony_protocol::DeviceModel;
    /// assert_eq!(DeviceModel::from_product_id(0x0CE6), Some(DeviceModel::DualSense));
    /// assert_eq!(DeviceModel::from_product_id(0x09CC), Some(DeviceModel::DualShock4));
    /// assert_eq!(DeviceModel::from_product_id(0x0001), None);
    /// ```
    pub fn from_product_id(product_id: u16) -> Option<Self> {
        match product_id {
            0x05C4 | 0x09CC | 0x05C5 => Some(DeviceModel::DualShock4),
            DUALSENSE_PRODUCT_ID => Some(DeviceModel::DualSense),
            DUALSENSE_EDGE_PRODUCT_ID => Some(DeviceModel::DualSenseEdge),
            _ => None,
        }
    }

    /// Classify a vendor/product pair, rejecting non-Sony vendors.
    pub fn from_ids(vendor_id: u16, product_id: u16) -> Option<Self> {
        if vendor_id != SONY_VENDOR_ID {
            return None;
        }
        Self::from_product_id(product_id)
    }

    /// Human-readable model name.
    pub fn name(self) -> &'static str {
        match self {
            DeviceModel::DualShock4 => "DualShock 4",
            DeviceModel::DualSense => "DualSense",
            DeviceModel::DualSenseEdge => "DualSense Edge",
        }
    }
}

impl std::fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `true` if `product_id` is a known Sony controller.
///
/// # Examples
/// ```
/// use dualhaptics_hid_sony_protocol::ids::is_supported_product;
/// assert!(is_supported_product(0x0DF2));
/// assert!(!is_supported_product(0xFFFF));
/// ```
pub fn is_supported_product(product_id: u16) -> bool {
    DeviceModel::from_product_id(product_id).is_some()
}
