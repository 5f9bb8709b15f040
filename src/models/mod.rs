//! Data models for the equipment server

pub mod enums;
pub mod equipment;
pub mod staff;

// Re-export commonly used types
pub use enums::{EquipmentCategory, EquipmentStatus, ScanAction};
pub use equipment::{EquipmentItem, EquipmentLogDetails, EquipmentLogEntry};
pub use staff::{StaffAccount, StaffClaims, StaffRole};
