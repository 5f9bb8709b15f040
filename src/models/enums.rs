//! Shared domain enums, stored as TEXT columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements the sqlx conversions for an enum persisted through its `as_str` / `FromStr` pair
macro_rules! impl_pg_text {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as Decode<Postgres>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Availability of a piece of equipment. There is no intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Available,
    CheckedOut,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::CheckedOut => "checked_out",
        }
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(EquipmentStatus::Available),
            "checked_out" => Ok(EquipmentStatus::CheckedOut),
            _ => Err(format!("Invalid equipment status: {}", s)),
        }
    }
}

impl_pg_text!(EquipmentStatus);

// ---------------------------------------------------------------------------
// EquipmentCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    Camera,
    Microphone,
    Tripod,
    Lighting,
    #[default]
    Other,
}

impl EquipmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCategory::Camera => "camera",
            EquipmentCategory::Microphone => "microphone",
            EquipmentCategory::Tripod => "tripod",
            EquipmentCategory::Lighting => "lighting",
            EquipmentCategory::Other => "other",
        }
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "camera" => Ok(EquipmentCategory::Camera),
            "microphone" => Ok(EquipmentCategory::Microphone),
            "tripod" => Ok(EquipmentCategory::Tripod),
            "lighting" => Ok(EquipmentCategory::Lighting),
            "other" => Ok(EquipmentCategory::Other),
            _ => Err(format!("Invalid equipment category: {}", s)),
        }
    }
}

impl_pg_text!(EquipmentCategory);

// ---------------------------------------------------------------------------
// ScanAction
// ---------------------------------------------------------------------------

/// What a scan does to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScanAction {
    Checkout,
    Return,
}

impl ScanAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanAction::Checkout => "checkout",
            ScanAction::Return => "return",
        }
    }

    /// Status the item must currently have for this action to apply
    pub fn required_status(&self) -> EquipmentStatus {
        match self {
            ScanAction::Checkout => EquipmentStatus::Available,
            ScanAction::Return => EquipmentStatus::CheckedOut,
        }
    }

    /// Status the item has once the action is applied
    pub fn resulting_status(&self) -> EquipmentStatus {
        match self {
            ScanAction::Checkout => EquipmentStatus::CheckedOut,
            ScanAction::Return => EquipmentStatus::Available,
        }
    }
}

impl std::str::FromStr for ScanAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checkout" => Ok(ScanAction::Checkout),
            "return" => Ok(ScanAction::Return),
            _ => Err(format!("Invalid action: {} (expected checkout or return)", s)),
        }
    }
}

impl_pg_text!(ScanAction);
