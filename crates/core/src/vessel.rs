//! Vessel classification.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Broad vessel category, as recorded on the vessel particulars page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VesselType {
    Tanker,
    BulkCarrier,
    Container,
    GeneralCargo,
    Passenger,
    Offshore,
    Other,
}

impl VesselType {
    /// The database representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tanker => "TANKER",
            Self::BulkCarrier => "BULK_CARRIER",
            Self::Container => "CONTAINER",
            Self::GeneralCargo => "GENERAL_CARGO",
            Self::Passenger => "PASSENGER",
            Self::Offshore => "OFFSHORE",
            Self::Other => "OTHER",
        }
    }

    /// Parse the database representation.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "TANKER" => Ok(Self::Tanker),
            "BULK_CARRIER" => Ok(Self::BulkCarrier),
            "CONTAINER" => Ok(Self::Container),
            "GENERAL_CARGO" => Ok(Self::GeneralCargo),
            "PASSENGER" => Ok(Self::Passenger),
            "OFFSHORE" => Ok(Self::Offshore),
            "OTHER" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown vessel type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_type() {
        for vessel_type in [
            VesselType::Tanker,
            VesselType::BulkCarrier,
            VesselType::Container,
            VesselType::GeneralCargo,
            VesselType::Passenger,
            VesselType::Offshore,
            VesselType::Other,
        ] {
            assert_eq!(VesselType::parse(vessel_type.as_str()).unwrap(), vessel_type);
        }
    }
}
