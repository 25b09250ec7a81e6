use serde::{Deserialize, Serialize};

use crate::errors::{Error, MalformedRecordSnafu};

/// the raw result document of one event as the simulation server exports
/// it. one document per event, top level keys `Laps` and `Events`
#[derive(Debug, Deserialize)]
pub struct RawEventResult {
    #[serde(rename = "Laps")]
    pub laps: Vec<RawLap>,
    #[serde(rename = "Events", default)]
    pub events: Vec<RawEvent>,
}

/// one lap attempt as reported by the server. the pipeline consumes the
/// driver name, lap time, sectors, cuts and timestamp. the rest is carried
/// along untouched and never shows up in a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLap {
    #[serde(rename = "DriverName")]
    pub driver_name: String,
    #[serde(rename = "LapTime")]
    pub lap_time: i64,
    #[serde(rename = "Sectors")]
    pub sectors: SectorTimes,
    #[serde(rename = "Cuts")]
    pub cuts: i32,
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,

    #[serde(rename = "BallastKG", default)]
    pub ballast_kg: Option<i64>,
    #[serde(rename = "CarId", default)]
    pub car_id: Option<i64>,
    #[serde(rename = "CarModel", default)]
    pub car_model: Option<String>,
    #[serde(rename = "ClassID", default)]
    pub class_id: Option<String>,
    #[serde(rename = "ContributedToFastestLap", default)]
    pub contributed_to_fastest_lap: Option<bool>,
    #[serde(rename = "DriverGuid", default)]
    pub driver_guid: Option<String>,
    #[serde(rename = "Restrictor", default)]
    pub restrictor: Option<i64>,
    #[serde(rename = "Tyre", default)]
    pub tyre: Option<String>,
    #[serde(rename = "SpeedTrapHits", default)]
    pub speed_trap_hits: Option<i64>,
}

/// the per-sector times of a lap. live exports carry a json list, archived
/// documents sometimes carry the list re-encoded as a string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectorTimes {
    Listed(Vec<i64>),
    Encoded(String),
}

impl SectorTimes {
    /// # numeric sector values
    /// decode the `"[1000,2000,3000]"` form when needed. the amount of
    /// values is not checked here, the enrichment step validates it against
    /// the configured sector count
    pub fn values(&self, driver_name: &str) -> Result<Vec<i64>, Error> {
        match self {
            SectorTimes::Listed(values) => Ok(values.clone()),
            SectorTimes::Encoded(text) => {
                let inner = text.trim().trim_start_matches('[').trim_end_matches(']');
                if inner.trim().is_empty() {
                    return Ok(Vec::new());
                }

                let mut values = Vec::new();
                for part in inner.split(',') {
                    match part.trim().parse::<i64>() {
                        Ok(value) => values.push(value),
                        Err(_) => {
                            return MalformedRecordSnafu {
                                field: "Sectors",
                                details: format!(
                                    "lap of {} has a non numeric sector value '{}'",
                                    driver_name,
                                    part.trim()
                                ),
                            }
                            .fail()
                        }
                    }
                }

                Ok(values)
            }
        }
    }
}

/// one non-lap occurrence (collision, off track) attributed to a driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "Type")]
    pub event_type: String,
    #[serde(rename = "Driver")]
    pub driver: Option<EventDriver>,
    #[serde(rename = "OtherDriver", default)]
    pub other_driver: Option<EventDriver>,
    #[serde(rename = "ImpactSpeed", default)]
    pub impact_speed: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDriver {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Guid", default)]
    pub guid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_result_document() {
        let document = r#"{
            "Laps": [
                {
                    "DriverName": "Alice",
                    "LapTime": 90000,
                    "Sectors": [30000, 30000, 30000],
                    "Cuts": 0,
                    "Timestamp": 1000,
                    "CarModel": "ks_mazda_mx5_cup",
                    "Tyre": "SM",
                    "BallastKG": 0
                }
            ],
            "Events": [
                {
                    "Type": "COLLISION_WITH_ENV",
                    "Driver": {"Name": "Alice", "Guid": "7656100000000"},
                    "ImpactSpeed": 12.5
                }
            ]
        }"#;

        let result: RawEventResult = serde_json::from_str(document).unwrap();
        assert_eq!(result.laps.len(), 1);
        assert_eq!(result.laps[0].driver_name, "Alice");
        assert_eq!(result.laps[0].car_model.as_deref(), Some("ks_mazda_mx5_cup"));
        assert_eq!(result.events.len(), 1);
        assert_eq!(
            result.events[0].driver.as_ref().unwrap().name.as_deref(),
            Some("Alice")
        );
    }

    #[test]
    fn sector_values_from_a_json_list() {
        let sectors = SectorTimes::Listed(vec![1000, 2000, 3000]);
        assert_eq!(sectors.values("Alice").unwrap(), vec![1000, 2000, 3000]);
    }

    #[test]
    fn sector_values_from_the_string_encoded_form() {
        let sectors = SectorTimes::Encoded("[1000, 2000, 3000]".to_string());
        assert_eq!(sectors.values("Alice").unwrap(), vec![1000, 2000, 3000]);
    }

    #[test]
    fn non_numeric_sector_values_are_rejected() {
        let sectors = SectorTimes::Encoded("[1000,oops,3000]".to_string());
        match sectors.values("Alice") {
            Err(Error::MalformedRecord { field, .. }) => assert_eq!(field, "Sectors"),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn a_document_without_events_still_loads() {
        let document = r#"{"Laps": []}"#;
        let result: RawEventResult = serde_json::from_str(document).unwrap();
        assert!(result.laps.is_empty());
        assert!(result.events.is_empty());
    }
}
