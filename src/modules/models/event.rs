use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, MalformedRecordSnafu};
use crate::modules::models::raw_result::RawEvent;

/// one flat row of the events table. the nested driver object of the raw
/// record is reduced to the driver name during mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRow {
    pub driver_name: String,
    pub event_type: String,
}

impl EventRow {
    /// # map the raw events to flat rows
    /// promotes the nested `Driver.Name` to a top level column and drops
    /// the rest of the nested object. an event without a driver name is a
    /// malformed record and aborts the run
    pub fn from_raw_events(events: &[RawEvent]) -> Result<Vec<EventRow>, Error> {
        let mut rows = Vec::with_capacity(events.len());

        for (index, event) in events.iter().enumerate() {
            let driver_name = match event
                .driver
                .as_ref()
                .and_then(|driver| driver.name.as_ref())
            {
                Some(name) => name.clone(),
                None => {
                    return MalformedRecordSnafu {
                        field: "Driver.Name",
                        details: format!("event record {} has no driver name", index),
                    }
                    .fail()
                }
            };

            rows.push(EventRow {
                driver_name,
                event_type: event.event_type.clone(),
            });
        }

        Ok(rows)
    }
}

/// occurrence count of one event type for one driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventTally {
    pub driver_name: String,
    pub event_type: String,
    pub count: i32,
}

impl EventTally {
    /// # count events per driver and type
    /// grouped occurrence counts, ordered by count descending. equal counts
    /// are ordered by driver name and event type so the report is stable
    /// between runs
    pub fn from_rows(rows: &[EventRow]) -> Vec<EventTally> {
        let mut counts: HashMap<(String, String), i32> = HashMap::new();
        for row in rows {
            *counts
                .entry((row.driver_name.clone(), row.event_type.clone()))
                .or_insert(0) += 1;
        }

        let mut tallies: Vec<EventTally> = counts
            .into_iter()
            .map(|((driver_name, event_type), count)| EventTally {
                driver_name,
                event_type,
                count,
            })
            .collect();

        tallies.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.driver_name.cmp(&b.driver_name))
                .then_with(|| a.event_type.cmp(&b.event_type))
        });

        tallies
    }

    pub fn csv_header() -> Vec<String> {
        vec![
            "DriverName".to_string(),
            "Type".to_string(),
            "count".to_string(),
        ]
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.driver_name.clone(),
            self.event_type.clone(),
            self.count.to_string(),
        ]
    }
}
