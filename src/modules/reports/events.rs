use crate::errors::Error;
use crate::modules::config::Config;
use crate::modules::models::event::{EventRow, EventTally};
use crate::modules::reports::general::{save_report, ReportGenerator};
use crate::modules::result_api::load_event_result;

/// generates the per-driver event tallies of one event
pub struct EventsReport {
    config: Config,
    event_id: i32,
    result_url: Option<String>,
}

impl EventsReport {
    pub fn new(config: Config, event_id: i32, result_url: Option<String>) -> EventsReport {
        EventsReport {
            config,
            event_id,
            result_url,
        }
    }
}

impl ReportGenerator for EventsReport {
    fn generate(&self) -> Result<(), Error> {
        let event_result =
            load_event_result(&self.config, self.event_id, self.result_url.as_deref())?;

        let rows = EventRow::from_raw_events(&event_result.events)?;
        let per_driver_events = EventTally::from_rows(&rows);

        save_report(
            &self.config,
            self.event_id,
            "per_driver_events",
            EventTally::csv_header(),
            per_driver_events.iter().map(EventTally::to_record).collect(),
        )?;

        Ok(())
    }
}
