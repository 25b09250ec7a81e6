use crate::errors::Error;
use crate::modules::config::Config;
use crate::modules::models::driver::DriverStats;
use crate::modules::models::lap::EnrichedLap;
use crate::modules::reports::general::{save_report, ReportGenerator};
use crate::modules::result_api::load_event_result;

/// generates the enriched laps table and the per-driver stats table of one
/// event. the stats are computed from the enriched table, not from the raw
/// rows
pub struct LapsReport {
    config: Config,
    event_id: i32,
    sectors_amount: usize,
    result_url: Option<String>,
}

impl LapsReport {
    pub fn new(
        config: Config,
        event_id: i32,
        sectors_amount: usize,
        result_url: Option<String>,
    ) -> LapsReport {
        LapsReport {
            config,
            event_id,
            sectors_amount,
            result_url,
        }
    }
}

impl ReportGenerator for LapsReport {
    fn generate(&self) -> Result<(), Error> {
        let event_result =
            load_event_result(&self.config, self.event_id, self.result_url.as_deref())?;

        let laps_enriched = EnrichedLap::from_raw_laps(&event_result.laps, self.sectors_amount)?;
        save_report(
            &self.config,
            self.event_id,
            "ranks_enriched_base",
            EnrichedLap::csv_header(self.sectors_amount),
            laps_enriched.iter().map(EnrichedLap::to_record).collect(),
        )?;

        let per_driver_stats = DriverStats::from_laps(&laps_enriched, self.sectors_amount);
        save_report(
            &self.config,
            self.event_id,
            "per_driver_stats",
            DriverStats::csv_header(self.sectors_amount),
            per_driver_stats.iter().map(DriverStats::to_record).collect(),
        )?;

        Ok(())
    }
}
