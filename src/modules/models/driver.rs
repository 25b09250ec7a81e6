use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::lap::EnrichedLap;

/// one row of the per-driver stats report. drivers without a single valid
/// lap keep their overall columns and have no fastest lap, theoretical best
/// or optimal sectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverStats {
    pub driver_name: String,
    pub total_driving_time: String,
    pub total_laps: i32,
    pub invalid_laps: i32,
    pub fastest_lap: Option<String>,
    pub fastest_lap_at: Option<i32>,
    pub theoretical_best: Option<String>,
    pub optimal_sectors: Vec<Option<String>>,
}

struct FastestLap {
    lap_time: i64,
    lap_num: i32,
}

struct OverallStats {
    total_driving_time: i64,
    total_laps: i32,
    invalid_laps: i32,
}

impl DriverStats {
    /// # aggregate the enriched laps per driver
    /// three grouped computations joined on the driver name:
    ///
    /// * fastest valid lap, with the lap number it was set on
    /// * per-sector minima over the valid laps, and their sum as the
    ///   theoretical best
    /// * totals over all laps, valid or not
    ///
    /// the join is a left outer join starting from the totals, so every
    /// driver with at least one lap gets a row. an empty table aggregates
    /// to an empty table
    ///
    /// ## Arguments
    /// * `laps` - the enriched laps table
    /// * `sectors_amount` - the amount of timed sectors on the track
    ///
    /// ## Returns
    /// * `Vec<DriverStats>` - one row per driver, first-seen order
    pub fn from_laps(laps: &[EnrichedLap], sectors_amount: usize) -> Vec<DriverStats> {
        let fastest_laps = DriverStats::fastest_laps(laps);
        let sector_minima = DriverStats::valid_sector_minima(laps, sectors_amount);
        let (driver_order, overall_stats) = DriverStats::overall_stats(laps);

        let mut stats = Vec::with_capacity(driver_order.len());
        for driver_name in driver_order {
            let overall = overall_stats.get(&driver_name).unwrap();
            let fastest = fastest_laps.get(&driver_name);
            let minima = sector_minima.get(&driver_name);

            stats.push(DriverStats {
                total_driving_time: TimeHelper::ms_to_hours(overall.total_driving_time),
                total_laps: overall.total_laps,
                invalid_laps: overall.invalid_laps,
                fastest_lap: TimeHelper::optional_ms_to_minutes(
                    fastest.map(|fastest| fastest.lap_time),
                ),
                fastest_lap_at: fastest.map(|fastest| fastest.lap_num),
                theoretical_best: TimeHelper::optional_ms_to_minutes(
                    minima.map(|minima| minima.iter().sum()),
                ),
                optimal_sectors: (0..sectors_amount)
                    .map(|sector| {
                        TimeHelper::optional_ms_to_minutes(minima.map(|minima| minima[sector]))
                    })
                    .collect(),
                driver_name,
            });
        }

        stats
    }

    /// # fastest valid lap per driver
    /// rank 1 of the valid laps ordered by lap time. on an equal lap time
    /// the earlier row of the table wins
    fn fastest_laps(laps: &[EnrichedLap]) -> HashMap<String, FastestLap> {
        let mut fastest_laps: HashMap<String, FastestLap> = HashMap::new();
        for lap in laps {
            if !lap.valid {
                continue;
            }

            match fastest_laps.get(&lap.driver_name) {
                Some(fastest) if fastest.lap_time <= lap.lap_time => {}
                _ => {
                    fastest_laps.insert(
                        lap.driver_name.clone(),
                        FastestLap {
                            lap_time: lap.lap_time,
                            lap_num: lap.lap_num,
                        },
                    );
                }
            }
        }

        fastest_laps
    }

    /// # per-sector minima over the valid laps
    /// each sector column is minimized independently, the minima need not
    /// come from the same lap
    fn valid_sector_minima(
        laps: &[EnrichedLap],
        sectors_amount: usize,
    ) -> HashMap<String, Vec<i64>> {
        let mut sector_minima: HashMap<String, Vec<i64>> = HashMap::new();
        for lap in laps {
            if !lap.valid {
                continue;
            }

            if sector_minima.contains_key(&lap.driver_name) {
                let minima = sector_minima.get_mut(&lap.driver_name).unwrap();
                for sector in 0..sectors_amount {
                    if lap.sectors[sector] < minima[sector] {
                        minima[sector] = lap.sectors[sector];
                    }
                }
            } else {
                sector_minima.insert(lap.driver_name.clone(), lap.sectors.clone());
            }
        }

        sector_minima
    }

    /// # totals over all laps
    /// driving time, lap count and invalid lap count per driver, valid and
    /// invalid laps alike. also reports the first-seen driver order so the
    /// output table is deterministic
    fn overall_stats(laps: &[EnrichedLap]) -> (Vec<String>, HashMap<String, OverallStats>) {
        let mut driver_order: Vec<String> = Vec::new();
        let mut overall_stats: HashMap<String, OverallStats> = HashMap::new();

        for lap in laps {
            if !overall_stats.contains_key(&lap.driver_name) {
                driver_order.push(lap.driver_name.clone());
                overall_stats.insert(
                    lap.driver_name.clone(),
                    OverallStats {
                        total_driving_time: 0,
                        total_laps: 0,
                        invalid_laps: 0,
                    },
                );
            }

            let stats = overall_stats.get_mut(&lap.driver_name).unwrap();
            stats.total_driving_time += lap.lap_time;
            stats.total_laps += 1;
            if !lap.valid {
                stats.invalid_laps += 1;
            }
        }

        (driver_order, overall_stats)
    }

    pub fn csv_header(sectors_amount: usize) -> Vec<String> {
        let mut header: Vec<String> = [
            "DriverName",
            "TotalDrivingTime",
            "TotalLaps",
            "InvalidLaps",
            "FastestLap",
            "FastestLapAt",
            "TheoreticalBest",
        ]
        .iter()
        .map(|column| column.to_string())
        .collect();

        for sector in 1..=sectors_amount {
            header.push(format!("OptimalS{}", sector));
        }

        header
    }

    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.driver_name.clone(),
            self.total_driving_time.clone(),
            self.total_laps.to_string(),
            self.invalid_laps.to_string(),
            self.fastest_lap.clone().unwrap_or_default(),
            self.fastest_lap_at
                .map(|lap_num| lap_num.to_string())
                .unwrap_or_default(),
            self.theoretical_best.clone().unwrap_or_default(),
        ];

        for optimal in &self.optimal_sectors {
            record.push(optimal.clone().unwrap_or_default());
        }

        record
    }
}
