use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, SectorCountMismatchSnafu};
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::raw_result::RawLap;

/// one lap of the enriched laps table. on top of the raw fields it carries
/// the lap number within the driver's stint, the validity flag and the
/// sector times broken out into fixed numeric columns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedLap {
    pub driver_name: String,
    pub lap_num: i32,
    pub timestamp: i64,
    pub lap_time: i64,
    pub lap_time_mins: String,
    pub cuts: i32,
    pub valid: bool,
    pub sectors: Vec<i64>,
    pub sector_mins: Vec<String>,
}

impl EnrichedLap {
    /// # enrich the raw laps table
    /// derive the enriched laps table from the flat raw rows:
    ///
    /// 1. number each driver's laps, 1-based, ordered by timestamp. ties
    ///    keep input order
    /// 2. a lap is valid when it has no track limit cuts
    /// 3. break the sector list out into exactly `sectors_amount` numeric
    ///    columns
    /// 4. order the whole table by lap time ascending. this is presentation
    ///    order only, the aggregations do not rely on it
    ///
    /// ## Arguments
    /// * `laps` - the flat laps table as mapped from the raw document
    /// * `sectors_amount` - the amount of timed sectors on the track
    ///
    /// ## Returns
    /// * `Vec<EnrichedLap>` - the enriched table, lap time ascending
    pub fn from_raw_laps(laps: &[RawLap], sectors_amount: usize) -> Result<Vec<EnrichedLap>, Error> {
        let mut laps_per_driver: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, lap) in laps.iter().enumerate() {
            if laps_per_driver.contains_key(&lap.driver_name) {
                laps_per_driver.get_mut(&lap.driver_name).unwrap().push(index);
            } else {
                laps_per_driver.insert(lap.driver_name.clone(), vec![index]);
            }
        }

        // rank every driver's laps by timestamp. the sort is stable so laps
        // with an equal timestamp keep their input order
        let mut lap_nums = vec![0; laps.len()];
        for indices in laps_per_driver.values_mut() {
            indices.sort_by_key(|&index| laps[index].timestamp);
            for (rank, &index) in indices.iter().enumerate() {
                lap_nums[index] = rank as i32 + 1;
            }
        }

        let mut enriched = Vec::with_capacity(laps.len());
        for (index, lap) in laps.iter().enumerate() {
            let sectors = lap.sectors.values(&lap.driver_name)?;
            if sectors.len() != sectors_amount {
                return SectorCountMismatchSnafu {
                    driver_name: lap.driver_name.clone(),
                    expected: sectors_amount,
                    actual: sectors.len(),
                }
                .fail();
            }

            let sector_mins = sectors
                .iter()
                .map(|&sector| TimeHelper::ms_to_minutes(sector))
                .collect();

            enriched.push(EnrichedLap {
                driver_name: lap.driver_name.clone(),
                lap_num: lap_nums[index],
                timestamp: lap.timestamp,
                lap_time: lap.lap_time,
                lap_time_mins: TimeHelper::ms_to_minutes(lap.lap_time),
                cuts: lap.cuts,
                valid: lap.cuts == 0,
                sectors,
                sector_mins,
            });
        }

        enriched.sort_by_key(|lap| lap.lap_time);
        Ok(enriched)
    }

    pub fn csv_header(sectors_amount: usize) -> Vec<String> {
        let mut header: Vec<String> = [
            "DriverName",
            "LapNum",
            "Timestamp",
            "LapTime",
            "LapTimeMins",
            "Cuts",
            "Valid",
        ]
        .iter()
        .map(|column| column.to_string())
        .collect();

        for sector in 1..=sectors_amount {
            header.push(format!("S{}", sector));
        }
        for sector in 1..=sectors_amount {
            header.push(format!("S{}Mins", sector));
        }

        header
    }

    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.driver_name.clone(),
            self.lap_num.to_string(),
            self.timestamp.to_string(),
            self.lap_time.to_string(),
            self.lap_time_mins.clone(),
            self.cuts.to_string(),
            self.valid.to_string(),
        ];

        for sector in &self.sectors {
            record.push(sector.to_string());
        }
        for sector_min in &self.sector_mins {
            record.push(sector_min.clone());
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::models::raw_result::SectorTimes;

    fn raw_lap(
        driver_name: &str,
        lap_time: i64,
        cuts: i32,
        timestamp: i64,
        sectors: Vec<i64>,
    ) -> RawLap {
        RawLap {
            driver_name: driver_name.to_string(),
            lap_time,
            sectors: SectorTimes::Listed(sectors),
            cuts,
            timestamp,
            ballast_kg: None,
            car_id: None,
            car_model: None,
            class_id: None,
            contributed_to_fastest_lap: None,
            driver_guid: None,
            restrictor: None,
            tyre: None,
            speed_trap_hits: None,
        }
    }

    #[test]
    fn lap_numbers_are_contiguous_per_driver_in_timestamp_order() {
        // laps arrive interleaved and out of timestamp order
        let laps = vec![
            raw_lap("Alice", 92_000, 1, 3_000, vec![31_000, 30_000, 31_000]),
            raw_lap("Bob", 88_000, 0, 1_500, vec![29_000, 29_500, 29_500]),
            raw_lap("Alice", 90_000, 0, 1_000, vec![30_000, 30_000, 30_000]),
            raw_lap("Alice", 85_000, 0, 2_000, vec![28_000, 28_500, 28_500]),
        ];

        let enriched = EnrichedLap::from_raw_laps(&laps, 3).unwrap();

        let mut alice: Vec<&EnrichedLap> = enriched
            .iter()
            .filter(|lap| lap.driver_name == "Alice")
            .collect();
        alice.sort_by_key(|lap| lap.lap_num);

        assert_eq!(
            alice.iter().map(|lap| lap.lap_num).collect::<Vec<i32>>(),
            vec![1, 2, 3]
        );
        // lap numbers follow the timestamps, not the input order
        assert_eq!(
            alice.iter().map(|lap| lap.timestamp).collect::<Vec<i64>>(),
            vec![1_000, 2_000, 3_000]
        );

        let bob: Vec<&EnrichedLap> = enriched
            .iter()
            .filter(|lap| lap.driver_name == "Bob")
            .collect();
        assert_eq!(bob[0].lap_num, 1);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let laps = vec![
            raw_lap("Alice", 90_000, 0, 1_000, vec![30_000, 30_000, 30_000]),
            raw_lap("Alice", 91_000, 0, 1_000, vec![30_000, 30_500, 30_500]),
        ];

        let enriched = EnrichedLap::from_raw_laps(&laps, 3).unwrap();
        let first = enriched.iter().find(|lap| lap.lap_time == 90_000).unwrap();
        let second = enriched.iter().find(|lap| lap.lap_time == 91_000).unwrap();

        assert_eq!(first.lap_num, 1);
        assert_eq!(second.lap_num, 2);
    }

    #[test]
    fn valid_tracks_the_cut_count() {
        let laps = vec![
            raw_lap("Alice", 90_000, 0, 1_000, vec![30_000, 30_000, 30_000]),
            raw_lap("Alice", 89_000, 2, 2_000, vec![29_000, 30_000, 30_000]),
        ];

        let enriched = EnrichedLap::from_raw_laps(&laps, 3).unwrap();
        for lap in &enriched {
            assert_eq!(lap.valid, lap.cuts == 0);
        }
    }

    #[test]
    fn table_is_ordered_by_lap_time() {
        let laps = vec![
            raw_lap("Alice", 92_000, 0, 1_000, vec![31_000, 30_000, 31_000]),
            raw_lap("Bob", 88_000, 0, 1_100, vec![29_000, 29_500, 29_500]),
            raw_lap("Alice", 85_000, 0, 2_000, vec![28_000, 28_500, 28_500]),
        ];

        let enriched = EnrichedLap::from_raw_laps(&laps, 3).unwrap();
        let times: Vec<i64> = enriched.iter().map(|lap| lap.lap_time).collect();
        assert_eq!(times, vec![85_000, 88_000, 92_000]);
    }

    #[test]
    fn string_encoded_sectors_are_decoded() {
        let mut lap = raw_lap("Alice", 90_000, 0, 1_000, vec![]);
        lap.sectors = SectorTimes::Encoded("[30000,30000,30000]".to_string());

        let enriched = EnrichedLap::from_raw_laps(&[lap], 3).unwrap();
        assert_eq!(enriched[0].sectors, vec![30_000, 30_000, 30_000]);
        assert_eq!(enriched[0].sector_mins[0], "0:30.000");
    }

    #[test]
    fn sector_count_mismatch_aborts_enrichment() {
        let laps = vec![raw_lap("Alice", 90_000, 0, 1_000, vec![45_000, 45_000])];

        match EnrichedLap::from_raw_laps(&laps, 3) {
            Err(Error::SectorCountMismatch {
                driver_name,
                expected,
                actual,
            }) => {
                assert_eq!(driver_name, "Alice");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected SectorCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn derived_minute_columns_match_the_raw_times() {
        let laps = vec![raw_lap("Alice", 85_000, 0, 1_000, vec![28_000, 28_500, 28_500])];

        let enriched = EnrichedLap::from_raw_laps(&laps, 3).unwrap();
        assert_eq!(enriched[0].lap_time_mins, "1:25.000");
        assert_eq!(
            enriched[0].sector_mins,
            vec!["0:28.000", "0:28.500", "0:28.500"]
        );
    }
}
