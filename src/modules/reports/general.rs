use std::fs;
use std::path::PathBuf;

use log::info;
use snafu::ResultExt;

use crate::errors::{Error, IoSnafu, ReportSnafu};
use crate::modules::config::Config;

/// one report over one event result. a generator loads the raw document,
/// runs its transforms and writes its tables to the summaries folder
pub trait ReportGenerator {
    fn generate(&self) -> Result<(), Error>;
}

/// # save a report table
/// write one table as a delimited file into the summaries folder of the
/// event. the folder is created when it does not exist yet
///
/// ## Arguments
/// * `config` - the pipeline configuration
/// * `event_id` - the number of the event in the series
/// * `report_name` - the file name of the report, without extension
/// * `header` - the column names
/// * `rows` - the table rows, one record per row
///
/// ## Returns
/// * `PathBuf` - the path the report was written to
pub fn save_report(
    config: &Config,
    event_id: i32,
    report_name: &str,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
) -> Result<PathBuf, Error> {
    let report_dir = config.summaries_dir(event_id);
    if !report_dir.exists() {
        fs::create_dir_all(&report_dir).context(IoSnafu {
            path: report_dir.clone(),
        })?;
    }

    let report_path = report_dir.join(format!(
        "{}.{}",
        report_name,
        config.report_format.extension()
    ));

    let mut writer = csv::Writer::from_path(&report_path).context(ReportSnafu {
        path: report_path.clone(),
    })?;
    writer.write_record(&header).context(ReportSnafu {
        path: report_path.clone(),
    })?;
    for row in rows {
        writer.write_record(&row).context(ReportSnafu {
            path: report_path.clone(),
        })?;
    }
    writer.flush().context(IoSnafu {
        path: report_path.clone(),
    })?;

    info!(target: "reports:save_report", "Report {} saved successfully, path: {}", report_name, report_path.display());
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn creates_the_summaries_folder_and_writes_the_table() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            raw_results_path: dir.path().join("raw"),
            summaries_path: dir.path().join("summaries"),
            tmp_path: dir.path().join("tmp"),
            report_format: ReportFormat::Csv,
        };

        let path = save_report(
            &config,
            7,
            "per_driver_events",
            vec!["DriverName".to_string(), "Type".to_string(), "count".to_string()],
            vec![vec![
                "Alice".to_string(),
                "COLLISION_WITH_CAR".to_string(),
                "2".to_string(),
            ]],
        )
        .unwrap();

        assert_eq!(path, dir.path().join("summaries/ta-7/per_driver_events.csv"));
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, "DriverName,Type,count\nAlice,COLLISION_WITH_CAR,2\n");
    }
}
