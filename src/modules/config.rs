use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::errors::{Error, UnsupportedFormatSnafu};

pub const DEFAULT_SECTORS_AMOUNT: usize = 3;

/// the output format of the generated reports. only a delimited text table
/// is supported, anything else is rejected before processing starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
}

impl ReportFormat {
    pub fn parse(requested: &str) -> Result<ReportFormat, Error> {
        match requested {
            "csv" => Ok(ReportFormat::Csv),
            other => UnsupportedFormatSnafu { requested: other }.fail(),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
        }
    }
}

/// # pipeline configuration
/// paths and report settings for a single run. built once from the
/// environment and passed into every component, nothing reads the
/// environment after this
///
/// ## Recognized variables
/// * `RAW_RESULTS_PATH` - folder holding the raw `ta-<event>.json` documents
/// * `SUMMARIES_PATH` - folder the per-event report folders are created in
/// * `TMP_PATH` - staging folder for fetched documents before they land in
///   the results folder
/// * `REPORT_FORMAT` - report output format, only `csv` is accepted
#[derive(Debug, Clone)]
pub struct Config {
    pub raw_results_path: PathBuf,
    pub summaries_path: PathBuf,
    pub tmp_path: PathBuf,
    pub report_format: ReportFormat,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        dotenv().ok();

        let raw_results_path =
            env::var("RAW_RESULTS_PATH").unwrap_or_else(|_| "results/raw".to_string());
        let summaries_path =
            env::var("SUMMARIES_PATH").unwrap_or_else(|_| "summaries".to_string());
        let tmp_path = env::var("TMP_PATH").unwrap_or_else(|_| "tmp".to_string());
        let report_format = env::var("REPORT_FORMAT").unwrap_or_else(|_| "csv".to_string());

        Ok(Config {
            raw_results_path: PathBuf::from(raw_results_path),
            summaries_path: PathBuf::from(summaries_path),
            tmp_path: PathBuf::from(tmp_path),
            report_format: ReportFormat::parse(&report_format)?,
        })
    }

    /// staging file a fetched document is written to before it is moved
    /// into the results folder
    pub fn tmp_result_file(&self, event_id: i32) -> PathBuf {
        self.tmp_path.join(format!("ta-{}.json", event_id))
    }

    /// the raw result document of an event
    pub fn raw_result_file(&self, event_id: i32) -> PathBuf {
        self.raw_results_path.join(format!("ta-{}.json", event_id))
    }

    /// the folder the reports of an event are written to
    pub fn summaries_dir(&self, event_id: i32) -> PathBuf {
        self.summaries_path.join(format!("ta-{}", event_id))
    }
}
