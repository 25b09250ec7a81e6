use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// the raw result document could not be obtained at all. nothing is
    /// processed and no report is written when this happens
    #[snafu(display("raw result of event ta-{} is unavailable: {}", event_id, reason))]
    SourceUnavailable { event_id: i32, reason: String },

    #[snafu(display("malformed record, field {}: {}", field, details))]
    MalformedRecord { field: String, details: String },

    #[snafu(display(
        "lap of {} has {} sectors, the track is configured with {}",
        driver_name,
        actual,
        expected
    ))]
    SectorCountMismatch {
        driver_name: String,
        expected: usize,
        actual: usize,
    },

    #[snafu(display("report format {} is not supported, only csv is", requested))]
    UnsupportedFormat { requested: String },

    #[snafu(display("could not access {}: {}", path.display(), source))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("could not write report {}: {}", path.display(), source))]
    Report { path: PathBuf, source: csv::Error },
}
