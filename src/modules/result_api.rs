use std::fs;

use log::info;
use snafu::ResultExt;

use crate::errors::{Error, IoSnafu, SourceUnavailableSnafu};
use crate::modules::config::Config;
use crate::modules::models::raw_result::RawEventResult;

/// # load the raw result of an event
/// reads the raw result document from the results folder. when the file is
/// not there yet and a result url is given, the document is fetched once
/// and cached at that path, later runs read the cached file. a missing file
/// without a url to fetch from aborts the run
///
/// ## Arguments
/// * `config` - the pipeline configuration
/// * `event_id` - the number of the event in the series
/// * `result_url` - the url to fetch the raw result from, if any
///
/// ## Returns
/// * `RawEventResult` - the parsed raw result document
pub fn load_event_result(
    config: &Config,
    event_id: i32,
    result_url: Option<&str>,
) -> Result<RawEventResult, Error> {
    let file_path = config.raw_result_file(event_id);

    if !file_path.exists() {
        let url = match result_url {
            Some(url) => url,
            None => {
                return SourceUnavailableSnafu {
                    event_id,
                    reason: format!(
                        "no raw result at {} and no result url configured",
                        file_path.display()
                    ),
                }
                .fail()
            }
        };

        let body = fetch_event_result(event_id, url)?;

        // stage the download, a partial file must never sit in the results
        // folder
        let tmp_path = config.tmp_result_file(event_id);
        if let Some(parent) = tmp_path.parent() {
            fs::create_dir_all(parent).context(IoSnafu {
                path: parent.to_path_buf(),
            })?;
        }
        fs::write(&tmp_path, &body).context(IoSnafu {
            path: tmp_path.clone(),
        })?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).context(IoSnafu {
                path: parent.to_path_buf(),
            })?;
        }
        fs::rename(&tmp_path, &file_path).context(IoSnafu {
            path: file_path.clone(),
        })?;
        info!(target: "result_api:load_event_result", "cached raw result of event ta-{} at {}", event_id, file_path.display());
    }

    let body = fs::read_to_string(&file_path).context(IoSnafu {
        path: file_path.clone(),
    })?;

    match serde_json::from_str::<RawEventResult>(&body) {
        Ok(event_result) => Ok(event_result),
        Err(error) => SourceUnavailableSnafu {
            event_id,
            reason: format!(
                "raw result at {} is not valid json: {}",
                file_path.display(),
                error
            ),
        }
        .fail(),
    }
}

fn fetch_event_result(event_id: i32, url: &str) -> Result<String, Error> {
    info!(target: "result_api:fetch_event_result", "Getting result of event ta-{} from {}", event_id, url);

    let response = match reqwest::blocking::get(url) {
        Ok(response) => response,
        Err(error) => {
            return SourceUnavailableSnafu {
                event_id,
                reason: format!("fetch from {} failed: {}", url, error),
            }
            .fail()
        }
    };

    match response.text() {
        Ok(body) => Ok(body),
        Err(error) => SourceUnavailableSnafu {
            event_id,
            reason: format!("could not read the response of {}: {}", url, error),
        }
        .fail(),
    }
}
