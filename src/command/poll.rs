use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::argsets::PollArgs;
use crate::data_mgmt::output::{select_log_path, CsvSink};
use crate::data_mgmt::run_polling_cycle;
use crate::helpers::base_path;
use crate::node_mgmt::config::ConfigStore;
use crate::readers::modbus_tcp::RegisterClient;

/// Run one polling cycle; failures are logged, never turned into an exit code
pub fn poll(args: PollArgs) -> Result<()> {
    let store = super::sensors_store(args.sensors_file);
    let client = super::modbus_client();
    poll_once(&store, &client, args.csv_file.as_deref());
    Ok(())
}

pub(super) fn poll_once<C: RegisterClient>(store: &ConfigStore, client: &C, csv_file: Option<&Path>) {
    let csv_path: PathBuf = match csv_file {
        Some(path) => path.to_path_buf(),
        None => select_log_path(&base_path::CSV_FILE, &base_path::CSV_FALLBACK_FILE),
    };

    match run_polling_cycle(store, client, || CsvSink::open(&csv_path)) {
        Ok(summary) => log::info!(
            "Polling cycle finished: {} polled, {} logged to {}, {} failed",
            summary.polled,
            summary.logged,
            csv_path.display(),
            summary.failed
        ),
        Err(e) => log::error!("Polling cycle aborted: {}", e),
    }
}
