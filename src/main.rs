use anyhow::{anyhow, Result};
use env_logger::Env;

use mbsched::argsets;
use mbsched::command;
use mbsched::constants::{defaults, envvars};
use mbsched::helpers;

const CMD_SLEEP_TIME: &str = "sleep-time";
const CMD_POLL: &str = "poll";
const CMD_ACTUATE: &str = "actuate";
const CMD_DAEMON: &str = "daemon";
const CMD_CHECK_CONFIG: &str = "check-config";

const OPT_SENSORS: &str = "--sensors";
const OPT_SCHEDULE: &str = "--schedule";
const OPT_CSV: &str = "--csv";
const OPT_POLL_INTERVAL: &str = "--poll-interval";
const OPT_KIND: &str = "--kind";

fn main() -> Result<()> {
    let dotenv_path = helpers::load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();
    if let Some(path) = dotenv_path {
        log::debug!("Loaded {}", path.display());
    }

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_SLEEP_TIME) => command::sleep_time(argsets::SleepTimeArgs {
            schedule_file: args.opt_value_from_str(OPT_SCHEDULE)?,
        }),
        Some(CMD_POLL) => command::poll(argsets::PollArgs {
            sensors_file: args.opt_value_from_str(OPT_SENSORS)?,
            csv_file: args.opt_value_from_str(OPT_CSV)?,
        }),
        Some(CMD_ACTUATE) => command::actuate(argsets::ActuateArgs {
            schedule_file: args.opt_value_from_str(OPT_SCHEDULE)?,
        }),
        Some(CMD_DAEMON) => command::daemon(argsets::DaemonArgs {
            sensors_file: args.opt_value_from_str(OPT_SENSORS)?,
            schedule_file: args.opt_value_from_str(OPT_SCHEDULE)?,
            csv_file: args.opt_value_from_str(OPT_CSV)?,
            poll_interval: args.opt_value_from_str(OPT_POLL_INTERVAL)?,
        }),
        Some(CMD_CHECK_CONFIG) => command::check_config(argsets::CheckConfigArgs {
            kind: args
                .opt_value_from_str(OPT_KIND)?
                .unwrap_or(argsets::ConfigKind::Schedule),
            file: args.free_from_str()?,
        }),
        _ => Err(anyhow!(
            "Subcommand must be one of 'sleep-time', 'poll', 'actuate', 'daemon', 'check-config'"
        )),
    }
}
