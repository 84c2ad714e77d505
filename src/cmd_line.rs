//! Command line options that are used across subcommands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{value_parser, Arg, ArgMatches, Command};

use crate::{catalog::Catalog, config::GateConfig, errors::HomeGateErr};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CommonCmdLineArgs {
    // Path to an on disk catalog, None for the bundled one.
    root: Option<PathBuf>,
    // Settings for unlock sessions.
    config: GateConfig,
}

impl CommonCmdLineArgs {
    /// Create a new set of args.
    pub fn new_app(app_name: &'static str, about: &'static str) -> Command {
        Command::new(app_name)
            .author("Ryan Leach <clumsycodemonkey@gmail.com>")
            .about(about)
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::new("root")
                    .short('r')
                    .long("root")
                    .global(true)
                    .value_name("DIR")
                    .value_parser(value_parser!(PathBuf))
                    .help("Path to the catalog.")
                    .long_help("Path to an on disk catalog. Defaults to the bundled listings."),
            )
            .arg(
                Arg::new("radius")
                    .long("radius")
                    .global(true)
                    .value_name("METERS")
                    .value_parser(value_parser!(f64))
                    .help("Unlock radius in meters, 30 if not given."),
            )
            .arg(
                Arg::new("unlock-delay-ms")
                    .long("unlock-delay-ms")
                    .global(true)
                    .value_name("MS")
                    .value_parser(value_parser!(u64))
                    .help("Delay before an unlock takes effect, 1000 if not given."),
            )
            .arg(
                Arg::new("timeout-secs")
                    .long("timeout-secs")
                    .global(true)
                    .value_name("SECS")
                    .value_parser(value_parser!(u64))
                    .help("Upper bound on each location request, 10 if not given."),
            )
            .after_help(concat!(
                "Without --root the listings compiled into the program are used.\n\n",
                "Set RUST_LOG=info to see notifications as they are posted."
            ))
    }

    /// Process a `Command` to get the parsed values out of it and the matches object so an
    /// application can continue with further argument parsing.
    pub fn matches(app: Command) -> Result<(Self, ArgMatches), HomeGateErr> {
        let matches = app.get_matches();

        let cmd_line_opts = Self::from_matches(&matches)?;

        Ok((cmd_line_opts, matches))
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, HomeGateErr> {
        let root = matches.get_one::<PathBuf>("root").cloned();

        let mut config = GateConfig::default();
        if let Some(&radius) = matches.get_one::<f64>("radius") {
            if !radius.is_finite() || radius < 0.0 {
                return Err(HomeGateErr::GeneralError(format!(
                    "invalid radius: {}",
                    radius
                )));
            }
            config.radius = radius;
        }
        if let Some(&ms) = matches.get_one::<u64>("unlock-delay-ms") {
            config.unlock_delay = Duration::from_millis(ms);
        }
        if let Some(&secs) = matches.get_one::<u64>("timeout-secs") {
            config.location_timeout = Duration::from_secs(secs);
        }

        Ok(CommonCmdLineArgs { root, config })
    }

    /// Get the root of the catalog, if one was given.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Settings for unlock sessions.
    pub fn config(&self) -> GateConfig {
        self.config
    }

    /// Open the catalog named on the command line.
    pub fn catalog(&self) -> Result<Catalog, HomeGateErr> {
        match self.root {
            Some(ref root) => Catalog::connect(root),
            None => Catalog::bundled(),
        }
    }
}
