//! Home unlock gate.
//!
//! Browse the listings and check whether a position is close enough to unlock one.

use std::sync::Arc;

use anyhow::{anyhow, bail, Error};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use homegate::{
    Catalog, CommonCmdLineArgs, Coords, FixedLocation, GateState, Listing, LogSink, Notifier,
    UnlockSession,
};

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(ref e) = run().await {
        println!("error: {}", e);

        for cause in e.chain().skip(1) {
            println!("caused by: {}", cause);
        }

        ::std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let app = CommonCmdLineArgs::new_app("homegate", "Browse listings and unlock nearby homes.")
        .subcommand_required(true)
        .subcommand(
            Command::new("create")
                .about("Create a new on disk catalog from a JSON file. Requires --root.")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .required(true)
                        .value_name("FILE")
                        .help("JSON array of listings."),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Overwrite any existing catalog at `root`."),
                ),
        )
        .subcommand(
            Command::new("list").about("List the listings.").arg(
                Arg::new("near")
                    .long("near")
                    .num_args(2)
                    .value_names(["LAT", "LON"])
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(f64))
                    .help("Sort by distance from this point."),
            ),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single listing.")
                .arg(Arg::new("id").index(1).required(true).help("The listing id.")),
        )
        .subcommand(
            Command::new("check")
                .about("Check whether a position can unlock a listing.")
                .arg(Arg::new("id").index(1).required(true).help("The listing id."))
                .arg(
                    Arg::new("lat")
                        .long("lat")
                        .required_unless_present("deny")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Latitude of the user in degrees."),
                )
                .arg(
                    Arg::new("lon")
                        .long("lon")
                        .required_unless_present("deny")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Longitude of the user in degrees."),
                )
                .arg(
                    Arg::new("deny")
                        .long("deny")
                        .action(ArgAction::SetTrue)
                        .help("Act as if the user refused location access."),
                )
                .arg(
                    Arg::new("unlock")
                        .long("unlock")
                        .action(ArgAction::SetTrue)
                        .help("Unlock the listing if the position allows it."),
                ),
        );

    let (common_args, matches) = CommonCmdLineArgs::matches(app)?;

    match matches.subcommand() {
        Some(("create", sub_args)) => create(common_args, sub_args)?,
        Some(("list", sub_args)) => list(common_args, sub_args)?,
        Some(("show", sub_args)) => show(common_args, sub_args)?,
        Some(("check", sub_args)) => check(common_args, sub_args).await?,
        _ => unreachable!(),
    }

    Ok(())
}

fn create(common_args: CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<(), Error> {
    let root = common_args
        .root()
        .ok_or_else(|| anyhow!("create needs --root"))?;

    // Check if the catalog already exists. (any file in the way counts)
    let db_file = Catalog::db_file(&root);
    let already_exists: bool = db_file.exists();

    if already_exists && !sub_args.get_flag("force") {
        bail!("Catalog already exists, must use --force to overwrite.");
    }

    let data_file = sub_args
        .get_one::<String>("data")
        .ok_or_else(|| anyhow!("missing --data"))?;
    let text = ::std::fs::read_to_string(data_file)?;
    let listings: Vec<Listing> = Catalog::from_json(&text)?.listings()?;

    // Only replace the old catalog once the new dataset is known to be good.
    if already_exists {
        ::std::fs::remove_file(&db_file)?;
    }

    let cat = Catalog::create(&root, listings)?;
    println!("Created catalog with {} listings.", cat.len()?);

    Ok(())
}

fn list(common_args: CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<(), Error> {
    let cat = common_args.catalog()?;

    let near: Vec<f64> = sub_args
        .get_many::<f64>("near")
        .map(|vals| vals.copied().collect())
        .unwrap_or_default();

    if let [lat, lon] = near[..] {
        let here = Coords::new(lat, lon)?;
        for (listing, distance) in cat.nearest(&here)? {
            println!(
                "{:>6} {:>12.1} m  {}",
                listing.id, distance, listing.address
            );
        }
    } else {
        for listing in cat.listings()? {
            println!("{:>6}  {}", listing.id, listing.address);
        }
    }

    Ok(())
}

fn show(common_args: CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<(), Error> {
    let cat = common_args.catalog()?;
    let id = sub_args
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("missing id"))?;

    let listing = cat.require(id)?;
    println!("{}", listing.address);
    println!("  id:          {}", listing.id);
    println!("  location:    {}", listing.coords);
    println!("  image:       {}", listing.image);
    println!("  description: {}", listing.description);

    Ok(())
}

async fn check(common_args: CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<(), Error> {
    let cat = common_args.catalog()?;
    let config = common_args.config();
    let id = sub_args
        .get_one::<String>("id")
        .ok_or_else(|| anyhow!("missing id"))?;
    let listing = cat.require(id)?;

    let provider = if sub_args.get_flag("deny") {
        FixedLocation::denied()
    } else {
        let lat = sub_args.get_one::<f64>("lat").copied();
        let lon = sub_args.get_one::<f64>("lon").copied();
        match (lat, lon) {
            (Some(lat), Some(lon)) => FixedLocation::granted(Coords::new(lat, lon)?),
            _ => bail!("--lat and --lon are required"),
        }
    };

    let notifier = Notifier::init(Arc::new(LogSink), config.presentation);
    let session = UnlockSession::open(listing, &provider, notifier, Arc::new(LogSink), config).await;

    match session.state() {
        GateState::PermissionDenied => println!("Location permission denied."),
        GateState::PositionUnavailable | GateState::PermissionUnknown => {
            println!("Position unavailable.")
        }
        GateState::Evaluated(result) => println!(
            "{:.1} m from {}, unlock {}.",
            result.distance(),
            session.listing().address,
            if result.within_threshold() {
                "available"
            } else {
                "unavailable"
            }
        ),
    }

    if sub_args.get_flag("unlock") {
        session.unlock()?.await?;
        println!("Unlocked {}.", session.listing().address);
    }

    Ok(())
}
