use spiritling_sim::build_info;
use spiritling_sim::core::{SimulationConfig, SystemClock};
use spiritling_sim::store::JsonFileStore;
use spiritling_sim::Daemon;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, PartialEq)]
enum Command {
    Run,
    Once,
    CatchUp(Uuid),
}

#[derive(Debug, PartialEq)]
struct Cli {
    config_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<Cli, String> {
    let mut config_path = None;
    let mut command = Command::Run;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--once" => command = Command::Once,
            "catch-up" => {
                let raw = iter.next().ok_or("catch-up needs an owner id")?;
                let owner_id =
                    Uuid::parse_str(raw).map_err(|e| format!("invalid owner id {}: {}", raw, e))?;
                command = Command::CatchUp(owner_id);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Cli {
        config_path,
        command,
    })
}

fn print_help() {
    println!("Spiritling Sim - offline progress for spiritlings\n");
    println!("Usage: spiritling-sim [--config <path>] [--once | catch-up <owner-id>]\n");
    println!("Options:");
    println!("  --config   JSON config file (defaults apply to missing fields)");
    println!("  --once     Run one bulk tick and one autonomy pass, then exit");
    println!("  catch-up   Replay offline time for one owner's spiritlings");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
}

fn to_io(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("--version") | Some("-v") => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Some("--help") | Some("-h") => {
            print_help();
            return Ok(());
        }
        _ => {}
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'spiritling-sim --help' for usage.");
            std::process::exit(1);
        }
    };

    let config = match &cli.config_path {
        Some(path) => SimulationConfig::load(path).map_err(to_io)?,
        None => SimulationConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store_path = config.resolve_store_path().map_err(to_io)?;
    let store = Arc::new(JsonFileStore::open(&store_path).map_err(to_io)?);
    tracing::info!(path = %store_path.display(), "Opened store");

    let daemon = Daemon::new(store, Arc::new(SystemClock), config);

    match cli.command {
        Command::Once => {
            let (bulk, autonomy) = daemon.run_once().map_err(to_io)?;
            println!(
                "bulk tick: {} saved, {} conflicts, {} failed; autonomy: {} actions",
                bulk.saved, bulk.conflicts, bulk.failed, autonomy.actions
            );
        }
        Command::CatchUp(owner_id) => {
            let report = daemon.scheduler().catch_up(owner_id).map_err(to_io)?;
            println!(
                "caught up {} of {} spiritlings ({} minutes, {} levels, {} coins)",
                report.simulated,
                report.examined,
                report.minutes_simulated,
                report.levels_gained,
                report.coins_credited
            );
        }
        Command::Run => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(daemon.run_until(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                }
            }));
        }
    }

    Ok(())
}
