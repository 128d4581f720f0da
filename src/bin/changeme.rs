//! Thin CLI wrapper around the `changeme` library: argument parsing, subnet
//! enumeration, and output formatting live here, outside the crate's
//! tested core.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use regex::Regex;

use changeme::catalogue;
use changeme::config::ScanConfig;
use changeme::http_client::{AdapterConfig, HttpAdapter};
use changeme::reporter::LoggingReporter;
use changeme::target;

const BANNER: &str = r#"
  #####################################################
 #       _                                             #
 #   ___| |__   __ _ _ __   __ _  ___ _ __ ___   ___   #
 #  / __| '_ \ / _` | '_ \ / _` |/ _ \ '_ ` _ \ / _ \   #
 # | (__| | | | (_| | | | | (_| |  __/ | | | | |  __/   #
 #  \___|_| |_|\__,_|_| |_|\__, |\___|_| |_| |_|\___|   #
 #                         |___/                        #
 #  Default Credential Scanner                          #
  #####################################################
"#;

#[derive(Parser, Debug)]
#[command(name = "changeme", about = "Default credential scanner", version)]
struct Cli {
    /// Directory of .yml credential profiles to load.
    #[arg(long, default_value = "creds")]
    creds: PathBuf,

    /// Subnet or IP to scan, e.g. 10.0.0.0/24.
    #[arg(short = 's', long)]
    subnet: Option<String>,

    /// File of targets to scan, one host per line.
    #[arg(long)]
    targets: Option<PathBuf>,

    /// Narrow testing to the supplied credential name.
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Category of default creds to scan for.
    #[arg(short = 'c', long)]
    category: Option<String>,

    /// Number of concurrent worker threads.
    #[arg(short = 't', long, default_value_t = 10)]
    threads: usize,

    /// Timeout in seconds for a request.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// HTTP(S) proxy, e.g. http://127.0.0.1:8080.
    #[arg(short = 'p', long)]
    proxy: Option<String>,

    /// Fingerprint targets, but don't check creds.
    #[arg(short = 'f', long)]
    fingerprint: bool,

    /// Print URLs to be scanned, but don't scan them.
    #[arg(short = 'r', long)]
    dryrun: bool,

    /// Load and validate the catalogue, then exit.
    #[arg(long)]
    validate: bool,

    /// Print all loaded credentials, then exit.
    #[arg(long)]
    dump: bool,

    /// Print the catalogue's contributor set, then exit.
    #[arg(long)]
    contributors: bool,

    /// Verbose output.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Debug output.
    #[arg(short = 'd', long)]
    debug: bool,

    /// Write logs to this file instead of stderr.
    #[arg(short = 'l', long)]
    log: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else if cli.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    let mut logger = env_logger::Builder::new();
    logger.filter_level(level);
    if let Some(path) = &cli.log {
        match fs::File::create(path) {
            Ok(file) => {
                logger.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("failed to open log file {}: {e}", path.display());
            }
        }
    }
    logger.init();

    println!("{BANNER}");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if cli.validate {
        let report = catalogue::load(&cli.creds, None, None);
        print_load_summary(&report);
        for (path, err) in &report.skipped {
            log::error!("{}: {}", path.display(), err);
        }
        return Ok(());
    }

    if cli.subnet.is_none() && cli.targets.is_none() && !cli.contributors && !cli.dump {
        return Err("Need to supply a subnet or targets file.".to_string());
    }

    let proxy = match &cli.proxy {
        Some(p) => Some(validate_proxy(p)?),
        None => None,
    };

    let report = catalogue::load(&cli.creds, cli.name.as_deref(), cli.category.as_deref());
    print_load_summary(&report);

    if cli.contributors {
        for c in catalogue::contributors(&report.profiles) {
            println!("{c}");
        }
    }

    if cli.dump {
        for (name, creds) in catalogue::dump_view(&report.profiles) {
            println!("\n{name}");
            for (user, pass) in creds {
                println!("  - {user}:{pass}");
            }
        }
    }

    let targets = collect_targets(cli)?;
    log::info!("Loaded {} targets", targets.len());

    let urls = target::expand(&targets, &report.profiles, cli.name.as_deref(), cli.category.as_deref());

    if cli.dryrun {
        for u in &urls {
            println!("{}", u.url);
        }
        return Ok(());
    }

    log::info!("Scanning {} URLs", urls.len());

    let adapter = HttpAdapter::new(&AdapterConfig {
        timeout: Duration::from_secs(cli.timeout),
        proxy,
    })
    .map_err(|e| e.to_string())?;

    let config = ScanConfig {
        threads: cli.threads,
        timeout: Duration::from_secs(cli.timeout),
        proxy: cli.proxy.clone(),
        fingerprint_only: cli.fingerprint,
    };

    let profiles = Arc::new(report.profiles);
    let reporter = Arc::new(LoggingReporter);

    changeme::scanner::run(urls, profiles, &config, adapter, reporter);

    Ok(())
}

fn print_load_summary(report: &catalogue::LoadReport) {
    println!("Loaded {} default credential profiles", report.profiles.len());
    println!("Loaded {} default credentials\n", report.total_credentials());
}

fn validate_proxy(proxy: &str) -> Result<String, String> {
    let re = Regex::new(r"^https?://[0-9.]+:[0-9]{1,5}$").unwrap();
    if re.is_match(proxy) {
        Ok(proxy.to_string())
    } else {
        Err(format!("Invalid proxy {proxy:?}, must be http(s)://x.x.x.x:8080"))
    }
}

fn collect_targets(cli: &Cli) -> Result<Vec<String>, String> {
    let mut targets = Vec::new();

    if let Some(subnet) = &cli.subnet {
        let net: ipnet::IpNet = subnet
            .parse()
            .map_err(|e| format!("invalid subnet {subnet:?}: {e}"))?;
        targets.extend(net.hosts().map(|ip| ip.to_string()));
    }

    if let Some(path) = &cli.targets {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read targets file {}: {e}", path.display()))?;
        targets.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }

    Ok(targets)
}
