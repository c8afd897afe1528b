use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use devicecat_common::ByteView;
use devicecat_format::{CatalogError, CatalogErrorKind, DecodeOptions, DeviceCatalog};

fn print_error(error: &anyhow::Error) {
    eprintln!("ERROR: {error:#}");
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn write_report<W: Write>(out: &mut W, catalog: &DeviceCatalog) -> io::Result<()> {
    let header = catalog.header();
    writeln!(out, "Catalog info:")?;
    writeln!(out, "  signature : {:#010x}", header.signature)?;
    writeln!(out, "  devices   : {}", header.device_count)?;
    writeln!(out, "  digest    : {}", header.digest)?;
    writeln!(out, "  timestamp : {}", header.timestamp)?;
    Ok(())
}

fn write_devices<W: Write>(out: &mut W, catalog: &DeviceCatalog, report: bool) -> io::Result<()> {
    for device in catalog {
        writeln!(out)?;
        writeln!(out, "Device name        : {}", device.name)?;
        writeln!(out, "Device MAC Address : {}", device.mac)?;
        if report {
            writeln!(out, "Firmware version   : {}", device.firmware)?;
        }
    }
    Ok(())
}

fn execute(matches: &ArgMatches) -> Result<()> {
    let path = matches.get_one::<PathBuf>("catalog_path").unwrap();
    let report = matches.get_flag("report");
    let options = DecodeOptions::new().check_signature(matches.get_flag("strict"));

    let view = ByteView::open(path)
        .map_err(|e| CatalogError::new(CatalogErrorKind::ResourceUnavailable, e))?;
    tracing::debug!(path = %path.display(), len = view.len(), "loaded catalog");

    let catalog = DeviceCatalog::parse_with_options(&view, options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if matches.get_flag("json") {
        serde_json::to_writer_pretty(&mut out, &catalog)?;
        writeln!(out)?;
        return Ok(());
    }

    if report {
        write_report(&mut out, &catalog)?;
    }
    write_devices(&mut out, &catalog, report)?;

    Ok(())
}

fn main() {
    let matches = Command::new("catalog-dump")
        .about("Validates a device catalog and prints its devices")
        .arg(
            Arg::new("catalog_path")
                .required(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the device catalog file"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .action(ArgAction::SetTrue)
                .help("Also print header details and firmware versions"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("report")
                .help("Print the verified catalog as JSON"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Reject catalogs without the 0xcafef00d signature"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log decoding details to stderr, repeat for more"),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    if let Err(e) = execute(&matches) {
        print_error(&e);
        process::exit(1);
    }
}
