//! Monitor memory dump utility
//! Downloads the raw measurement memory from the monitor and saves it to
//! files for decoding and analysis

use bpmon_rs::parser::parse_header;
use bpmon_rs::serial::{available_port_names, DumpProtocol, ProgressCallback, SerialConfig, SerialPort};
use bpmon_rs::RawDump;
use std::env;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <port> [output_prefix]", args[0]);
        eprintln!("Example: {} /dev/ttyUSB0 monitor_dump", args[0]);
        eprintln!("\nThis will download the monitor's memory and save to:");
        eprintln!("  - <output_prefix>.bin (raw binary)");
        eprintln!("  - <output_prefix>.hex (hex dump)");

        let ports = available_port_names();
        if !ports.is_empty() {
            eprintln!("\nDetected serial ports:");
            for name in ports {
                eprintln!("  {}", name);
            }
        }
        std::process::exit(1);
    }

    let port_name = &args[1];
    let prefix = args.get(2).map(|s| s.as_str()).unwrap_or("monitor_dump");

    tracing::info!("Monitor Memory Dump Utility");
    tracing::info!("Port: {}", port_name);

    // Open the serial port with the monitor's fixed line settings
    tracing::info!("Opening serial port...");
    let mut port = SerialPort::open(port_name, SerialConfig::default())?;
    port.discard_stale()?;

    tracing::info!("Requesting dump from monitor...");
    let progress: ProgressCallback = Arc::new(|_bytes, message| {
        tracing::info!("{}", message);
    });

    let raw_data = DumpProtocol::new().download(&mut port, Some(progress)).await?;
    tracing::info!("Downloaded {} bytes", raw_data.len());

    let dump = RawDump::new(raw_data);

    // A dump always starts with the header window; log its summary so a
    // truncated transfer is obvious right away
    match parse_header(&dump) {
        Ok(header) => {
            tracing::info!("Number of cycles found in dump: {}", header.cycle_count);
            tracing::info!("User: {}", header.user_id);
        }
        Err(err) => tracing::warn!("Dump header did not parse: {}", err),
    }

    // Save binary file
    let bin_path = format!("{prefix}.bin");
    let mut bin_file = File::create(&bin_path)?;
    bin_file.write_all(dump.as_bytes())?;
    tracing::info!("Saved raw binary to: {}", bin_path);

    // Save hex dump
    let hex_path = format!("{prefix}.hex");
    let mut hex_file = File::create(&hex_path)?;
    hex_file.write_all(dump.printable().as_bytes())?;
    tracing::info!("Saved hex dump to: {}", hex_path);

    println!("\n=== Download Complete ===");
    println!("Raw binary: {} ({} bytes)", bin_path, dump.len());
    println!("Hex dump:   {}", hex_path);
    println!("\nDecode it with: parse-dump {bin_path}");

    Ok(())
}
