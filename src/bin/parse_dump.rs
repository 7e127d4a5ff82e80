//! Parse dump utility
//! Decodes a saved monitor dump file and displays the measurements,
//! optionally persisting them to a SQLite database

use bpmon_rs::parser::{parse_header, RecordDecoder};
use bpmon_rs::store::{MemoryStore, SqliteStore};
use bpmon_rs::{Measurement, RawDump};
use std::env;
use std::fs;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut dump_file = None;
    let mut db_path = None;
    let mut json = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => {
                db_path = Some(
                    iter.next()
                        .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?
                        .clone(),
                );
            }
            "--json" => json = true,
            other if dump_file.is_none() => dump_file = Some(other.to_string()),
            other => anyhow::bail!("Unexpected argument: {}", other),
        }
    }

    let Some(dump_file) = dump_file else {
        eprintln!("Usage: {} <dump_file.bin> [--db <file.sqlite>] [--json]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} monitor_dump.bin                    # Show decoded measurements", args[0]);
        eprintln!("  {} monitor_dump.bin --db data.sqlite   # Also store new ones", args[0]);
        eprintln!("  {} monitor_dump.bin --json             # Machine-readable output", args[0]);
        std::process::exit(1);
    };

    // Read dump file
    let data = fs::read(&dump_file)?;
    let dump = RawDump::new(data);

    let header = parse_header(&dump)?;
    if !json {
        println!("Reading dump file: {}", dump_file);
        println!("Loaded {} bytes", dump.len());
        println!("Number of cycles found in dump: {}", header.cycle_count);
        println!("User: {}\n", header.user_id);
    }

    let decoder = RecordDecoder::new(&header);
    let measurements = match db_path {
        Some(path) => {
            let mut store = SqliteStore::open(&path)?;
            let new = decoder.decode_all(&dump, &mut store)?;
            if !json {
                println!(
                    "Stored {} new measurements in {} ({} total)\n",
                    new.len(),
                    path,
                    store.count()?
                );
            }
            new
        }
        None => decoder.decode_all(&dump, &mut MemoryStore::new())?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&measurements)?);
        return Ok(());
    }

    for measurement in &measurements {
        print_measurement(measurement);
    }
    println!("Decoded {} measurements", measurements.len());

    Ok(())
}

fn print_measurement(m: &Measurement) {
    println!("Measurement {}", m.taken_at.format("%Y-%m-%d %H:%M"));
    println!("  Systolic:       {} mmHg", m.systolic);
    println!("  Diastolic:      {} mmHg", m.diastolic);
    println!("  Pulse:          {} /min", m.pulse);
    println!("  Pulse pressure: {} mmHg", m.pulse_pressure);
    println!("  MAP:            {:.1} mmHg", m.mean_arterial_pressure);
    println!("  Hash:           {}", m.content_hash);
    println!();
}
