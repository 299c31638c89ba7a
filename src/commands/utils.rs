use anyhow::Result;
use std::path::PathBuf;
use crate::output::read_profile;
use crate::utils::config::SCHEMA_VERSION;

/// Validate a profile JSON file
pub fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(&file_path)?;

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Source: {}", profile.source);
    println!("  Total Events: {}", profile.total_events());
    for (level, record) in &profile.levels {
        println!(
            "  {}: {} events, {} bytes",
            level,
            record.event_count,
            record.total_bytes()
        );
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("I/O Trace Profile Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string                - Schema version (e.g., '1.0.0')");
        println!("  source: string                 - Trace log the profile was built from");
        println!("  levels: object                 - Statistics keyed by level (BLK, FS, VFS)");
        println!("    event_count: number          - Events observed at the level");
        println!("    elapsed_seconds: number      - Time between first and last event");
        println!("    data_transfer_rate: number   - KB/s over the trace");
        println!("    iops: number                 - Nominal 4 KiB operations per second");
        println!("    read_bytes: number           - Bytes read");
        println!("    write_bytes: number          - Bytes written");
        println!("    read_sequential_rate: number - Share of sequential reads");
        println!("    read_random_rate: number     - Share of random reads");
        println!("    write_sequential_rate: number - Share of sequential writes");
        println!("    write_random_rate: number    - Share of random writes");
        println!("    size_histogram: object       - Frequency of each request size");
        println!("  generated_at: string           - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("I/O Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Access-pattern profiling and block translation for storage I/O traces.");
}
