use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datjunk_core::CatalogStats;

use crate::CliError;
use crate::cli_types::FilterArgs;

use super::RunContext;

/// Format a byte count in human-readable form.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

fn log_stats(stats: &CatalogStats) {
    log::info!("  Items:      {:>10}", stats.item_count);
    log::info!("  ROMs:       {:>10}", stats.rom_count);
    log::info!("  Disks:      {:>10}", stats.disk_count);
    log::info!("  Total size: {:>10}", format_bytes(stats.total_size));
    log::info!("  CRC:        {:>10}", stats.crc_count);
    log::info!("  MD5:        {:>10}", stats.md5_count);
    log::info!("  SHA-1:      {:>10}", stats.sha1_count);
    log::info!("  Nodump:     {:>10}", stats.nodump_count);
}

/// Run the stats command.
pub(crate) fn run_stats(
    ctx: &RunContext,
    inputs: &[PathBuf],
    filter: &FilterArgs,
) -> Result<(), CliError> {
    let report = ctx.load(inputs, filter)?;
    let mut total = CatalogStats::default();

    for loaded in &report.loaded {
        let catalog = &loaded.input.catalog;
        crate::log_blank();
        log::info!(
            "{} {}",
            catalog.header.name.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", loaded.path.display()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        log_stats(catalog.stats());
        total.merge(catalog.stats());
    }

    if report.loaded.len() > 1 {
        crate::log_blank();
        log::info!("{}", "Total".if_supports_color(Stdout, |t| t.bold()));
        log_stats(&total);
    }

    if report.has_failures() {
        return Err(CliError::InputsFailed(report.failures.len()));
    }
    if report.loaded.is_empty() {
        return Err(CliError::NoRecords);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_formatting() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 / 2), "1.50 MB");
    }
}
