//! The `lensmark scan` command: register everything in the image directory.

use lensmark_core::pipeline::FileDiscovery;
use lensmark_core::{Registrar, ScanStats};

use super::Session;

pub fn execute(mut session: Session) -> anyhow::Result<()> {
    let registrar = Registrar::new(&session.config);
    let total = FileDiscovery::new(session.config.processing.clone())
        .discover(registrar.image_dir(), false)
        .len() as u64;

    let pb = create_progress_bar(total);
    let stats = registrar.scan(&mut session.catalog, |path| {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    session.save()?;
    print_summary(&stats, session.catalog.images().len());
    Ok(())
}

fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    pb.set_style(style);
    pb.set_message("scanning...");
    pb
}

fn print_summary(stats: &ScanStats, catalog_size: usize) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Scan summary");
    eprintln!("  ====================================");
    eprintln!("    New:          {:>8}", stats.registered);
    eprintln!("    Refreshed:    {:>8}", stats.refreshed);
    if stats.skipped > 0 {
        eprintln!("    Skipped:      {:>8}", stats.skipped);
    }
    eprintln!("    With EXIF:    {:>8}", stats.with_metadata);
    eprintln!("  ------------------------------------");
    eprintln!("    Files:        {:>8}", stats.total());
    eprintln!("    In catalog:   {:>8}", catalog_size);
    eprintln!("    Duration:     {:>7.1}s", stats.total_seconds);
    eprintln!("  ====================================");
}
