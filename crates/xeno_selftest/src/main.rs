//! Xeno self-test
//!
//! Smoke test for a device: runs the BCn decoder self-test and, with
//! `--init`, the full driver initialization (manifest check, probe, report).

use anyhow::{bail, Result};
use xeno_env::Settings;

fn main() -> Result<()> {
    let mut run_init = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--init" => run_init = true,
            other => bail!("unknown argument '{other}' (usage: xeno-selftest [--init])"),
        }
    }

    let settings = Settings::from_env();
    xeno_services::init_logging(&settings);
    tracing::info!("Xeno ICD v{}", xeno_env::VERSION);

    let icd = xeno_icd::global();
    let probe = icd.probe().evidence();
    tracing::info!(?probe, "hardware probe");
    tracing::info!(
        needs_fallback = icd.needs_software_fallback("BC1_UNORM", &settings),
        "BC1 decision"
    );

    let report = xeno_fallback::run_selftest(icd.fallback());
    for (format, ok) in &report.results {
        println!("{format}: {}", if *ok { "pass" } else { "fail" });
    }

    if run_init {
        let init = icd.initialize(&settings);
        let missing = init.manifest.iter().filter(|c| !c.present).count();
        println!(
            "init: hardware_bc={} prewarmed={} manifest_missing={} report_written={}",
            init.hardware_bc,
            init.prewarmed.len(),
            missing,
            init.report_written
        );
    }

    Ok(())
}
