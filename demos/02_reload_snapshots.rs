/// reload snapshots - a dashboard holding the latest successful load
use std::io::Write;

use chrono::{TimeZone, Utc};
use loan_dashboard::{Dashboard, DashboardConfig, FileFeed, Money, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== reload snapshots ===\n");

    let path = std::env::temp_dir().join("loan_dashboard_demo.tsv");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "Fecha\tMes\tValor")?;
    writeln!(file, "01/01/2024\tEnero\t$500.000")?;
    drop(file);

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap()
    ));
    let config = DashboardConfig::new(path.display().to_string(), Money::from_major(3_000_000));
    let mut dashboard = Dashboard::new(config, Box::new(FileFeed::new(&path)), time)?;

    // stage 1: first load
    let id = dashboard.reload()?.snapshot_id;
    println!("stage 1: {}", dashboard.status_message());
    println!("snapshot {}\n", id);

    // stage 2: the feed loses its amount column, the old snapshot stays
    std::fs::write(&path, "Fecha\tMes\n01/01/2024\tEnero\n")?;
    let _ = dashboard.reload();
    println!("stage 2: {}", dashboard.status_message());
    println!("snapshot still {}\n", dashboard.snapshot().map(|s| s.snapshot_id).unwrap_or_default());

    // stage 3: fixed feed with a new payment
    std::fs::write(
        &path,
        "Fecha\tMes\tValor\n01/01/2024\tEnero\t$500.000\n01/02/2024\tFebrero\t$700.000\n",
    )?;
    dashboard.reload()?;
    println!("stage 3: {}", dashboard.status_message());

    let view = dashboard.view(&dashboard.default_query());
    if let Some(view) = view {
        println!("{}", view.to_json_pretty()?);
    }

    std::fs::remove_file(&path)?;
    Ok(())
}
