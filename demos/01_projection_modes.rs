/// projection modes - the same ledger under every estimation strategy
use loan_dashboard::format;
use loan_dashboard::{recompute, DashboardConfig, Money, ProjectionMode, QueryParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== projection modes ===\n");

    let feed = "Fecha\tMes\tValor\n\
                15/07/2024\tJulio\t$800.000\n\
                14/08/2024\tAgosto\t$900.000\n\
                13/09/2024\tSeptiembre\t$1.274.000\n\
                15/10/2024\tOctubre\t$700.000\n\
                31/02/24\tFebrero\t$300.000\n\
                15/11/2024\tNoviembre\t$950.000\n\
                16/12/2024\tDiciembre\t$1.100.000\n\
                15/01/2025\tEnero\t$600.000\n";

    let config = DashboardConfig::new("memory", Money::from_major(42_119_181));
    let model = recompute(feed, &config)?;

    println!("records: {}, months: {}", model.records.len(), model.monthly.len());
    println!("paid: {}", format::money(model.summary.total_paid));
    println!("left: {}\n", format::money(model.summary.display_remaining()));

    for mode in ProjectionMode::ALL {
        let params = QueryParams::new(mode, Money::from_major(900_000));
        let projection = model.projection(&params);

        let payoff = projection
            .payoff_date
            .map(format::month_year)
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<22} {:>14}  {:>4} months  {}",
            format::mode_label(mode),
            format::money(projection.monthly_estimate),
            projection.months_remaining.map(|m| m.to_string()).unwrap_or_else(|| "—".to_string()),
            payoff
        );
    }

    // indeterminate: manual mode without a monthly amount
    let params = QueryParams::new(ProjectionMode::Manual, Money::ZERO);
    let projection = model.projection(&params);
    println!("\nmanual with no amount: {:?}", projection.outcome);
    println!("{}", projection.pace_note().message());

    Ok(())
}
