/// quick start - minimal example to get started
use loan_dashboard::{recompute, DashboardConfig, Money, ProjectionMode, QueryParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let feed = "Fecha\tMes\tValor\n\
                01/01/2024\tEnero\t$500.000\n\
                01/02/2024\tFebrero\t$500.000\n";

    // a 3,000,000 loan
    let config = DashboardConfig::new("memory", Money::from_major(3_000_000));
    let model = recompute(feed, &config)?;

    // project with the average of every month
    let params = QueryParams::new(ProjectionMode::AllMonthAverage, Money::ZERO);
    let projection = model.projection(&params);

    println!("paid:      {}", model.summary.total_paid);
    println!("remaining: {}", model.summary.remaining_balance);
    println!("monthly:   {}", projection.monthly_estimate);
    println!("months:    {:?}", projection.months_remaining);
    println!("payoff:    {:?}", projection.payoff_date);

    Ok(())
}
