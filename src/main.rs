use std::path::PathBuf;

use clap::Parser;
use log::error;

use loan_dashboard::format;
use loan_dashboard::progress;
use loan_dashboard::query::filter_ledger;
use loan_dashboard::{Dashboard, DashboardConfig, Money, ProjectionMode, ProjectionOutcome, QueryParams};

#[derive(Parser, Debug)]
#[command(name = "loan-dashboard", version, about = "Loan repayment dashboard from a published payment feed")]
struct Cli {
    /// JSON configuration file (defaults are used when absent)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// feed location: http(s) url or local file
    #[arg(short = 'f', long = "feed")]
    feed: Option<String>,

    /// total loan principal
    #[arg(long = "principal")]
    principal: Option<i64>,

    /// projection mode: manual, last_month, all_month_avg, last_month_avg_6
    #[arg(short = 'm', long = "mode")]
    mode: Option<ProjectionMode>,

    /// monthly payment used by the manual mode
    #[arg(long = "manual")]
    manual: Option<i64>,

    /// free text filter for the payment table
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// only show payments from this year
    #[arg(short = 'y', long = "year")]
    year: Option<i32>,

    /// print the dashboard as json
    #[arg(long = "json")]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(feed) = &cli.feed {
        config.feed_location = feed.clone();
    }
    if let Some(principal) = cli.principal {
        config.total_principal = Money::from_major(principal);
    }

    let mut dashboard = Dashboard::from_config(config)?;
    eprintln!("{}", dashboard.status_message());
    if let Err(e) = dashboard.reload().map(|_| ()) {
        error!("{}", e);
        eprintln!("{}", dashboard.status_message());
        return Err(e.into());
    }
    eprintln!("{}", dashboard.status_message());

    let mut params = dashboard.default_query();
    if let Some(mode) = cli.mode {
        params.mode = mode;
    }
    if let Some(manual) = cli.manual {
        params.manual_monthly = Money::from_major(manual);
    }
    params.search_text = cli.search.clone();
    params.year_filter = cli.year;

    if cli.json {
        if let Some(view) = dashboard.view(&params) {
            println!("{}", view.to_json_pretty()?);
        }
        return Ok(());
    }

    print_report(&dashboard, &params);
    Ok(())
}

fn print_report(dashboard: &Dashboard, params: &QueryParams) {
    let Some(snapshot) = dashboard.snapshot() else {
        return;
    };
    let model = &snapshot.model;
    let summary = &model.summary;
    let kpis = model.kpis(params);
    let projection = model.projection(params);

    let badge = if summary.is_paid_off() { "🎉 ¡Pagado!" } else { "⏳ En curso" };
    println!("{}  (actualizado {})", badge, format::timestamp(snapshot.loaded_at));
    println!();
    println!("Total crédito:   {}", format::money(summary.total_principal));
    println!("Total abonado:   {}", format::money(summary.total_paid));
    println!("Saldo restante:  {}", format::money(summary.remaining_balance));
    match &summary.last_payment {
        Some(last) => println!(
            "Último pago:     {} ({})",
            last.date().map(format::date).unwrap_or_default(),
            format::money(last.amount())
        ),
        None => println!("Último pago:     —"),
    }

    let width = 30.0;
    let filled = (progress::target_percent(kpis.progress) / 100.0 * width).round() as usize;
    println!(
        "Progreso:        [{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(width as usize - filled),
        format::percent(kpis.progress)
    );
    println!();

    let or_dash = |m: Money| if m.is_positive() { format::money(m) } else { "—".to_string() };
    println!("Meses con pago:        {}", kpis.months_with_payments);
    println!("Promedio mensual:      {}", or_dash(kpis.average_monthly_all));
    println!("Promedio 6 meses:      {}", or_dash(kpis.average_monthly_recent));
    println!("Meta mensual:          {}", kpis.monthly_goal.map(format::money).unwrap_or_else(|| "—".to_string()));
    println!();

    println!("Proyección: {}", format::mode_label(projection.mode));
    println!("Cuota usada:     {}", format::money(projection.monthly_estimate));
    match projection.outcome {
        ProjectionOutcome::PaidOff => {
            println!("Meses restantes: 0");
            println!("Fin de pago:     🎉 Ya quedó pagado (según estos datos)");
        }
        ProjectionOutcome::Indeterminate => {
            println!("Meses restantes: —");
            println!("Fin de pago:     —");
        }
        ProjectionOutcome::Estimated => {
            let months = projection.months_remaining.unwrap_or_default();
            let payoff = projection.payoff_date.map(format::month_year).unwrap_or_default();
            println!("Meses restantes: {}", months);
            println!("Fin de pago:     🏁 {}", payoff);
        }
    }
    println!("{}", projection.pace_note().message());
    println!();

    if !model.years.is_empty() {
        let years: Vec<String> = model.years.iter().map(|y| y.to_string()).collect();
        println!("Años: {}", years.join(", "));
    }
    println!(
        "{:<12} {:<12} {:>14} {:>14} {:>14}",
        "Fecha", "Mes", "Valor", "Acumulado", "Saldo"
    );
    for entry in filter_ledger(model, params) {
        println!(
            "{:<12} {:<12} {:>14} {:>14} {:>14}",
            format::record_date(&entry.record),
            entry.record.month_label,
            format::money(entry.amount()),
            format::money(entry.cumulative_paid),
            format::money(entry.remaining_balance)
        );
    }
}
