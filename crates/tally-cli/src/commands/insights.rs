//! Insight and alert command implementations

use anyhow::Result;
use chrono::NaiveDateTime;
use tally_core::{
    build_alerts, AnalyticsConfig, Database, InsightEngine, Insights, Snapshot, TransactionFilter,
};

use super::{print_json, resolve_month, truncate};

pub(crate) fn anomaly_heading(window_days: i64) -> String {
    match window_days {
        1 => "   ⚡ Unusual spending (last day)".to_string(),
        days => format!("   ⚡ Unusual spending (last {} days)", days),
    }
}

pub fn cmd_insights(
    db: &Database,
    config: AnalyticsConfig,
    month: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> Result<Insights> {
    let month = resolve_month(month, now)?;
    let snapshot = Snapshot::load(db, month, now)?;
    let engine = InsightEngine::new(config);
    let insights = engine.analyze(&snapshot.transactions, month, now);

    if json {
        print_json(&insights)?;
        return Ok(insights);
    }

    println!();
    println!("💡 Insights for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing unusual. Keep it up!");
        return Ok(insights);
    }

    if !insights.anomalies.is_empty() {
        println!();
        println!("{}", anomaly_heading(engine.config().anomaly.window_days));
        for anomaly in &insights.anomalies {
            println!(
                "     {} ({:.2} vs {:.2}/week)",
                anomaly.message, anomaly.current, anomaly.baseline
            );
        }
    }

    if !insights.recurring.is_empty() {
        println!();
        println!("   🔁 Recurring payments");
        for payment in &insights.recurring {
            println!(
                "     {:25} │ {:>10.2} every ~{} days │ last {}",
                truncate(&payment.merchant, 25),
                payment.avg_amount,
                payment.frequency_days,
                payment.last_payment.format("%Y-%m-%d")
            );
        }
    }

    if !insights.category_suggestions.is_empty() {
        println!();
        println!("   🏷️  Category suggestions");
        for suggestion in &insights.category_suggestions {
            println!(
                "     [{:>4}] {:30} → {}",
                suggestion.transaction_id,
                truncate(&suggestion.description, 30),
                suggestion.suggested_category
            );
        }
        println!("     Apply with: tally recategorize --category <CATEGORY> <ID>...");
    }

    if !insights.explanations.is_empty() {
        println!();
        println!("   📈 What changed since last month");
        for card in &insights.explanations {
            println!(
                "     {} (+{:.2}: {:.2} → {:.2})",
                card.message, card.delta, card.previous, card.current
            );
        }
    }

    Ok(insights)
}

pub fn cmd_alerts(
    db: &Database,
    config: &AnalyticsConfig,
    month: Option<&str>,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let month = resolve_month(month, now)?;
    let snapshot =
        Snapshot::load_filtered(db, &TransactionFilter::new().in_month(month), month, now)?;
    let alerts = build_alerts(&snapshot.transactions, &config.alerts);

    if json {
        return print_json(&alerts);
    }

    if alerts.is_empty() {
        println!("✅ No alerts for {}", month);
        return Ok(());
    }

    println!();
    println!("🚨 Alerts for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");
    for alert in &alerts {
        println!("   {}", alert.message);
    }
    Ok(())
}
