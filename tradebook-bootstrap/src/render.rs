use std::fmt::Display;

use prettytable::{row, Table};
use rust_decimal::Decimal;
use tradebook_core::{normalizer::order::ESTIMATED_FEE_RATE, report::Report};
use tradebook_model::{
    enums::{PipelineKind, Resolution},
    ledger::{DateSpan, LedgerRow},
    summary::{DailyPoint, QuoteStatus, SummaryStats},
};

const QUANTITY_DP: u32 = 8;
const MONEY_DP: u32 = 2;

fn quantity(value: Decimal) -> String {
    value.round_dp(QUANTITY_DP).normalize().to_string()
}

fn money(value: Decimal) -> String {
    format!("{:.*}", MONEY_DP as usize, value.round_dp(MONEY_DP))
}

/// Full plain-text rendering of a successful pipeline run.
pub fn report(report: &Report, range: DateSpan) -> String {
    let rows = report.view(Some(range));

    let mut out = format!(
        "== {} {} | data {} .. {} | showing {} .. {} ==\n",
        report.instrument,
        report.kind(),
        report.span.start,
        report.span.end,
        range.start,
        range.end,
    );

    out.push_str(&summary_table(&report.summary, &report.quote).to_string());

    out.push_str("\nDaily prices\n");
    out.push_str(&daily_table(&report.daily).to_string());
    if let Some(line) = report.cost_line() {
        out.push_str(&format!(
            "average cost {} from {} to {}\n",
            money(line.price),
            line.span.start,
            line.span.end
        ));
    }

    out.push_str(&format!("\nHistory ({} of {} rows)\n", rows.len(), report.ledger.len()));
    out.push_str(&ledger_table(&rows, report.ledger.resolution).to_string());
    out
}

/// Informational line for a pipeline whose source returned nothing usable.
pub fn empty_state(kind: PipelineKind) -> String {
    format!("[info] no {kind} history found for this account")
}

pub fn failure<E>(kind: PipelineKind, error: &E) -> String
where
    E: Display + ?Sized,
{
    format!("[error] {kind} report unavailable: {error}")
}

pub fn summary_table(summary: &SummaryStats, quote: &QuoteStatus) -> Table {
    let fee_asset = summary
        .fee_asset
        .as_ref()
        .map(|asset| asset.to_exchange())
        .unwrap_or_default();

    let fees = if summary.fees_estimated {
        format!(
            "{} {} (estimated at {}%)",
            quantity(summary.total_fees),
            fee_asset,
            (ESTIMATED_FEE_RATE * Decimal::ONE_HUNDRED).normalize()
        )
    } else {
        format!("{} {}", quantity(summary.total_fees), fee_asset)
    };

    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Total bought", quantity(summary.total_buy_quantity)]);
    table.add_row(row!["Total cost", money(summary.total_buy_cost)]);
    table.add_row(row!["Average cost", money(summary.average_cost)]);
    table.add_row(row!["Total fees", fees]);

    match quote {
        QuoteStatus::Live(price) => {
            table.add_row(row!["Current price", money(*price)]);
        }
        QuoteStatus::Missing(reason) => {
            table.add_row(row!["Current price", format!("unavailable: {reason}")]);
        }
        QuoteStatus::NotRequested => {}
    }

    if let Some(pnl) = summary.unrealized_pnl {
        table.add_row(row!["Unrealized P/L", money(pnl)]);
    }

    table
}

pub fn daily_table(series: &[DailyPoint]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Date", "Side", "Mean price", "Quantity"]);
    for point in series {
        table.add_row(row![
            point.date,
            point.side,
            money(point.mean_price),
            quantity(point.quantity)
        ]);
    }
    table
}

pub fn ledger_table(rows: &[&LedgerRow], resolution: Resolution) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Time", "Side", "Unit price", "Quantity", "Total", "Fee", "Fee asset"]);
    for entry in rows {
        table.add_row(row![
            entry.timestamp.format(resolution.display_format()),
            entry.side,
            money(entry.unit_price),
            quantity(entry.quantity),
            money(entry.total),
            quantity(entry.fee),
            entry.fee_asset.to_exchange()
        ]);
    }
    table
}
