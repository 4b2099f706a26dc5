//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use rate_core::calculations::{BudgetComparison, LedgerSummary, RateCalculation, band_thresholds};
use rate_core::history::RateHistory;
use rate_core::market::{MarketReport, MarketTrendPoint, ReportSource};
use rate_core::tips::{PRO_TIP, RATE_TIPS};
use rate_core::{Currency, Industry, Location, SavedCalculation, SkillLevel, Transaction};

use crate::utils::money;

// Writing into a String cannot fail.
macro_rules! push_line {
    ($out:expr) => {
        let _ = writeln!($out);
    };
    ($out:expr, $($arg:tt)*) => {
        let _ = writeln!($out, $($arg)*);
    };
}

pub fn calculation(calc: &RateCalculation) -> String {
    let currency = calc.result.currency;
    let b = &calc.breakdown;
    let mut out = String::new();
    push_line!(out, "Hourly rate:  {}", money(calc.result.hourly, currency));
    push_line!(out, "Daily rate:   {}", money(calc.result.daily, currency));
    push_line!(out, "Monthly rate: {}", money(calc.result.monthly, currency));
    push_line!(out);
    push_line!(out, "Required income: {}", money(b.total_required_income, currency));
    push_line!(out, "Billable hours:  {}", b.billable_hours.normalize());
    push_line!(
        out,
        "Multipliers: skill x{}, experience x{}, location x{}, industry x{}, skills x{}",
        b.skill_multiplier.normalize(),
        b.experience_multiplier.normalize(),
        b.location_multiplier.normalize(),
        b.industry_multiplier.normalize(),
        b.skills_bonus.normalize()
    );
    out
}

pub fn history(history: &RateHistory) -> String {
    let mut out = String::new();
    push_line!(out, "Rate history ({} of {}):", history.len(), history.capacity());
    for entry in history.entries() {
        push_line!(
            out,
            "  {}  {}",
            entry.date.format("%Y-%m-%d %H:%M:%S"),
            money(entry.rate, entry.currency)
        );
    }
    out
}

pub fn comparison(comparison: &BudgetComparison) -> String {
    let mut out = String::new();
    push_line!(out, "{comparison}");
    if comparison.currency != Currency::Usd {
        push_line!(
            out,
            "About {} per hour in US dollars.",
            money(comparison.usd_equivalent, Currency::Usd)
        );
    }
    out
}

pub fn market(
    report: &MarketReport,
    trends: &[MarketTrendPoint],
) -> String {
    let mut out = String::new();
    if report.source == ReportSource::Fallback {
        push_line!(out, "Live market data unavailable; showing typical rates.");
    }
    push_line!(out, "Average hourly rates (USD):");
    for (label, rate) in report.rates.labelled() {
        push_line!(out, "  {label:<20} {}", money(rate, Currency::Usd));
    }
    if !report.trends.is_empty() {
        push_line!(out);
        push_line!(out, "Trends:");
        for trend in &report.trends {
            push_line!(out, "  - {trend}");
        }
    }
    if !report.insights.is_empty() {
        push_line!(out);
        push_line!(out, "Insights:");
        for insight in &report.insights {
            push_line!(out, "  - {insight}");
        }
    }
    push_line!(out);
    push_line!(out, "Six-month trend (web / mobile / data science):");
    for point in trends {
        push_line!(
            out,
            "  {:<4} {:>4} {:>4} {:>4}",
            point.month,
            point.web_dev,
            point.mobile_dev,
            point.data_science
        );
    }
    out
}

pub fn transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions recorded.\n".to_string();
    }
    let mut out = String::new();
    push_line!(
        out,
        "{:>4}  {:<10}  {:<7}  {:<14}  {:>12}  Description",
        "ID",
        "Date",
        "Type",
        "Category",
        "Amount"
    );
    for t in transactions {
        push_line!(
            out,
            "{:>4}  {:<10}  {:<7}  {:<14}  {:>12.2}  {}",
            t.id,
            t.date.format("%Y-%m-%d"),
            t.kind,
            t.category.as_deref().unwrap_or("-"),
            t.amount,
            t.description.as_deref().unwrap_or("")
        );
    }
    out
}

pub fn summary(
    summary: &LedgerSummary,
    currency: Currency,
) -> String {
    let mut out = String::new();
    push_line!(out, "Transactions:   {}", summary.transaction_count);
    push_line!(out, "Total income:   {}", money(summary.total_income, currency));
    push_line!(out, "Total expenses: {}", money(summary.total_expenses, currency));
    push_line!(out, "Net income:     {}", money(summary.net, currency));
    for (heading, totals) in [
        ("Income by category:", &summary.income_by_category),
        ("Expenses by category:", &summary.expenses_by_category),
    ] {
        if totals.is_empty() {
            continue;
        }
        push_line!(out);
        push_line!(out, "{heading}");
        for (category, total) in totals {
            push_line!(out, "  {category:<16} {}", money(*total, currency));
        }
    }
    out
}

pub fn saved(saved: &[SavedCalculation]) -> String {
    if saved.is_empty() {
        return "No saved calculations.\n".to_string();
    }
    let mut out = String::new();
    for (index, calc) in saved.iter().enumerate() {
        let currency = calc.results.currency;
        push_line!(
            out,
            "[{index}] {}  {} / hour  {} / day  {} / month  {} {}",
            calc.date.format("%Y-%m-%d"),
            money(calc.results.hourly, currency),
            money(calc.results.daily, currency),
            money(calc.results.monthly, currency),
            calc.inputs.skill_level.map(|s| s.label()).unwrap_or("-"),
            calc.inputs.industry.map(|i| i.label()).unwrap_or("-"),
        );
    }
    out
}

pub fn tables() -> String {
    let mut out = String::new();
    push_line!(out, "Skill levels:");
    for level in SkillLevel::all() {
        push_line!(out, "  {:<22} x{}", level.as_str(), level.multiplier().normalize());
    }
    push_line!(out);
    push_line!(out, "Industries:");
    for industry in Industry::all() {
        let profile = industry.profile();
        push_line!(
            out,
            "  {:<22} x{:<5} base ${:<4} skills: {}",
            industry.as_str(),
            profile.multiplier.normalize(),
            profile.base_rate,
            profile.skills.join(", ")
        );
    }
    push_line!(out);
    push_line!(out, "Locations:");
    for location in Location::all() {
        push_line!(out, "  {:<22} x{}", location.as_str(), location.multiplier().normalize());
    }
    push_line!(out);
    push_line!(out, "Currencies:");
    for currency in Currency::all() {
        let [below, average, above, premium] = band_thresholds(*currency);
        push_line!(
            out,
            "  {} {:<3} {:>7} per USD  bands {below}/{average}/{above}/{premium}",
            currency.code(),
            currency.symbol(),
            currency.rate_relative_to_usd().normalize()
        );
    }
    out
}

pub fn tips() -> String {
    let mut out = String::new();
    for (i, tip) in RATE_TIPS.iter().enumerate() {
        push_line!(out, "{:>2}. {tip}", i + 1);
    }
    push_line!(out);
    push_line!(out, "Pro tip: {PRO_TIP}");
    out
}
