use crate::infra::{engine_from, parse_import_mode, parse_phone_spec};
use clap::Args;
use customs_risk::config::AppConfig;
use customs_risk::error::AppError;
use customs_risk::estimation::{EstimateBreakdown, ImportMode};
use customs_risk::intake::{EstimateSubmission, IntakeGuard, PhoneSubmission};
use customs_risk::ruleset::PublicRulesView;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Import channel: traveller (voyageur) or shipment (envoi)
    #[arg(long, default_value = "traveller", value_parser = parse_import_mode)]
    pub(crate) mode: ImportMode,
    /// Phone as price:currency:packaging:personal_use, e.g. 1200:EUR:sealed:no. Repeatable.
    #[arg(long = "phone", required = true, value_parser = parse_phone_spec)]
    pub(crate) phones: Vec<PhoneSubmission>,
    /// Alternate rule table (JSON) instead of the configured one
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Print the breakdown as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Alternate rule table (JSON) instead of the configured one
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Print the rule summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        mode,
        phones,
        rules,
        json,
    } = args;

    let config = AppConfig::load()?;
    let engine = engine_from(rules, config.rules)?;
    let request = IntakeGuard.request_from_submission(EstimateSubmission {
        import_mode: Some(mode.into()),
        phones,
    })?;

    let breakdown = engine.estimate(&request);
    if json {
        let body = serde_json::to_string_pretty(&breakdown).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        print!("{}", render_breakdown(mode, &breakdown));
    }

    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = engine_from(args.rules, config.rules)?;
    let view = engine.rules().public_view();

    if args.json {
        let body = serde_json::to_string_pretty(&view).map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        print!("{}", render_rules(&view));
    }

    Ok(())
}

fn mode_label(mode: ImportMode) -> &'static str {
    match mode {
        ImportMode::Traveller => "traveller",
        ImportMode::Shipment => "shipment",
    }
}

fn percent(rate: f64) -> f64 {
    rate * 100.0
}

pub(crate) fn render_breakdown(mode: ImportMode, breakdown: &EstimateBreakdown) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_breakdown(&mut out, mode, breakdown).map(|()| out).unwrap_or_default()
}

fn write_breakdown(
    out: &mut impl fmt::Write,
    mode: ImportMode,
    breakdown: &EstimateBreakdown,
) -> fmt::Result {
    let EstimateBreakdown { totals, risk, tax } = breakdown;

    writeln!(out, "Customs estimate ({})", mode_label(mode))?;
    writeln!(
        out,
        "- {} phone(s) | total {:.2} MAD | most expensive {:.2} MAD",
        totals.qty, totals.total_value, totals.max_price
    )?;
    writeln!(
        out,
        "- Risk {}/100 ({}): {}",
        risk.score,
        risk.level.label(),
        risk.verdict
    )?;

    if !risk.reasons.is_empty() {
        writeln!(out, "Reasons:")?;
        for reason in &risk.reasons {
            writeln!(out, "  - {reason}")?;
        }
    }

    match tax {
        Some(tax) => writeln!(
            out,
            "- Indicative tax {} to {} MAD ({:.0}% to {:.0}% of {:.2} MAD)",
            tax.min_tax,
            tax.max_tax,
            percent(tax.rate_low),
            percent(tax.rate_high),
            tax.declared_value
        ),
        None => writeln!(out, "- No tax range for this profile"),
    }
}

pub(crate) fn render_rules(view: &PublicRulesView) -> String {
    let mut out = String::new();
    write_rules(&mut out, view).map(|()| out).unwrap_or_default()
}

fn write_rules(out: &mut impl fmt::Write, view: &PublicRulesView) -> fmt::Result {
    writeln!(out, "Rule table {}", view.version)?;
    writeln!(
        out,
        "- 1 EUR = {} MAD | effective rate {:.0}% to {:.0}%",
        view.exchange_rate_eur_to_mad,
        percent(view.effective_rate_low),
        percent(view.effective_rate_high)
    )?;
    for note in &view.notes {
        writeln!(out, "- {note}")?;
    }
    Ok(())
}
