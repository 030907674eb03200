//! License cost calculation in integer cents.
//!
//! Monthly prices are converted to whole cents once, summed as integers,
//! and multiplied by 12 once at the very end, so that the annual figure is
//! always exactly twelve times the monthly one.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

/// Source of monthly per-unit prices, keyed by SKU id.
pub trait PriceLookup {
    /// Raw price text for a SKU, or `None` when the SKU has no price.
    fn monthly_price(&self, sku_id: &str) -> Option<&str>;
}

impl PriceLookup for HashMap<String, String> {
    fn monthly_price(&self, sku_id: &str) -> Option<&str> {
        self.get(sku_id).map(String::as_str)
    }
}

/// Why a SKU contributed nothing to a cost total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unpriced {
    Missing(String),
    Unparseable { sku_id: String, raw: String },
}

impl Unpriced {
    pub fn sku_id(&self) -> &str {
        match self {
            Unpriced::Missing(sku_id) => sku_id,
            Unpriced::Unparseable { sku_id, .. } => sku_id,
        }
    }
}

/// Monthly total in cents plus the SKUs that could not be priced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostBreakdown {
    pub monthly_cents: i64,
    pub unpriced: Vec<Unpriced>,
}

impl CostBreakdown {
    pub fn monthly(&self) -> Decimal {
        cents_to_decimal(self.monthly_cents)
    }

    pub fn annual(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.monthly_cents) * 12, 2)
    }
}

/// Largest monthly unit price accepted, in cents (one billion currency units).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Parse a price into whole cents, rounding half away from zero.
///
/// Negative, non-numeric and implausibly large values are rejected.
pub fn parse_price_cents(raw: &str) -> Option<i64> {
    let value = Decimal::from_str(raw.trim()).ok()?;
    if value.is_sign_negative() {
        return None;
    }
    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .filter(|cents| *cents <= MAX_PRICE_CENTS)
}

pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Sum monthly prices for `sku_ids` without logging.
pub fn monthly_breakdown<S, P>(sku_ids: &[S], prices: &P) -> CostBreakdown
where
    S: AsRef<str>,
    P: PriceLookup + ?Sized,
{
    let mut breakdown = CostBreakdown::default();
    for sku_id in sku_ids {
        let sku_id = sku_id.as_ref();
        match prices.monthly_price(sku_id) {
            None => breakdown.unpriced.push(Unpriced::Missing(sku_id.to_string())),
            Some(raw) => match parse_price_cents(raw)
                .and_then(|cents| breakdown.monthly_cents.checked_add(cents))
            {
                Some(total) => breakdown.monthly_cents = total,
                None => breakdown.unpriced.push(Unpriced::Unparseable {
                    sku_id: sku_id.to_string(),
                    raw: raw.to_string(),
                }),
            },
        }
    }
    breakdown
}

fn warn_unpriced(unpriced: &[Unpriced]) {
    for entry in unpriced {
        match entry {
            Unpriced::Missing(sku_id) => {
                warn!(sku_id = %sku_id, "No price for SKU; counting it as zero cost")
            }
            Unpriced::Unparseable { sku_id, raw } => {
                warn!(sku_id = %sku_id, price = %raw, "Unparseable price for SKU; counting it as zero cost")
            }
        }
    }
}

/// Monthly cost of `sku_ids`. Unpriced SKUs contribute zero and are logged.
pub fn compute_monthly_cost<S, P>(sku_ids: &[S], prices: &P) -> Decimal
where
    S: AsRef<str>,
    P: PriceLookup + ?Sized,
{
    let breakdown = monthly_breakdown(sku_ids, prices);
    warn_unpriced(&breakdown.unpriced);
    breakdown.monthly()
}

/// Annual cost of `sku_ids`: monthly cents times 12, applied once.
pub fn compute_annual_cost<S, P>(sku_ids: &[S], prices: &P) -> Decimal
where
    S: AsRef<str>,
    P: PriceLookup + ?Sized,
{
    let breakdown = monthly_breakdown(sku_ids, prices);
    warn_unpriced(&breakdown.unpriced);
    breakdown.annual()
}
