//! Lenient monetary parsing and pt-BR currency formatting.
//!
//! Amounts arrive as free text: typed into a form, carried over from older
//! records, or half entered. Parsing never fails; anything without a numeric
//! prefix is worth zero so that summaries stay available.

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::LazyLock;

const CURRENCY_SYMBOL: &str = "R$";

/// Optional sign, digits with an optional fraction (or a bare fraction), and
/// an optional exponent. Anything after the match is ignored.
static NUMERIC_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").ok()
});

/// How locale punctuation is normalised before a numeric parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmountFormat {
    /// A comma marks the decimal point and every period before it is a
    /// thousands separator. Without a comma the period is the decimal point.
    #[default]
    Grouped,
    /// Strip the symbol and turn the first comma into a period, nothing
    /// else. `"1.234,56"` parses as `1.234`.
    Legacy,
}

impl AmountFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grouped => "grouped",
            Self::Legacy => "legacy",
        }
    }

    /// Parse `raw`, returning `None` when no number can be read from it.
    pub fn try_parse(&self, raw: &str) -> Option<Decimal> {
        let normalized = match self {
            Self::Grouped => normalize_grouped(raw),
            Self::Legacy => raw.replace(CURRENCY_SYMBOL, "").replacen(',', ".", 1),
        };
        parse_numeric_prefix(normalized.trim())
    }

    /// Lenient parse: blank, missing and malformed input are all zero.
    pub fn parse<'a>(&self, raw: impl Into<Option<&'a str>>) -> Decimal {
        let Some(raw) = raw.into() else {
            return Decimal::ZERO;
        };
        if raw.trim().is_empty() {
            return Decimal::ZERO;
        }
        self.try_parse(raw).unwrap_or_else(|| {
            tracing::trace!(raw, "unparsable amount treated as zero");
            Decimal::ZERO
        })
    }
}

impl FromStr for AmountFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grouped" | "pt-br" | "ptbr" => Ok(Self::Grouped),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown amount format '{other}' (expected grouped or legacy)")),
        }
    }
}

impl std::fmt::Display for AmountFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a monetary string with the default [`AmountFormat::Grouped`] rules.
///
/// `parse_currency("R$ 1.234,56")` is `1234.56`; `parse_currency("")`,
/// `parse_currency(None)` and `parse_currency("abc")` are all zero.
pub fn parse_currency<'a>(raw: impl Into<Option<&'a str>>) -> Decimal {
    AmountFormat::Grouped.parse(raw)
}

/// Render a parsed amount as a plain two-decimal string, e.g. `"100,5"` →
/// `"100.50"`. This is the form amounts are stored in.
pub fn normalize_amount(raw: &str, format: AmountFormat) -> String {
    format!("{:.2}", round_cents(format.parse(raw)))
}

/// Round half away from zero to two decimal places.
pub fn round_cents(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as Brazilian reais with two decimal places.
/// e.g. `1234567.891` → `"R$ 1.234.567,89"`, `-20` → `"-R$ 20,00"`
pub fn format_brl(val: Decimal) -> String {
    let abs = round_cents(val.abs());
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let grouped: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if val < Decimal::ZERO && !abs.is_zero() {
        format!("-{CURRENCY_SYMBOL} {grouped},{dec_part}")
    } else {
        format!("{CURRENCY_SYMBOL} {grouped},{dec_part}")
    }
}

fn normalize_grouped(raw: &str) -> String {
    let compact: String = raw
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.contains(',') {
        compact.replace('.', "").replacen(',', ".", 1)
    } else {
        compact
    }
}

fn parse_numeric_prefix(s: &str) -> Option<Decimal> {
    let matched = NUMERIC_PREFIX.as_ref()?.find(s)?.as_str();
    if matched.contains(['e', 'E']) {
        Decimal::from_scientific(matched).ok()
    } else {
        // "5." is a valid prefix but not a valid Decimal literal
        Decimal::from_str(matched.trim_end_matches('.')).ok()
    }
}
