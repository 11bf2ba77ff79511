use std::str::FromStr;

use console::style;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tabled::{settings::{Alignment, Style}, Table, Tabled};

use crate::views::{cart::CartViewModel, catalog::CatalogViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    EnUs,
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported locale '{0}', expected pt-BR or en-US")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" => Ok(Locale::PtBr),
            "en-us" => Ok(Locale::EnUs),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::EnUs => write!(f, "en-US"),
        }
    }
}

/// Renders exact amounts as currency text with two fractional digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyFormatter {
    locale: Locale,
}

impl CurrencyFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let abs = rounded.abs();
        // trunc() is below 2^96 and fract() * 100 is below 100, so neither conversion fails.
        let units = abs.trunc().to_u128().unwrap_or_default();
        let cents = (abs.fract() * Decimal::ONE_HUNDRED).to_u8().unwrap_or_default();

        match self.locale {
            Locale::PtBr => format!("{}R$ {},{:02}", sign, group_digits(units, '.'), cents),
            Locale::EnUs => format!("{}${}.{:02}", sign, group_digits(units, ','), cents),
        }
    }
}

/// Formats with the default pt-BR locale.
pub fn format_currency(amount: Decimal) -> String {
    CurrencyFormatter::default().format(amount)
}

fn group_digits(units: u128, separator: char) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Product")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "In cart")]
    in_cart: u32,
    #[tabled(rename = "Image")]
    image: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Product")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    amount: String,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
    #[tabled(rename = "Image")]
    image: String,
}

pub fn format_catalog_table(view: &CatalogViewModel) -> String {
    if view.entries.is_empty() {
        return String::new();
    }

    let rows: Vec<CatalogTableRow> = view
        .entries
        .iter()
        .map(|entry| CatalogTableRow {
            id: entry.id.0,
            title: shorten(&entry.title, 40),
            price: entry.price_formatted.clone(),
            in_cart: entry.in_cart,
            image: shorten(&entry.image, 32),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

/// Cart rows; an empty cart still renders the header.
pub fn format_cart_table(view: &CartViewModel) -> String {
    let rows: Vec<CartTableRow> = view
        .rows
        .iter()
        .map(|row| CartTableRow {
            id: row.item.id().0,
            title: shorten(&row.item.product.title, 40),
            price: row.price_formatted.clone(),
            amount: format!("[-] {} [+]", row.item.amount),
            subtotal: row.subtotal.clone(),
            image: shorten(&row.item.product.image, 32),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

pub fn format_cart_footer(view: &CartViewModel) -> String {
    format!(
        "[ {} ]    {} {}",
        style(view.checkout_label).bold().cyan(),
        style("Total").dim(),
        style(&view.total).bold().green()
    )
}
