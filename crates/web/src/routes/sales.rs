//! Sale entry page.
//!
//! The receivable preview is refreshed on every input change
//! (`POST /sales/preview`, requested by `static/js/preview.js`) and is
//! computed by the same function that produces the stored snapshot on submit.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use chrono::{Local, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use sales_ledger_core::{
    CatalogStore, MONEY_SCALE, PERCENT_SCALE, SaleError, SaleInput, SalesSession, format_money,
    format_percent,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{NavItem, Notice, Page};
use crate::error::{Result, add_breadcrumb};
use crate::models::{load_sales_session, save_sales_session};

pub const EMPTY_CATALOG_WARNING: &str = "Cadastre um produto antes de registrar vendas.";
pub const RECORDED_MESSAGE: &str = "Venda registrada com sucesso.";

/// How far the date picker reaches on either side of today.
const DATE_RANGE: Months = Months::new(10 * 12);

/// Raw sale form fields.
///
/// Everything arrives as text so that a half-typed number never rejects the
/// request; [`SaleForm::to_input`] applies the widget constraints instead.
#[derive(Debug, Default, Deserialize)]
pub struct SaleForm {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit_price: String,
    #[serde(default)]
    pub receivable_percent: String,
    #[serde(default)]
    pub date: String,
}

impl SaleForm {
    /// Normalize the fields the way the input widgets would.
    ///
    /// Quantity is at least 1, price and percent at least 0 and kept at the
    /// widget precision. An unreadable date falls back to `today` and a
    /// readable one is clamped to [`date_bounds`]. Unparseable numbers take
    /// the widget default.
    #[must_use]
    pub fn to_input(&self, today: NaiveDate) -> SaleInput {
        let (min_date, max_date) = date_bounds(today);
        SaleInput {
            product_name: self.product.clone(),
            quantity: parse_quantity(&self.quantity),
            unit_price: parse_non_negative(&self.unit_price, MONEY_SCALE),
            receivable_percent: parse_non_negative(&self.receivable_percent, PERCENT_SCALE),
            date: NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
                .map_or(today, |date| date.clamp(min_date, max_date)),
        }
    }

    /// Like [`SaleForm::to_input`], with the product restricted to the select
    /// box options: an empty or unknown name becomes the first catalog entry.
    #[must_use]
    pub fn to_input_for(&self, catalog: &CatalogStore, today: NaiveDate) -> SaleInput {
        let mut input = self.to_input(today);
        if !catalog.contains_name(&input.product_name) {
            input.product_name = catalog.names().next().unwrap_or_default().to_string();
        }
        input
    }
}

/// Earliest and latest selectable sale dates.
#[must_use]
pub fn date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        today.checked_sub_months(DATE_RANGE).unwrap_or(NaiveDate::MIN),
        today.checked_add_months(DATE_RANGE).unwrap_or(NaiveDate::MAX),
    )
}

fn parse_quantity(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .map_or(1, |n| u32::try_from(n.max(1)).unwrap_or(u32::MAX))
}

fn parse_non_negative(raw: &str, scale: u32) -> Decimal {
    raw.trim()
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Current local date, the default for new sales.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Product choice in the select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOption {
    pub name: String,
    pub selected: bool,
}

/// Sale form values as shown in the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleFormView {
    pub quantity: String,
    pub unit_price: String,
    pub receivable_percent: String,
    pub date: String,
    pub min_date: String,
    pub max_date: String,
}

impl SaleFormView {
    fn new(input: &SaleInput, today: NaiveDate) -> Self {
        let (min_date, max_date) = date_bounds(today);
        Self {
            quantity: input.quantity.to_string(),
            unit_price: format_money(input.unit_price),
            receivable_percent: format_percent(input.receivable_percent),
            date: input.date.format("%Y-%m-%d").to_string(),
            min_date: min_date.format("%Y-%m-%d").to_string(),
            max_date: max_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Sale entry page template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/index.html")]
pub struct SalesTemplate {
    pub nav: Vec<NavItem>,
    pub notice: Option<Notice>,
    /// Hides the form entirely.
    pub catalog_empty: bool,
    pub products: Vec<ProductOption>,
    pub form: SaleFormView,
    pub receivable: String,
}

impl SalesTemplate {
    /// Page shown while no product exists.
    fn blocked() -> Self {
        Self {
            nav: Page::Sales.nav(),
            notice: Some(Notice::warning(EMPTY_CATALOG_WARNING)),
            catalog_empty: true,
            products: Vec::new(),
            form: SaleFormView {
                quantity: String::new(),
                unit_price: String::new(),
                receivable_percent: String::new(),
                date: String::new(),
                min_date: String::new(),
                max_date: String::new(),
            },
            receivable: format_money(Decimal::ZERO),
        }
    }

    /// Page with the form filled from `input`.
    fn with_form(
        data: &SalesSession,
        input: &SaleInput,
        today: NaiveDate,
        notice: Option<Notice>,
    ) -> Self {
        if data.catalog().is_empty() {
            return Self::blocked();
        }

        // Only the first product with the chosen name is marked, so duplicate
        // names still yield a single selected option.
        let mut marked = false;
        let products = data
            .catalog()
            .names()
            .map(|name| {
                let selected = !marked && name == input.product_name;
                marked |= selected;
                ProductOption {
                    name: name.to_string(),
                    selected,
                }
            })
            .collect();

        Self {
            nav: Page::Sales.nav(),
            notice,
            catalog_empty: false,
            products,
            form: SaleFormView::new(input, today),
            receivable: format_money(input.receivable_amount()),
        }
    }
}

/// Receivable preview fragment.
#[derive(Template, WebTemplate)]
#[template(path = "sales/preview.html")]
pub struct PreviewTemplate {
    pub receivable: String,
}

/// Form defaults: first product, quantity 1, zero price and percent, today.
fn default_input(data: &SalesSession, today: NaiveDate) -> SaleInput {
    SaleInput {
        product_name: data.catalog().names().next().unwrap_or_default().to_string(),
        quantity: 1,
        unit_price: Decimal::ZERO,
        receivable_percent: Decimal::ZERO,
        date: today,
    }
}

/// Display the sale form, or a warning when the catalog is empty.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Result<SalesTemplate> {
    let data = load_sales_session(&session).await?;
    let today = today();
    Ok(SalesTemplate::with_form(
        &data,
        &default_input(&data, today),
        today,
        None,
    ))
}

/// Render the receivable amount for the current form values.
#[instrument(level = "debug")]
pub async fn preview(Form(form): Form<SaleForm>) -> PreviewTemplate {
    let input = form.to_input(today());
    PreviewTemplate {
        receivable: format_money(input.receivable_amount()),
    }
}

/// Record a sale.
///
/// Once the form is reachable there is no rejection path: the values are
/// normalized and the sale is appended with its receivable snapshot.
#[instrument(skip(session), fields(product = %form.product))]
pub async fn record(session: Session, Form(form): Form<SaleForm>) -> Result<SalesTemplate> {
    let mut data = load_sales_session(&session).await?;
    let today = today();
    let input = form.to_input_for(data.catalog(), today);
    if input.product_name != form.product {
        tracing::debug!(requested = %form.product, "Product not in catalog, using first entry");
    }

    match data.record_sale(input.clone()) {
        Ok(sale) => {
            save_sales_session(&session, &data).await?;
            add_breadcrumb("ledger", "Sale recorded");
            tracing::info!(
                product = %sale.product_name,
                quantity = sale.quantity,
                receivable = %sale.receivable_amount,
                ledger_size = data.ledger().len(),
                "Sale recorded"
            );
            Ok(SalesTemplate::with_form(
                &data,
                &input,
                today,
                Some(Notice::success(RECORDED_MESSAGE)),
            ))
        }
        Err(SaleError::EmptyCatalog) => {
            tracing::warn!("Sale submitted with an empty catalog");
            Ok(SalesTemplate::blocked())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn form(product: &str, quantity: &str, price: &str, percent: &str, day: &str) -> SaleForm {
        SaleForm {
            product: product.to_string(),
            quantity: quantity.to_string(),
            unit_price: price.to_string(),
            receivable_percent: percent.to_string(),
            date: day.to_string(),
        }
    }

    async fn session_with_widget() -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let mut data = SalesSession::new();
        data.register_product("Widget", "A test widget").unwrap();
        save_sales_session(&session, &data).await.unwrap();
        session
    }

    #[test]
    fn test_to_input_parses_values() {
        let input = form("Widget", "3", "10.00", "20.0", "2024-01-01").to_input(date(2030, 1, 1));
        assert_eq!(input.product_name, "Widget");
        assert_eq!(input.quantity, 3);
        assert_eq!(input.unit_price, dec("10.00"));
        assert_eq!(input.receivable_percent, dec("20.0"));
        assert_eq!(input.date, date(2024, 1, 1));
        assert_eq!(input.receivable_amount(), dec("6.00"));
    }

    #[test]
    fn test_to_input_applies_widget_minimums() {
        let input = form("Widget", "0", "-5", "-1.5", "").to_input(date(2030, 1, 1));
        assert_eq!(input.quantity, 1);
        assert_eq!(input.unit_price, Decimal::ZERO);
        assert_eq!(input.receivable_percent, Decimal::ZERO);
        assert_eq!(input.date, date(2030, 1, 1));
    }

    #[test]
    fn test_to_input_defaults_unparseable_fields() {
        let input = form("Widget", "abc", "", "1,5", "01/02/2024").to_input(date(2030, 6, 1));
        assert_eq!(input.quantity, 1);
        assert_eq!(input.unit_price, Decimal::ZERO);
        assert_eq!(input.receivable_percent, Decimal::ZERO);
        assert_eq!(input.date, date(2030, 6, 1));
    }

    #[test]
    fn test_to_input_keeps_widget_precision() {
        let input = form("Widget", "2", "1.005", "12.25", "2024-01-01").to_input(date(2030, 1, 1));
        assert_eq!(input.unit_price, dec("1.01"));
        assert_eq!(input.receivable_percent, dec("12.3"));
    }

    #[test]
    fn test_to_input_clamps_date_to_picker_range() {
        let today = date(2030, 6, 1);
        let at = |day: &str| form("Widget", "1", "0", "0", day).to_input(today).date;

        assert_eq!(at("0500-06-15"), date(2020, 6, 1));
        assert_eq!(at("9999-12-31"), date(2040, 6, 1));
        assert_eq!(at("2025-02-14"), date(2025, 2, 14));
        assert_eq!(date_bounds(today), (date(2020, 6, 1), date(2040, 6, 1)));
    }

    #[test]
    fn test_date_bounds_on_leap_day() {
        assert_eq!(
            date_bounds(date(2024, 2, 29)),
            (date(2014, 2, 28), date(2034, 2, 28))
        );
    }

    #[test]
    fn test_to_input_for_keeps_product_within_catalog() {
        let mut catalog = CatalogStore::new();
        catalog.register("Widget", "").unwrap();
        catalog.register("Gadget", "").unwrap();
        let today = date(2030, 1, 1);
        let product = |name: &str| {
            form(name, "1", "0", "0", "")
                .to_input_for(&catalog, today)
                .product_name
        };

        assert_eq!(product("Gadget"), "Gadget");
        assert_eq!(product("Ghost"), "Widget");
        assert_eq!(product("widget"), "Widget");
        assert_eq!(product(""), "Widget");
    }

    #[tokio::test]
    async fn test_record_never_stores_unknown_product() {
        let session = session_with_widget().await;
        let page = record(session.clone(), Form(form("Ghost", "2", "5", "10", "")))
            .await
            .unwrap();
        assert_eq!(page.notice, Some(Notice::success(RECORDED_MESSAGE)));
        assert!(page.products.iter().all(|option| option.name != "Ghost"));

        let data = load_sales_session(&session).await.unwrap();
        let names: Vec<&str> = data
            .ledger()
            .sales()
            .iter()
            .map(|sale| sale.product_name.as_str())
            .collect();
        assert_eq!(names, ["Widget"]);
    }

    #[tokio::test]
    async fn test_record_clamps_out_of_range_date() {
        let session = session_with_widget().await;
        record(session.clone(), Form(form("Widget", "1", "1", "1", "0500-06-15")))
            .await
            .unwrap();

        let (min_date, _) = date_bounds(today());
        let data = load_sales_session(&session).await.unwrap();
        assert_eq!(data.ledger().sales().first().unwrap().date, min_date);
    }

    #[tokio::test]
    async fn test_preview_matches_recorded_snapshot() {
        let session = session_with_widget().await;
        let values = || form("Widget", "7", "3.33", "12.5", "2024-03-10");

        let preview = preview(Form(values())).await;
        let page = record(session.clone(), Form(values())).await.unwrap();
        assert_eq!(page.receivable, preview.receivable);

        let data = load_sales_session(&session).await.unwrap();
        let stored = data.ledger().sales().first().unwrap().receivable_amount;
        assert_eq!(format_money(stored), preview.receivable);
    }

    #[tokio::test]
    async fn test_record_appends_exactly_one_sale() {
        let session = session_with_widget().await;
        for n in 1..=3 {
            let page = record(session.clone(), Form(form("Widget", "1", "0", "0", "")))
                .await
                .unwrap();
            assert_eq!(page.notice, Some(Notice::success(RECORDED_MESSAGE)));
            let data = load_sales_session(&session).await.unwrap();
            assert_eq!(data.ledger().len(), n);
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_blocks_form_and_submit() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let page = index(session.clone()).await.unwrap();
        assert!(page.catalog_empty);
        assert_eq!(page.notice, Some(Notice::warning(EMPTY_CATALOG_WARNING)));
        let html = page.render().unwrap();
        assert!(!html.contains("<form"));

        let page = record(session.clone(), Form(form("Widget", "1", "1", "1", "")))
            .await
            .unwrap();
        assert!(page.catalog_empty);
        let data = load_sales_session(&session).await.unwrap();
        assert!(data.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_form_defaults() {
        let session = session_with_widget().await;
        let page = index(session).await.unwrap();
        assert!(!page.catalog_empty);
        assert_eq!(page.form.quantity, "1");
        assert_eq!(page.form.unit_price, "0.00");
        assert_eq!(page.form.receivable_percent, "0.0");
        assert_eq!(page.receivable, "0.00");

        let (min_date, max_date) = date_bounds(today());
        assert_eq!(page.form.min_date, min_date.format("%Y-%m-%d").to_string());
        assert_eq!(page.form.max_date, max_date.format("%Y-%m-%d").to_string());
        let html = page.render().unwrap();
        assert!(html.contains(&format!("min=\"{}\"", page.form.min_date)));
        assert!(html.contains(&format!("max=\"{}\"", page.form.max_date)));

        assert_eq!(
            page.products,
            [ProductOption {
                name: "Widget".to_string(),
                selected: true
            }]
        );
    }
}
