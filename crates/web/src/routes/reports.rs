//! Sales report page and spreadsheet download.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use sales_ledger_core::{Sale, format_money, format_percent};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{NavItem, Notice, Page};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::load_sales_session;
use crate::services::export::{EXPORT_FILE_NAME, XLSX_CONTENT_TYPE, sales_workbook};

pub const NO_SALES_WARNING: &str = "Nenhuma venda registrada.";

/// Ledger row formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRow {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub receivable_percent: String,
    pub receivable_amount: String,
    pub date: String,
}

impl From<&Sale> for SaleRow {
    fn from(sale: &Sale) -> Self {
        Self {
            product_name: sale.product_name.clone(),
            quantity: sale.quantity,
            unit_price: format_money(sale.unit_price),
            receivable_percent: format_percent(sale.receivable_percent),
            receivable_amount: format_money(sale.receivable_amount),
            date: sale.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Report page template.
#[derive(Template, WebTemplate)]
#[template(path = "reports/index.html")]
pub struct ReportsTemplate {
    pub nav: Vec<NavItem>,
    pub notice: Option<Notice>,
    pub rows: Vec<SaleRow>,
    pub total_quantity: u64,
    pub total_sold_value: String,
    pub total_receivable: String,
    pub export_file_name: &'static str,
}

/// Display the ledger with its totals, or a warning when it is empty.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Result<ReportsTemplate> {
    let data = load_sales_session(&session).await?;
    let summary = data.summary();

    let notice = data
        .ledger()
        .is_empty()
        .then(|| Notice::warning(NO_SALES_WARNING));

    Ok(ReportsTemplate {
        nav: Page::Reports.nav(),
        notice,
        rows: data.ledger().sales().iter().map(SaleRow::from).collect(),
        total_quantity: summary.total_quantity,
        total_sold_value: format_money(summary.total_sold_value),
        total_receivable: format_money(summary.total_receivable),
        export_file_name: EXPORT_FILE_NAME,
    })
}

/// Download the ledger as `relatorio_vendas.xlsx`.
#[instrument(skip(session))]
pub async fn export(session: Session) -> Result<Response> {
    let data = load_sales_session(&session).await?;
    if data.ledger().is_empty() {
        return Err(AppError::NotFound(NO_SALES_WARNING.to_string()));
    }

    let bytes = sales_workbook(data.ledger())?;
    add_breadcrumb("report", "Report exported");
    tracing::info!(
        rows = data.ledger().len(),
        size_bytes = bytes.len(),
        "Report exported"
    );

    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use sales_ledger_core::{SaleInput, SalesSession};
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::save_sales_session;

    async fn session_with_sales(sales: &[(u32, &str, &str)]) -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let mut data = SalesSession::new();
        data.register_product("Widget", "A test widget").unwrap();
        for (quantity, price, percent) in sales {
            data.record_sale(SaleInput {
                product_name: "Widget".to_string(),
                quantity: *quantity,
                unit_price: price.parse().unwrap(),
                receivable_percent: percent.parse().unwrap(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .unwrap();
        }
        save_sales_session(&session, &data).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_empty_ledger_shows_warning_only() {
        let session = session_with_sales(&[]).await;
        let page = index(session).await.unwrap();
        assert_eq!(page.notice, Some(Notice::warning(NO_SALES_WARNING)));

        let html = page.render().unwrap();
        assert!(html.contains(NO_SALES_WARNING));
        assert!(!html.contains("<table"));
        assert!(!html.contains("Exportar"));
    }

    #[tokio::test]
    async fn test_totals_for_example_sale() {
        let session = session_with_sales(&[(3, "10.00", "20.0")]).await;
        let page = index(session).await.unwrap();

        assert!(page.notice.is_none());
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.total_quantity, 3);
        assert_eq!(page.total_sold_value, "30.00");
        assert_eq!(page.total_receivable, "6.00");

        let html = page.render().unwrap();
        assert!(html.contains("Total de produtos vendidos"));
        assert!(html.contains("Exportar relatório para Excel"));
    }

    #[tokio::test]
    async fn test_export_headers() {
        let session = session_with_sales(&[(1, "5.00", "10.0")]).await;
        let response = export(session).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            XLSX_CONTENT_TYPE
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"relatorio_vendas.xlsx\""
        );
    }

    #[tokio::test]
    async fn test_export_without_sales_is_not_found() {
        let session = session_with_sales(&[]).await;
        let err = export(session).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
