//! Spreadsheet export of the sales ledger.
//!
//! Produces an Office Open XML workbook with a single worksheet, a bold header
//! row and one row per sale in ledger order. There is no index column.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};
use sales_ledger_core::{Sale, SalesLedger};
use thiserror::Error;

/// Download file name.
pub const EXPORT_FILE_NAME: &str = "relatorio_vendas.xlsx";

/// MIME type of `.xlsx` files.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Title of the only worksheet.
pub const SHEET_NAME: &str = "Relatório de Vendas";

/// Header row, in column order.
pub const COLUMNS: [&str; 6] = [
    "Produto",
    "Quantidade",
    "Preço de venda",
    "Percentual (%)",
    "Valor a receber",
    "Data",
];

/// Errors raised while building the workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("value cannot be stored in a spreadsheet cell: {0}")]
    OutOfRange(String),
}

/// Serialize the ledger into an `.xlsx` file held in memory.
///
/// # Errors
///
/// Returns `ExportError` if a value does not fit a spreadsheet cell or the
/// workbook cannot be assembled.
pub fn sales_workbook(ledger: &SalesLedger) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, sale) in (1u32..).zip(ledger.sales()) {
        write_sale_row(worksheet, row, sale, &date_format)?;
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

fn write_sale_row(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    sale: &Sale,
    date_format: &Format,
) -> Result<(), ExportError> {
    worksheet.write_string(row, 0, &sale.product_name)?;
    worksheet.write_number(row, 1, f64::from(sale.quantity))?;
    worksheet.write_number(row, 2, decimal_to_f64(sale.unit_price)?)?;
    worksheet.write_number(row, 3, decimal_to_f64(sale.receivable_percent)?)?;
    worksheet.write_number(row, 4, decimal_to_f64(sale.receivable_amount)?)?;
    match excel_date(sale.date) {
        Some(date) => worksheet.write_datetime_with_format(row, 5, &date, date_format)?,
        // Excel has no serial number before 1900 or after 9999
        None => worksheet.write_string(row, 5, sale.date.format("%Y-%m-%d").to_string())?,
    };
    Ok(())
}

fn decimal_to_f64(value: Decimal) -> Result<f64, ExportError> {
    value
        .to_f64()
        .ok_or_else(|| ExportError::OutOfRange(value.to_string()))
}

/// The date as an Excel serial date, if Excel can represent it.
fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    ExcelDateTime::from_ymd(year, month, day).ok()
}
