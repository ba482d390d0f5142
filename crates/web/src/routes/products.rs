//! Product registration page.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use sales_ledger_core::{CatalogError, Product};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{NavItem, Notice, Page};
use crate::error::{Result, add_breadcrumb};
use crate::models::{load_sales_session, save_sales_session};

pub const MISSING_NAME_WARNING: &str = "Informe o nome do produto.";
pub const REGISTERED_MESSAGE: &str = "Produto cadastrado com sucesso.";

/// Registration form data.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Product registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub nav: Vec<NavItem>,
    pub notice: Option<Notice>,
    pub form: RegisterForm,
    pub products: Vec<Product>,
}

impl ProductsTemplate {
    fn new(products: &[Product], form: RegisterForm, notice: Option<Notice>) -> Self {
        Self {
            nav: Page::Products.nav(),
            notice,
            form,
            products: products.to_vec(),
        }
    }
}

/// Display the registration form and the current catalog.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Result<ProductsTemplate> {
    let data = load_sales_session(&session).await?;
    Ok(ProductsTemplate::new(
        data.catalog().products(),
        RegisterForm::default(),
        None,
    ))
}

/// Register a product.
///
/// A blank name shows a warning and leaves the catalog as it was. Either way
/// the page is re-rendered with the full catalog and the typed values.
#[instrument(skip(session), fields(name = %form.name))]
pub async fn register(session: Session, Form(form): Form<RegisterForm>) -> Result<ProductsTemplate> {
    let mut data = load_sales_session(&session).await?;

    let notice = match data.register_product(form.name.as_str(), form.description.as_str()) {
        Ok(product) => {
            save_sales_session(&session, &data).await?;
            add_breadcrumb("catalog", "Product registered");
            tracing::info!(
                name = %product.name,
                catalog_size = data.catalog().len(),
                "Product registered"
            );
            Notice::success(REGISTERED_MESSAGE)
        }
        Err(CatalogError::EmptyName) => {
            tracing::warn!("Product registration rejected: empty name");
            Notice::warning(MISSING_NAME_WARNING)
        }
    };

    Ok(ProductsTemplate::new(
        data.catalog().products(),
        form,
        Some(notice),
    ))
}
