//! Page configuration
//!
//! The server-rendered page embeds a JSON block
//! `<script type="application/json" id="delivery-form-config">` describing
//! which form to mount, its choices and the rows it already holds.

use contracts::domain::a001_good::aggregate::GoodRef;
use contracts::domain::a002_purchase_order::aggregate::{OrderId, OrderRef};
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "delivery-form-config";

/// Used when the page carries no configuration block or it fails to parse
const DEFAULT_CONFIG: &str = r#"{
    "page": "delivery",
    "api_prefix": "/api",
    "formset_prefix": "items",
    "enhanced_select": false,
    "goods": [],
    "orders": [],
    "initial_rows": []
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Delivery (`Entrega`) items: good, order, stock, price, quantity
    #[default]
    Delivery,
    /// Purchase order edit view: good, quantity, editable price, line total
    OrderEdit,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub page: PageKind,
    /// Prefix of the JSON endpoints, relative to the page origin
    pub api_prefix: String,
    pub formset_prefix: String,
    /// Render the searchable dropdown instead of plain selects
    pub enhanced_select: bool,
    pub goods: Vec<GoodRef>,
    /// Choices for the order selector in the header of the edit view
    pub orders: Vec<OrderRef>,
    /// Order the edit view starts scoped to
    pub order_id: Option<OrderId>,
    /// Rows that already exist on the server (`INITIAL_FORMS`)
    pub initial_forms: Option<usize>,
    pub initial_rows: Vec<InitialRow>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            page: PageKind::Delivery,
            api_prefix: "/api".to_string(),
            formset_prefix: "items".to_string(),
            enhanced_select: false,
            goods: Vec::new(),
            orders: Vec::new(),
            order_id: None,
            initial_forms: None,
            initial_rows: Vec::new(),
        }
    }
}

impl FormConfig {
    /// `INITIAL_FORMS`, defaulting to the number of pre-rendered rows
    pub fn initial_form_count(&self) -> usize {
        self.initial_forms.unwrap_or(self.initial_rows.len())
    }
}

/// Values of a row rendered by the server, exactly as they appear in its
/// controls. Ids stay raw strings and are parsed when the row is wired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InitialRow {
    pub id: Option<String>,
    pub bien: Option<String>,
    pub orden_de_compra: Option<String>,
    pub cantidad: String,
    pub precio_unitario: String,
}

pub fn parse_config(raw: &str) -> Result<FormConfig, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Read the configuration block from the document
///
/// Falls back to the embedded default when the block is missing or invalid.
pub fn load_config() -> FormConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match raw {
        Some(text) => match parse_config(&text) {
            Ok(config) => {
                log::debug!(
                    "Loaded form config: page={:?}, {} initial rows",
                    config.page,
                    config.initial_rows.len()
                );
                return config;
            }
            Err(e) => log::warn!("Invalid #{} block: {}", CONFIG_ELEMENT_ID, e),
        },
        None => log::warn!("#{} not found", CONFIG_ELEMENT_ID),
    }

    log::info!("Using default embedded form configuration");
    parse_config(DEFAULT_CONFIG).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, FormConfig::default());
        assert_eq!(config.initial_form_count(), 0);
    }

    #[test]
    fn test_delivery_config_with_rows() {
        let raw = r#"{
            "formset_prefix": "bienes",
            "enhanced_select": true,
            "goods": [{"id": 1, "nombre": "RESMA A4"}],
            "initial_rows": [
                {"id": "40", "bien": "1", "orden_de_compra": "7", "cantidad": "3"},
                {}
            ]
        }"#;
        let config = parse_config(raw).unwrap();
        assert_eq!(config.page, PageKind::Delivery);
        assert_eq!(config.formset_prefix, "bienes");
        assert!(config.enhanced_select);
        assert_eq!(config.goods, vec![GoodRef::new(1, "RESMA A4")]);
        assert_eq!(config.initial_rows[0].orden_de_compra.as_deref(), Some("7"));
        assert_eq!(config.initial_rows[1], InitialRow::default());
        assert_eq!(config.initial_form_count(), 2);
    }

    #[test]
    fn test_order_edit_config() {
        let raw = r#"{
            "page": "order_edit",
            "orders": [{"id": 7, "numero": "OC #0007"}],
            "order_id": 7,
            "initial_forms": 1
        }"#;
        let config = parse_config(raw).unwrap();
        assert_eq!(config.page, PageKind::OrderEdit);
        assert_eq!(config.order_id, Some(OrderId(7)));
        assert_eq!(config.orders[0].display_number, "OC #0007");
        assert_eq!(config.initial_form_count(), 1);
    }
}
