use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::controller::TransactionId;
use crate::error::ConfigError;
use crate::rows::RowKind;

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "finance-tracker-config";

const ID_PLACEHOLDER: &str = "{id}";

// Characters that cannot appear raw inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub listing_path: String,
    pub delete_path: String,

    pub modal_id: String,
    pub confirm_id: String,
    pub cancel_id: String,
    pub active_class: String,
    pub delete_trigger_selector: String,
    pub id_attribute: String,

    pub filter_form_id: String,
    pub reset_id: String,
    pub category_field_id: String,
    pub type_field_id: String,
    pub start_date_field_id: String,
    pub end_date_field_id: String,

    pub row_selector: String,
    pub amount_selector: String,
    pub income_class: String,
    pub expense_class: String,
    pub income_color: String,
    pub expense_color: String,

    pub delete_failed_message: String,
    pub log_level: String,
}

fn default_config() -> PageConfig {
    PageConfig {
        listing_path: "/transactions".to_string(),
        delete_path: "/transaction/{id}".to_string(),

        modal_id: "delete-modal".to_string(),
        confirm_id: "confirm-delete".to_string(),
        cancel_id: "cancel-delete".to_string(),
        active_class: "active".to_string(),
        delete_trigger_selector: ".delete-transaction".to_string(),
        id_attribute: "data-id".to_string(),

        filter_form_id: "filter-form".to_string(),
        reset_id: "reset-filters".to_string(),
        category_field_id: "filter-category".to_string(),
        type_field_id: "filter-type".to_string(),
        start_date_field_id: "start-date".to_string(),
        end_date_field_id: "end-date".to_string(),

        row_selector: ".transaction-table tr".to_string(),
        amount_selector: ".amount".to_string(),
        income_class: "income".to_string(),
        expense_class: "expense".to_string(),
        income_color: "var(--income-color)".to_string(),
        expense_color: "var(--expense-color)".to_string(),

        delete_failed_message: "Failed to delete transaction. Please try again.".to_string(),
        log_level: "info".to_string(),
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        default_config()
    }
}

impl PageConfig {
    pub fn delete_url(&self, id: &TransactionId) -> String {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT).to_string();
        if self.delete_path.contains(ID_PLACEHOLDER) {
            self.delete_path.replace(ID_PLACEHOLDER, &segment)
        } else {
            format!("{}/{}", self.delete_path.trim_end_matches('/'), segment)
        }
    }

    pub fn tint_color(&self, kind: RowKind) -> &str {
        match kind {
            RowKind::Income => &self.income_color,
            RowKind::Expense => &self.expense_color,
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

pub fn parse_config(raw: &str) -> Result<PageConfig, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(default_config());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Reads overrides embedded in the page. A page without the block gets the defaults.
pub fn load_config(document: &Document) -> Result<PageConfig, ConfigError> {
    if let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) {
        if let Some(raw) = element.text_content() {
            return parse_config(&raw);
        }
    }
    Ok(default_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(r#"{"listing_path": "/ledger", "log_level": "debug"}"#)
            .unwrap();
        assert_eq!(config.listing_path, "/ledger");
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.modal_id, "delete-modal");
        assert_eq!(config.delete_path, "/transaction/{id}");
    }

    #[test]
    fn blank_block_means_defaults() {
        assert_eq!(parse_config("  \n").unwrap(), PageConfig::default());
    }

    #[test]
    fn malformed_block_is_an_error() {
        assert!(matches!(
            parse_config("{listing_path: nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = PageConfig {
            log_level: "chatty".to_string(),
            ..PageConfig::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn delete_url_fills_placeholder() {
        let id = TransactionId::parse("42").unwrap();
        assert_eq!(PageConfig::default().delete_url(&id), "/transaction/42");

        let config = PageConfig {
            delete_path: "/transactions/{id}/delete".to_string(),
            ..PageConfig::default()
        };
        assert_eq!(config.delete_url(&id), "/transactions/42/delete");
    }

    #[test]
    fn delete_url_encodes_the_id_as_one_segment() {
        let config = PageConfig::default();
        let url = |raw: &str| config.delete_url(&TransactionId::parse(raw).unwrap());
        assert_eq!(url("tx.1"), "/transaction/tx.1");
        assert_eq!(url("2024:17"), "/transaction/2024:17");
        assert_eq!(url("abc~1"), "/transaction/abc~1");
        assert_eq!(url("../1"), "/transaction/..%2F1");
        assert_eq!(url("1?x=2"), "/transaction/1%3Fx=2");
        assert_eq!(url("a b#c"), "/transaction/a%20b%23c");
        assert_eq!(url("50%"), "/transaction/50%25");
    }

    #[test]
    fn delete_url_without_placeholder_appends_id() {
        let id = TransactionId::parse("7").unwrap();
        let config = PageConfig {
            delete_path: "/api/transactions/".to_string(),
            ..PageConfig::default()
        };
        assert_eq!(config.delete_url(&id), "/api/transactions/7");
    }

    #[test]
    fn tint_colors_follow_row_kind() {
        let config = PageConfig::default();
        assert_eq!(config.tint_color(RowKind::Income), "var(--income-color)");
        assert_eq!(config.tint_color(RowKind::Expense), "var(--expense-color)");
    }
}
