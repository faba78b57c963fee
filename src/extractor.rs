// 🧾 Expense Extractor - XML fragment → tax breakdown
// Parses an expense fragment, pulls out cost centre and total, and
// derives tax amounts with exact decimal arithmetic.

use crate::error::{ExtractError, Result};
use roxmltree::Document;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Sentinel used when the fragment carries no cost centre.
pub const COST_CENTRE_UNKNOWN: &str = "UNKNOWN";

/// ExpenseRecord - Output of ExpenseExtractor::extract()
///
/// Built per request from input text, never persisted. The derived
/// fields always satisfy `tax + total_excluding_tax == total` exactly,
/// because all arithmetic is done in `Decimal`, never `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub cost_centre: String,
    pub total: Decimal,
    pub tax: Decimal,
    pub total_excluding_tax: Decimal,
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// ExpenseExtractor - Stateless extraction engine
///
/// Holds only the tax rate, so it is `Clone + Send + Sync` and safe to
/// share across unlimited concurrent requests.
#[derive(Debug, Clone)]
pub struct ExpenseExtractor {
    tax_rate: Decimal,
}

impl Default for ExpenseExtractor {
    fn default() -> Self {
        // 20% flat rate, matching the upstream service
        ExpenseExtractor {
            tax_rate: Decimal::new(2, 1),
        }
    }
}

impl ExpenseExtractor {
    /// Create an extractor with the default 20% tax rate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom tax rate (e.g. `0.15`)
    pub fn with_rate(tax_rate: Decimal) -> Self {
        ExpenseExtractor { tax_rate }
    }

    /// The rate applied to extracted totals
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Extract an expense record from an XML fragment.
    ///
    /// The input is a fragment, not a full document, so it is wrapped in
    /// a synthetic `<root>` element before parsing. The first `<expense>`
    /// element found anywhere in the tree wins; `<cost_centre>` and
    /// `<total>` must be direct children of it.
    ///
    /// # Returns
    /// * `Ok(ExpenseRecord)` - Populated record with derived tax fields
    /// * `Err(ExtractError)` - Malformed markup or missing/invalid fields
    pub fn extract(&self, text: &str) -> Result<ExpenseRecord> {
        let wrapped = format!("<root>{text}</root>");
        let doc = Document::parse(&wrapped).map_err(|e| ExtractError::MalformedInput {
            message: e.to_string(),
        })?;

        let expense = doc
            .descendants()
            .find(|n| n.has_tag_name("expense"))
            .ok_or(ExtractError::MissingExpenseNode)?;

        let cost_centre = match expense.children().find(|n| n.has_tag_name("cost_centre")) {
            Some(node) => node.text().unwrap_or("").trim().to_string(),
            None => COST_CENTRE_UNKNOWN.to_string(),
        };

        let total_node = expense
            .children()
            .find(|n| n.has_tag_name("total"))
            .ok_or(ExtractError::MissingTotalNode)?;

        let raw_total = total_node.text().unwrap_or("").trim().to_string();
        // Strip thousands separators before parsing ("1,200.00" → "1200.00")
        let total: Decimal =
            raw_total
                .replace(',', "")
                .parse()
                .map_err(|_| ExtractError::InvalidTotal {
                    value: raw_total.clone(),
                })?;

        let tax = total * self.tax_rate;
        let total_excluding_tax = total - tax;

        Ok(ExpenseRecord {
            cost_centre,
            total,
            tax,
            total_excluding_tax,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_full_record() {
        let extractor = ExpenseExtractor::new();
        let record = extractor
            .extract("<expense><cost_centre>Ops</cost_centre><total>1,200.00</total></expense>")
            .unwrap();

        assert_eq!(record.cost_centre, "Ops");
        assert_eq!(record.total, dec("1200.00"));
        assert_eq!(record.tax, dec("240.00"));
        assert_eq!(record.total_excluding_tax, dec("960.00"));
    }

    #[test]
    fn test_missing_cost_centre_defaults_to_unknown() {
        let extractor = ExpenseExtractor::new();
        let record = extractor
            .extract("<expense><total>50</total></expense>")
            .unwrap();

        assert_eq!(record.cost_centre, COST_CENTRE_UNKNOWN);
        assert_eq!(record.total, dec("50"));
    }

    #[test]
    fn test_cost_centre_whitespace_is_trimmed() {
        let extractor = ExpenseExtractor::new();
        let record = extractor
            .extract("<expense><cost_centre>  Ops  </cost_centre><total>50</total></expense>")
            .unwrap();

        assert_eq!(record.cost_centre, "Ops");
    }

    #[test]
    fn test_missing_expense_node() {
        let extractor = ExpenseExtractor::new();
        let result = extractor.extract("<receipt><total>10</total></receipt>");

        assert_eq!(result.unwrap_err(), ExtractError::MissingExpenseNode);
    }

    #[test]
    fn test_missing_total_node() {
        let extractor = ExpenseExtractor::new();
        let result = extractor.extract("<expense><cost_centre>Ops</cost_centre></expense>");

        assert_eq!(result.unwrap_err(), ExtractError::MissingTotalNode);
    }

    #[test]
    fn test_non_numeric_total() {
        let extractor = ExpenseExtractor::new();
        let result = extractor.extract("<expense><total>lots</total></expense>");

        assert_eq!(
            result.unwrap_err(),
            ExtractError::InvalidTotal {
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_fragment() {
        let extractor = ExpenseExtractor::new();
        let result = extractor.extract("<expense><total>10</total>");

        match result.unwrap_err() {
            ExtractError::MalformedInput { message } => assert!(!message.is_empty()),
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_expense_node_is_found() {
        let extractor = ExpenseExtractor::new();
        let record = extractor
            .extract("<report><expense><total>80</total></expense></report>")
            .unwrap();

        assert_eq!(record.total, dec("80"));
        assert_eq!(record.tax, dec("16"));
    }

    #[test]
    fn test_first_expense_node_wins() {
        let extractor = ExpenseExtractor::new();
        let record = extractor
            .extract("<expense><total>10</total></expense><expense><total>20</total></expense>")
            .unwrap();

        assert_eq!(record.total, dec("10"));
    }

    #[test]
    fn test_tax_sum_invariant_is_exact() {
        let extractor = ExpenseExtractor::new();

        // Totals chosen to expose float rounding drift if it existed
        for total in ["0.01", "0.03", "19.99", "1234.56", "999999.99"] {
            let record = extractor
                .extract(&format!("<expense><total>{total}</total></expense>"))
                .unwrap();

            assert_eq!(record.tax, record.total * dec("0.2"));
            assert_eq!(record.tax + record.total_excluding_tax, record.total);
        }
    }

    #[test]
    fn test_custom_tax_rate() {
        let extractor = ExpenseExtractor::with_rate(dec("0.15"));
        let record = extractor
            .extract("<expense><total>100</total></expense>")
            .unwrap();

        assert_eq!(record.tax, dec("15"));
        assert_eq!(record.total_excluding_tax, dec("85"));
    }

    #[test]
    fn test_error_messages_are_client_facing() {
        assert_eq!(
            ExtractError::MissingExpenseNode.to_string(),
            "No expense node found"
        );
        assert_eq!(
            ExtractError::MissingTotalNode.to_string(),
            "No total node found"
        );
    }
}
