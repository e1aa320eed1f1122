//! Invoice document model.
//!
//! Amounts stay as the strings they arrived as; they are only interpreted by
//! the validator. Field names follow the UBL element names on the wire.

use serde::{Deserialize, Serialize};

/// An invoice reduced to the fields that take part in the total calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Invoice {
    /// Sum of all line amounts, excluding tax.
    pub line_extension_amount: String,

    /// Declared tax total and its per-rate breakdown.
    pub tax_total: TaxTotal,
}

/// Total tax of an invoice and the subtotals it is composed of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaxTotal {
    pub tax_amount: String,

    /// One entry per tax rate, in document order.
    pub tax_subtotal: Vec<TaxSubtotal>,
}

/// One tax-rate bracket's contribution to the tax total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaxSubtotal {
    pub taxable_amount: String,
    pub tax_amount: String,
    pub tax_category: TaxCategory,
}

/// Tax category code and rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCategory {
    /// Category code such as `S` or `R`. Not interpreted.
    #[serde(rename = "ID")]
    pub id: String,

    /// Whole-number percentage, e.g. `"20"`.
    #[serde(rename = "Percent")]
    pub percent: String,
}

impl Invoice {
    pub fn new(line_extension_amount: impl Into<String>, tax_total: TaxTotal) -> Self {
        Invoice {
            line_extension_amount: line_extension_amount.into(),
            tax_total,
        }
    }
}

impl TaxTotal {
    pub fn new(tax_amount: impl Into<String>, tax_subtotal: Vec<TaxSubtotal>) -> Self {
        TaxTotal {
            tax_amount: tax_amount.into(),
            tax_subtotal,
        }
    }
}

impl TaxSubtotal {
    /// Creates a subtotal for category `id` charged at `percent`.
    pub fn new(
        taxable_amount: impl Into<String>,
        tax_amount: impl Into<String>,
        id: impl Into<String>,
        percent: impl Into<String>,
    ) -> Self {
        TaxSubtotal {
            taxable_amount: taxable_amount.into(),
            tax_amount: tax_amount.into(),
            tax_category: TaxCategory {
                id: id.into(),
                percent: percent.into(),
            },
        }
    }
}
