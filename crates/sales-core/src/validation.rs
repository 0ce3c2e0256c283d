//! Structural consistency checks over a catalog document.
//!
//! Every check runs to completion and contributes [`Finding`]s; a report is
//! valid when it holds no error-severity findings. The cost-versus-price rule
//! is a business sanity check and only produces warnings.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::document::CatalogDocument;

/// The individual checks run by [`validate_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// `metadata.total_products` matches the product count.
    TotalProducts,
    /// `metadata.active_products` matches the active product count.
    ActiveProducts,
    /// `metadata.total_categories` matches the category count.
    TotalCategories,
    /// Each product's category exists.
    CategoryReference,
    /// Product keys are unique.
    UniqueProductId,
    /// Category keys are unique.
    UniqueCategoryId,
    /// Cost does not exceed price.
    CostWithinPrice,
}

impl CheckKind {
    pub const ALL: [CheckKind; 7] = [
        CheckKind::TotalProducts,
        CheckKind::ActiveProducts,
        CheckKind::TotalCategories,
        CheckKind::CategoryReference,
        CheckKind::UniqueProductId,
        CheckKind::UniqueCategoryId,
        CheckKind::CostWithinPrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::TotalProducts => "total_products",
            CheckKind::ActiveProducts => "active_products",
            CheckKind::TotalCategories => "total_categories",
            CheckKind::CategoryReference => "category_reference",
            CheckKind::UniqueProductId => "unique_product_id",
            CheckKind::UniqueCategoryId => "unique_category_id",
            CheckKind::CostWithinPrice => "cost_within_price",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single problem found in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub check: CheckKind,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            check,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.check, self.message)
    }
}

/// Outcome of validating a catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub checks_run: usize,
}

impl ValidationReport {
    /// No error-severity findings.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// Findings produced by one check.
    pub fn for_check(&self, check: CheckKind) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.check == check)
    }
}

/// Run every structural check against a catalog.
pub fn validate_catalog(doc: &CatalogDocument) -> ValidationReport {
    let mut findings = Vec::new();

    check_counters(doc, &mut findings);
    check_category_references(doc, &mut findings);
    check_unique_keys(
        CheckKind::UniqueProductId,
        "product_id",
        doc.products.iter().map(|p| p.product_id.as_str()),
        &mut findings,
    );
    check_unique_keys(
        CheckKind::UniqueCategoryId,
        "category_id",
        doc.catalog.categories.iter().map(|c| c.category_id.as_str()),
        &mut findings,
    );
    check_cost_within_price(doc, &mut findings);

    let report = ValidationReport {
        findings,
        checks_run: CheckKind::ALL.len(),
    };
    tracing::debug!(
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "Catalog validation finished"
    );
    report
}

fn check_counters(doc: &CatalogDocument, findings: &mut Vec<Finding>) {
    let actual = doc.recompute_metadata();
    let meta = &doc.metadata;

    let counters = [
        (
            CheckKind::TotalProducts,
            "metadata.total_products",
            meta.total_products,
            actual.total_products,
            "products",
        ),
        (
            CheckKind::ActiveProducts,
            "metadata.active_products",
            meta.active_products,
            actual.active_products,
            "active products",
        ),
        (
            CheckKind::TotalCategories,
            "metadata.total_categories",
            meta.total_categories,
            actual.total_categories,
            "categories",
        ),
    ];

    for (check, field, declared, counted, noun) in counters {
        if declared != counted {
            findings.push(Finding::error(
                check,
                format!("{} is {} but the catalog has {} {}", field, declared, counted, noun),
            ));
        }
    }
}

fn check_category_references(doc: &CatalogDocument, findings: &mut Vec<Finding>) {
    let known: HashSet<&str> = doc
        .catalog
        .categories
        .iter()
        .map(|c| c.category_id.as_str())
        .collect();

    for product in &doc.products {
        if !known.contains(product.category.as_str()) {
            findings.push(Finding::error(
                CheckKind::CategoryReference,
                format!(
                    "product {} references unknown category {}",
                    product.product_id, product.category
                ),
            ));
        }
    }
}

fn check_unique_keys<'a>(
    check: CheckKind,
    field: &str,
    keys: impl Iterator<Item = &'a str>,
    findings: &mut Vec<Finding>,
) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    for (key, count) in counts.into_iter().filter(|(_, n)| *n > 1) {
        findings.push(Finding::error(
            check,
            format!("{} {} appears {} times", field, key, count),
        ));
    }
}

fn check_cost_within_price(doc: &CatalogDocument, findings: &mut Vec<Finding>) {
    for product in doc.products.iter().filter(|p| p.is_sold_at_loss()) {
        findings.push(Finding::warning(
            CheckKind::CostWithinPrice,
            format!(
                "product {} cost {} exceeds price {}",
                product.product_id, product.cost, product.price
            ),
        ));
    }
}
