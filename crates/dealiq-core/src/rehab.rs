//! Rehab cost estimation against a static unit-cost catalog.
//!
//! The catalog is read-only reference data compiled into the binary;
//! callers select items, quantities and a quality tier and get an
//! itemized estimate with a contingency on top.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput, Money};
use crate::DealIqResult;

const DEFAULT_CONTINGENCY: Decimal = dec!(0.10);

/// Quality tier for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Mid,
    High,
}

/// One catalog entry with per-tier unit costs.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: &'static str,
    pub category: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub low: Money,
    pub mid: Money,
    pub high: Money,
    pub default_quantity: Decimal,
}

impl CatalogItem {
    pub fn unit_cost(&self, tier: Tier) -> Money {
        match tier {
            Tier::Low => self.low,
            Tier::Mid => self.mid,
            Tier::High => self.high,
        }
    }
}

/// Unit costs are regional averages, kept in rough 2024 dollars.
static CATALOG: &[CatalogItem] = &[
    CatalogItem { id: "interior_paint", category: "cosmetic", name: "Interior paint", unit: "sqft", low: dec!(1.50), mid: dec!(2.50), high: dec!(4), default_quantity: dec!(1500) },
    CatalogItem { id: "exterior_paint", category: "cosmetic", name: "Exterior paint", unit: "sqft", low: dec!(2), mid: dec!(3.50), high: dec!(5.50), default_quantity: dec!(1800) },
    CatalogItem { id: "lvp", category: "flooring", name: "Luxury vinyl plank", unit: "sqft", low: dec!(4), mid: dec!(6), high: dec!(9), default_quantity: dec!(1200) },
    CatalogItem { id: "carpet", category: "flooring", name: "Carpet", unit: "sqft", low: dec!(2), mid: dec!(3.50), high: dec!(6), default_quantity: dec!(800) },
    CatalogItem { id: "hardwood_refinish", category: "flooring", name: "Hardwood refinishing", unit: "sqft", low: dec!(3), mid: dec!(5), high: dec!(8), default_quantity: dec!(1000) },
    CatalogItem { id: "kitchen_minor", category: "kitchen", name: "Minor kitchen refresh", unit: "job", low: dec!(5000), mid: dec!(10000), high: dec!(18000), default_quantity: Decimal::ONE },
    CatalogItem { id: "kitchen_full", category: "kitchen", name: "Full kitchen remodel", unit: "job", low: dec!(15000), mid: dec!(30000), high: dec!(60000), default_quantity: Decimal::ONE },
    CatalogItem { id: "bath_minor", category: "bathroom", name: "Minor bathroom refresh", unit: "job", low: dec!(2500), mid: dec!(5000), high: dec!(9000), default_quantity: Decimal::ONE },
    CatalogItem { id: "bath_full", category: "bathroom", name: "Full bathroom remodel", unit: "job", low: dec!(8000), mid: dec!(15000), high: dec!(25000), default_quantity: Decimal::ONE },
    CatalogItem { id: "roof", category: "exterior", name: "Roof replacement", unit: "job", low: dec!(8000), mid: dec!(12000), high: dec!(20000), default_quantity: Decimal::ONE },
    CatalogItem { id: "windows", category: "exterior", name: "Window replacement", unit: "each", low: dec!(350), mid: dec!(600), high: dec!(1000), default_quantity: dec!(10) },
    CatalogItem { id: "hvac", category: "systems", name: "HVAC replacement", unit: "job", low: dec!(5000), mid: dec!(8000), high: dec!(14000), default_quantity: Decimal::ONE },
    CatalogItem { id: "water_heater", category: "systems", name: "Water heater", unit: "job", low: dec!(1200), mid: dec!(2000), high: dec!(3500), default_quantity: Decimal::ONE },
    CatalogItem { id: "electrical_panel", category: "systems", name: "Electrical panel upgrade", unit: "job", low: dec!(1500), mid: dec!(2500), high: dec!(4000), default_quantity: Decimal::ONE },
    CatalogItem { id: "plumbing_repipe", category: "systems", name: "Whole-house repipe", unit: "job", low: dec!(4000), mid: dec!(8000), high: dec!(15000), default_quantity: Decimal::ONE },
    CatalogItem { id: "landscaping", category: "exterior", name: "Landscaping cleanup", unit: "job", low: dec!(1000), mid: dec!(3000), high: dec!(7000), default_quantity: Decimal::ONE },
];

/// Look up a catalog item by id.
pub fn catalog_item(id: &str) -> Option<&'static CatalogItem> {
    CATALOG.iter().find(|item| item.id == id)
}

/// The full catalog, for presentation layers that render pickers.
pub fn catalog() -> &'static [CatalogItem] {
    CATALOG
}

/// A caller-selected line: item id, quantity and tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RehabSelection {
    pub item_id: String,
    pub quantity: Decimal,
    pub tier: Tier,
}

/// Named selection bundles for common project shapes.
pub fn preset(name: &str) -> Option<Vec<RehabSelection>> {
    let items: &[(&str, Tier)] = match name {
        "cosmetic_refresh" => &[("interior_paint", Tier::Low), ("carpet", Tier::Low)],
        "full_cosmetic" => &[
            ("interior_paint", Tier::Mid),
            ("lvp", Tier::Mid),
            ("kitchen_minor", Tier::Mid),
            ("bath_minor", Tier::Mid),
        ],
        "gut_renovation" => &[
            ("interior_paint", Tier::Mid),
            ("exterior_paint", Tier::Mid),
            ("lvp", Tier::Mid),
            ("kitchen_full", Tier::Mid),
            ("bath_full", Tier::Mid),
            ("roof", Tier::Mid),
            ("hvac", Tier::Mid),
            ("electrical_panel", Tier::Mid),
        ],
        _ => return None,
    };
    Some(
        items
            .iter()
            .map(|(id, tier)| {
                let quantity = catalog_item(id).map(|c| c.default_quantity).unwrap_or(Decimal::ONE);
                RehabSelection { item_id: (*id).to_string(), quantity, tier: *tier }
            })
            .collect(),
    )
}

/// One priced line in an estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RehabLineItem {
    pub item_id: String,
    pub name: String,
    pub category: String,
    pub tier: Tier,
    pub quantity: Decimal,
    pub unit_cost: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RehabEstimate {
    pub line_items: Vec<RehabLineItem>,
    pub total: Money,
    pub contingency_pct: Decimal,
    pub contingency_amount: Money,
    pub grand_total: Money,
}

/// Price a set of selections. Unknown item ids are skipped with a
/// warning rather than rejected, so a stale client catalog still gets
/// an estimate for everything it named correctly.
pub fn estimate_rehab(
    selections: &[RehabSelection],
    contingency_pct: Option<Decimal>,
) -> DealIqResult<ComputationOutput<RehabEstimate>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let contingency = contingency_pct.unwrap_or(DEFAULT_CONTINGENCY);

    let mut line_items = Vec::with_capacity(selections.len());
    let mut total = Decimal::ZERO;
    for s in selections {
        let Some(item) = catalog_item(&s.item_id) else {
            warnings.push(format!("Unknown rehab item '{}' skipped", s.item_id));
            continue;
        };
        let unit_cost = item.unit_cost(s.tier);
        let line_total = unit_cost * s.quantity;
        total += line_total;
        line_items.push(RehabLineItem {
            item_id: s.item_id.clone(),
            name: item.name.to_string(),
            category: item.category.to_string(),
            tier: s.tier,
            quantity: s.quantity,
            unit_cost,
            total: line_total,
        });
    }

    let contingency_amount = total * contingency;
    let result = RehabEstimate {
        line_items,
        total,
        contingency_pct: contingency,
        contingency_amount,
        grand_total: total + contingency_amount,
    };

    Ok(with_metadata(
        "Catalog unit costs times quantity per line, contingency applied \
         to the subtotal",
        &serde_json::json!({ "contingency_pct": contingency }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lvp_mid_tier_with_default_contingency() {
        let selections = vec![RehabSelection {
            item_id: "lvp".to_string(),
            quantity: dec!(1200),
            tier: Tier::Mid,
        }];
        let out = estimate_rehab(&selections, None).unwrap();
        let e = out.result;
        assert_eq!(e.total, dec!(7200.00));
        assert_eq!(e.grand_total, dec!(7920.0000));
    }

    #[test]
    fn test_unknown_item_skipped_not_error() {
        let selections = vec![
            RehabSelection { item_id: "lvp".to_string(), quantity: dec!(100), tier: Tier::Mid },
            RehabSelection { item_id: "moat".to_string(), quantity: dec!(1), tier: Tier::High },
        ];
        let out = estimate_rehab(&selections, None).unwrap();
        assert_eq!(out.result.line_items.len(), 1);
        assert_eq!(out.result.total, dec!(600.00));
        assert!(out.warnings.iter().any(|w| w.contains("moat")));
    }

    #[test]
    fn test_estimate_is_additive() {
        let selections = vec![
            RehabSelection { item_id: "roof".to_string(), quantity: Decimal::ONE, tier: Tier::Mid },
            RehabSelection { item_id: "hvac".to_string(), quantity: Decimal::ONE, tier: Tier::Low },
        ];
        let out = estimate_rehab(&selections, Some(Decimal::ZERO)).unwrap();
        assert_eq!(out.result.total, dec!(17000));
        assert_eq!(out.result.grand_total, out.result.total);
    }

    #[test]
    fn test_presets_resolve_against_catalog() {
        for name in ["cosmetic_refresh", "full_cosmetic", "gut_renovation"] {
            let selections = preset(name).unwrap();
            assert!(!selections.is_empty());
            let out = estimate_rehab(&selections, None).unwrap();
            // Every preset line must exist in the catalog.
            assert_eq!(out.result.line_items.len(), selections.len());
            assert!(out.warnings.is_empty());
        }
        assert!(preset("teardown").is_none());
    }
}
