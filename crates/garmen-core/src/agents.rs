//! Agent registry (identity and display metadata)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Agent identity - closed set, never extended at runtime
///
/// `Main` is the central router/fallback; the other four are the specialist
/// sub-agents of the garment SIA:
/// - SalesAndRevenue: invoices, sales orders, revenue tracking
/// - PurchasingAndInventory: raw-material stock, purchase orders, suppliers
/// - FinancialReporting: formal financial statements
/// - ManufacturingCostAccounting: job-order costing, HPP, WIP valuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKey {
    #[serde(rename = "MAIN_ROUTER")]
    Main,
    #[serde(rename = "SALES_AND_REVENUE")]
    SalesAndRevenue,
    #[serde(rename = "PURCHASING_AND_INVENTORY")]
    PurchasingAndInventory,
    #[serde(rename = "FINANCIAL_REPORTING")]
    FinancialReporting,
    #[serde(rename = "MANUFACTURING_COST_ACCOUNTING")]
    ManufacturingCostAccounting,
}

impl AgentKey {
    /// All agent identities, Main first
    pub const ALL: [AgentKey; 5] = [
        Self::Main,
        Self::SalesAndRevenue,
        Self::PurchasingAndInventory,
        Self::FinancialReporting,
        Self::ManufacturingCostAccounting,
    ];

    /// The four routable specialists (Main is a fallback, never a routing target)
    pub const SPECIALISTS: [AgentKey; 4] = [
        Self::SalesAndRevenue,
        Self::PurchasingAndInventory,
        Self::FinancialReporting,
        Self::ManufacturingCostAccounting,
    ];

    /// Wire name (matches the classifier output schema)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "MAIN_ROUTER",
            Self::SalesAndRevenue => "SALES_AND_REVENUE",
            Self::PurchasingAndInventory => "PURCHASING_AND_INVENTORY",
            Self::FinancialReporting => "FINANCIAL_REPORTING",
            Self::ManufacturingCostAccounting => "MANUFACTURING_COST_ACCOUNTING",
        }
    }

    /// Static display profile for this agent
    #[must_use]
    pub const fn profile(&self) -> &'static AgentProfile {
        match self {
            Self::Main => &AgentProfile {
                key: Self::Main,
                name: "SIA Manager",
                short_name: "Manager",
                description: "Router Pusat & Operasional",
                icon: "Bot",
                color: "text-slate-600",
                bg_gradient: "from-slate-500 to-slate-700",
            },
            Self::SalesAndRevenue => &AgentProfile {
                key: Self::SalesAndRevenue,
                name: "Sales & Revenue",
                short_name: "Sales",
                description: "Faktur, Pendapatan & Pesanan",
                icon: "ShoppingCart",
                color: "text-blue-600",
                bg_gradient: "from-blue-500 to-blue-700",
            },
            Self::PurchasingAndInventory => &AgentProfile {
                key: Self::PurchasingAndInventory,
                name: "Purchasing & Inventory",
                short_name: "Inventory",
                description: "Stok Bahan Baku & Supplier",
                icon: "Activity",
                color: "text-emerald-600",
                bg_gradient: "from-emerald-500 to-emerald-700",
            },
            Self::FinancialReporting => &AgentProfile {
                key: Self::FinancialReporting,
                name: "Financial Reporting",
                short_name: "Finance",
                description: "Laporan Keuangan Formal",
                icon: "FileText",
                color: "text-violet-600",
                bg_gradient: "from-violet-500 to-violet-700",
            },
            Self::ManufacturingCostAccounting => &AgentProfile {
                key: Self::ManufacturingCostAccounting,
                name: "Cost Accounting",
                short_name: "Costing",
                description: "HPP, WIP & Biaya Produksi",
                icon: "Factory",
                color: "text-orange-600",
                bg_gradient: "from-orange-500 to-orange-700",
            },
        }
    }
}

impl fmt::Display for AgentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-agent static display metadata
///
/// One-to-one with `AgentKey`; created once, read-only. Icon and color fields
/// are presentation tokens consumed by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentProfile {
    pub key: AgentKey,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub bg_gradient: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_exhaustive() {
        for key in AgentKey::ALL {
            let profile = key.profile();
            assert_eq!(profile.key, key);
            assert!(!profile.name.is_empty());
            assert!(!profile.description.is_empty());
        }
    }

    #[test]
    fn test_specialists_exclude_main() {
        assert!(!AgentKey::SPECIALISTS.contains(&AgentKey::Main));
        assert_eq!(AgentKey::SPECIALISTS.len(), 4);
    }

    #[test]
    fn test_wire_name_round_trip() {
        for key in AgentKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
            let parsed: AgentKey = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_unknown_wire_name_rejected() {
        assert!(serde_json::from_str::<AgentKey>("\"HR\"").is_err());
    }
}
