use serde::{Deserialize, Serialize};

/// Listing metadata supplied by the presentation layer. Everything is
/// optional or defaulted; classification never fails on missing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingInfo {
    /// Raw listing status string, matched case-insensitively.
    pub status: Option<String>,
    #[serde(default)]
    pub price_reductions: u32,
    pub days_on_market: Option<u32>,
}

/// Seller-availability classification, ordered by negotiating leverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Withdrawn,
    PriceReduced,
    BankOwned,
    Fsbo,
    AgentListed,
    OffMarket,
    ForRent,
    Pending,
    Sold,
}

impl Availability {
    pub fn rank(&self) -> u32 {
        match self {
            Availability::Withdrawn => 1,
            Availability::PriceReduced => 2,
            Availability::BankOwned => 3,
            Availability::Fsbo => 4,
            Availability::AgentListed => 5,
            Availability::OffMarket => 6,
            Availability::ForRent => 7,
            Availability::Pending => 8,
            Availability::Sold => 9,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            Availability::Withdrawn => 100,
            Availability::PriceReduced => 90,
            Availability::BankOwned => 80,
            Availability::Fsbo => 70,
            Availability::AgentListed => 60,
            Availability::OffMarket => 50,
            Availability::ForRent => 40,
            Availability::Pending => 20,
            Availability::Sold => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Withdrawn => "Withdrawn from market",
            Availability::PriceReduced => "Price reduced",
            Availability::BankOwned => "Bank owned / foreclosure",
            Availability::Fsbo => "For sale by owner",
            Availability::AgentListed => "Agent listed",
            Availability::OffMarket => "Off market",
            Availability::ForRent => "Listed for rent",
            Availability::Pending => "Sale pending",
            Availability::Sold => "Recently sold",
        }
    }
}

/// Classify a listing. Checks run in fixed priority order and the first
/// match wins; several can be true at once (a FOR_SALE listing with two
/// price cuts is PriceReduced, not AgentListed). Unknown or missing
/// status classifies as off-market.
pub fn classify(listing: &ListingInfo) -> Availability {
    let status = listing
        .status
        .as_deref()
        .unwrap_or("")
        .to_ascii_uppercase();

    if status == "WITHDRAWN" {
        return Availability::Withdrawn;
    }
    if listing.price_reductions >= 2 {
        return Availability::PriceReduced;
    }
    match status.as_str() {
        "BANK_OWNED" | "FORECLOSURE" => Availability::BankOwned,
        "FSBO" => Availability::Fsbo,
        "AGENT_LISTED" | "FOR_SALE" => Availability::AgentListed,
        "OFF_MARKET" => Availability::OffMarket,
        "FOR_RENT" => Availability::ForRent,
        "PENDING" => Availability::Pending,
        "SOLD" => Availability::Sold,
        _ => Availability::OffMarket,
    }
}
