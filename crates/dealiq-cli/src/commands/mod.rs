pub mod analyze;
pub mod opportunity;
pub mod rehab;
pub mod score;
pub mod sensitivity;
pub mod target;

use clap::Args;
use rust_decimal::Decimal;

use dealiq_core::assumptions::{CanonicalDefaults, DealAssumptions};

use crate::input;

/// Deal assumption flags shared by the analysis commands. Flags override
/// the canonical defaults derived from the list price and rent.
#[derive(Args)]
pub struct AssumptionArgs {
    /// Path to a JSON file with a full assumption bundle (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// List price
    #[arg(long)]
    pub list_price: Option<Decimal>,

    /// Monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Down payment fraction (e.g. 0.20 for 20%)
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Annual interest rate (e.g. 0.07 for 7%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term_years: Option<u32>,

    /// Vacancy rate
    #[arg(long)]
    pub vacancy_rate: Option<Decimal>,

    /// Annual property taxes
    #[arg(long)]
    pub property_taxes: Option<Decimal>,

    /// Annual insurance premium
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Management fee fraction of rent
    #[arg(long)]
    pub management_pct: Option<Decimal>,

    /// Maintenance reserve fraction of rent
    #[arg(long)]
    pub maintenance_pct: Option<Decimal>,

    /// Average nightly rate for short-term analysis
    #[arg(long)]
    pub average_daily_rate: Option<Decimal>,

    /// Short-term occupancy rate
    #[arg(long)]
    pub occupancy_rate: Option<Decimal>,

    /// Rehab budget
    #[arg(long)]
    pub rehab_cost: Option<Decimal>,

    /// After-repair value
    #[arg(long)]
    pub arv: Option<Decimal>,

    /// Holding period in months for flip analysis
    #[arg(long)]
    pub holding_period_months: Option<u32>,

    /// Bedroom count for house-hack analysis
    #[arg(long)]
    pub bedrooms: Option<u32>,

    /// Rooms rented out for house-hack analysis
    #[arg(long)]
    pub rooms_rented: Option<u32>,
}

impl AssumptionArgs {
    /// Resolve a full assumption bundle: JSON file first, then piped
    /// stdin, then flags over the canonical defaults.
    pub fn resolve(&self) -> Result<DealAssumptions, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }

        let list_price = self
            .list_price
            .ok_or("--list-price is required (or provide --input)")?;
        let rent = self.rent.ok_or("--rent is required (or provide --input)")?;

        let mut a = DealAssumptions::from_listing(&CanonicalDefaults::default(), list_price, rent);
        if let Some(v) = self.down_payment_pct {
            a.down_payment_pct = v;
        }
        if let Some(v) = self.interest_rate {
            a.interest_rate = v;
        }
        if let Some(v) = self.loan_term_years {
            a.loan_term_years = v;
        }
        if let Some(v) = self.vacancy_rate {
            a.vacancy_rate = v;
        }
        if let Some(v) = self.property_taxes {
            a.property_taxes = v;
        }
        if let Some(v) = self.insurance {
            a.insurance = v;
        }
        if let Some(v) = self.management_pct {
            a.management_pct = v;
        }
        if let Some(v) = self.maintenance_pct {
            a.maintenance_pct = v;
        }
        if let Some(v) = self.average_daily_rate {
            a.average_daily_rate = v;
        }
        if let Some(v) = self.occupancy_rate {
            a.occupancy_rate = v;
        }
        if let Some(v) = self.rehab_cost {
            a.rehab_cost = v;
        }
        if let Some(v) = self.arv {
            a.arv = v;
        }
        if let Some(v) = self.holding_period_months {
            a.holding_period_months = v;
        }
        if let Some(v) = self.bedrooms {
            a.total_bedrooms = v;
        }
        if let Some(v) = self.rooms_rented {
            a.rooms_rented = v;
        }
        Ok(a)
    }
}
