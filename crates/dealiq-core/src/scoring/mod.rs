//! Deal scoring: gap-based deal score, seller-availability
//! classification and the weighted opportunity composite.

pub mod availability;
pub mod deal_score;
pub mod opportunity;

pub use availability::{classify, Availability, ListingInfo};
pub use deal_score::{score_deal, score_deal_from_metrics, DealGrade, DealScore};
pub use opportunity::{
    score_opportunity, Leverage, OpportunityFactors, OpportunityGrade, OpportunityScore,
};
