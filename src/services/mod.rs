pub mod eligibility_service;
pub mod scoring_service;
pub mod session_service;
pub mod statistics_service;
pub mod test_service;

pub use eligibility_service::EligibilityService;
pub use scoring_service::ScoringEngine;
pub use session_service::{SessionService, TickOutcome};
pub use statistics_service::StatisticsService;
pub use test_service::TestService;
