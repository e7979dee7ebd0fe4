pub mod analytics;
pub mod portfolio;
pub mod resume;
pub mod subscription;
pub mod user;

pub use analytics::PortfolioAnalytics;
pub use portfolio::{Portfolio, PortfolioContent, PortfolioStatus};
pub use resume::Resume;
pub use subscription::SubscriptionStatus;
pub use user::{AuthPayload, SubscriptionTier, User};
