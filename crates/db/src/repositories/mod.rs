//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod audience_repo;
pub mod campaign_repo;
pub mod campaign_update_repo;
pub mod content_repo;
pub mod contribution_repo;
pub mod creator_repo;
pub mod follower_repo;
pub mod reward_repo;
pub mod subscription_repo;

pub use audience_repo::AudienceRepo;
pub use campaign_repo::CampaignRepo;
pub use campaign_update_repo::CampaignUpdateRepo;
pub use content_repo::ContentRepo;
pub use contribution_repo::ContributionRepo;
pub use creator_repo::CreatorRepo;
pub use follower_repo::FollowerRepo;
pub use reward_repo::RewardRepo;
pub use subscription_repo::SubscriptionRepo;
