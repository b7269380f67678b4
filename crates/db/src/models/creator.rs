//! Creator account model and DTOs.

use fundify_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full creator row from the `creators` table.
///
/// Holds the password hash and bank details. Never serialize this directly;
/// use [`CreatorProfile`] for the owner and [`PublicCreator`] for everyone
/// else.
#[derive(Debug, Clone, FromRow)]
pub struct Creator {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub page_name: String,
    pub bio: String,
    pub profile_image: String,
    pub cover_image: String,
    pub category: String,
    pub website: String,
    pub twitter: String,
    pub instagram: String,
    pub facebook: String,
    pub youtube: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub bank_name: String,
    pub bank_routing_number: String,
    pub is_verified: bool,
    pub notify_email: bool,
    pub notify_new_follower: bool,
    pub notify_new_contribution: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLinks {
    pub website: String,
    pub twitter: String,
    pub instagram: String,
    pub facebook: String,
    pub youtube: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub routing_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email: bool,
    pub new_follower: bool,
    pub new_contribution: bool,
}

/// The creator's own view of their account: everything except the hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub page_name: String,
    pub bio: String,
    pub profile_image: String,
    pub cover_image: String,
    pub category: String,
    pub social_links: SocialLinks,
    pub bank_details: BankDetails,
    pub is_verified: bool,
    pub notification_preferences: NotificationPreferences,
    pub created_at: Timestamp,
}

/// Public listing entry: no email, no bank details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCreator {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub page_name: String,
    pub bio: String,
    pub profile_image: String,
    pub cover_image: String,
    pub category: String,
    pub social_links: SocialLinks,
    pub is_verified: bool,
    pub created_at: Timestamp,
}

impl Creator {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn social_links(&self) -> SocialLinks {
        SocialLinks {
            website: self.website.clone(),
            twitter: self.twitter.clone(),
            instagram: self.instagram.clone(),
            facebook: self.facebook.clone(),
            youtube: self.youtube.clone(),
        }
    }

    pub fn to_profile(&self) -> CreatorProfile {
        CreatorProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            page_name: self.page_name.clone(),
            bio: self.bio.clone(),
            profile_image: self.profile_image.clone(),
            cover_image: self.cover_image.clone(),
            category: self.category.clone(),
            social_links: self.social_links(),
            bank_details: BankDetails {
                account_name: self.bank_account_name.clone(),
                account_number: self.bank_account_number.clone(),
                bank_name: self.bank_name.clone(),
                routing_number: self.bank_routing_number.clone(),
            },
            is_verified: self.is_verified,
            notification_preferences: NotificationPreferences {
                email: self.notify_email,
                new_follower: self.notify_new_follower,
                new_contribution: self.notify_new_contribution,
            },
            created_at: self.created_at,
        }
    }

    pub fn to_public(&self) -> PublicCreator {
        PublicCreator {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            page_name: self.page_name.clone(),
            bio: self.bio.clone(),
            profile_image: self.profile_image.clone(),
            cover_image: self.cover_image.clone(),
            category: self.category.clone(),
            social_links: self.social_links(),
            is_verified: self.is_verified,
            created_at: self.created_at,
        }
    }
}

/// DTO for registering a creator. The email must already be normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCreator {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub page_name: String,
    /// Defaults to `Other` if omitted.
    pub category: Option<String>,
    pub bio: Option<String>,
}

/// Profile patch. `None` (or an empty string, filtered by the handler)
/// leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCreatorProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub youtube: Option<String>,
    pub bank_account_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_name: Option<String>,
    pub bank_routing_number: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}
