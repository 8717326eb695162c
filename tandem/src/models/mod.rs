//! Domain model definitions

mod friend_request;
mod user;

pub use friend_request::{pair_key, FriendRequest, RequestStatus};
pub use user::{NewUser, OnboardingProfile, ProfileSummary, User};
