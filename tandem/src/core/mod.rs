//! Core interface for the Tandem social system

mod social_manager;

pub use social_manager::SocialManager;
