//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Environment configuration
//! - Catalog: Product list loading
//! - Storage: In-memory session state
//! - Supabase: Remote order persistence
//! - Adapters: Platform integrations (Telegram)

pub mod config;
pub mod catalog;
pub mod storage;
pub mod supabase;
pub mod adapters;
