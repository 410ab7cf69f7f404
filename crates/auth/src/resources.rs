//! Well-known resource names.
//!
//! Resources are opaque strings; roles decide on any string. These constants
//! only name the ones the built-in role rules mention.

pub const ADMIN_PANEL: &str = "admin_panel";
pub const USER_MANAGEMENT: &str = "user_management";
pub const SYSTEM_CONFIG: &str = "system_config";
pub const PUBLIC_CONTENT: &str = "public_content";
pub const LOGIN: &str = "login";

pub const ALL: [&str; 5] = [ADMIN_PANEL, USER_MANAGEMENT, SYSTEM_CONFIG, PUBLIC_CONTENT, LOGIN];
