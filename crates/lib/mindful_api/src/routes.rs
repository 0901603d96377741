//! Route paths.

pub const GET_INDEX: &str = "/";
pub const GET_HEALTHZ: &str = "/healthz";
pub const POST_CHAT: &str = "/chat";
