//! Security validation for archive members.

pub mod path;
pub mod permissions;
pub mod validator;

// Re-export public types and functions
pub use path::validate_path;
pub use permissions::sanitize_mode;
pub use validator::MemberValidator;
pub use validator::ValidatedMember;
pub use validator::ValidatedMembers;
