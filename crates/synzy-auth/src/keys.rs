//! Storage keys owned by the session.

/// Serialized user record.
pub const USER_DATA: &str = "userData";
/// Bearer token issued at sign-in.
pub const AUTH_TOKEN: &str = "authToken";
/// Last institution created by a college account.
pub const LAST_CREATED_COLLEGE_ID: &str = "lastCreatedcollegeId";

/// Keys removed on sign-out. Remember-me preferences are deliberately absent.
pub const SESSION_SCOPED: &[&str] = &[
    AUTH_TOKEN,
    USER_DATA,
    LAST_CREATED_COLLEGE_ID,
    "comparisonList",
    "collegeRegDraft",
    "lastAppliedcollegeId",
    "redirectPath",
    "lastInterviewNotification",
    "guestSearchCriteria",
    "shortlist",
    "collegeName",
    "adminRedirectPath",
];

/// Key prefixes of per-institution caches removed on sign-out.
pub const SESSION_SCOPED_PREFIXES: &[&str] = &["collegeName:", "collegeInfo:", "adminRedirectPath"];

/// Whether a key belongs to the session and must go on sign-out.
#[must_use]
pub fn is_session_scoped(key: &str) -> bool {
    SESSION_SCOPED.contains(&key)
        || SESSION_SCOPED_PREFIXES
            .iter()
            .any(|prefix| key.starts_with(prefix))
}
