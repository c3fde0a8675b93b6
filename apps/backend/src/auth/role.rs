//! Role vocabulary, role resolution, and the authorization predicate.

use crate::auth::claims::{Claims, ResolvedIdentity};
use crate::auth::token::AuthError;

pub const COMPANY_ADMIN: &str = "company_admin";
pub const RESELLER_ADMIN: &str = "reseller_admin";
pub const GLOBAL_ADMIN: &str = "global_admin";
pub const COMPANY_USER: &str = "company_user";

/// Issuer marker meaning "session is authenticated", not a business role.
/// It stays usable as a low-privilege role when nothing better is present,
/// so allow-lists can still include or exclude it explicitly.
pub const AUTHENTICATED: &str = "authenticated";

/// All roles the console can assign, in ascending privilege order.
pub const ASSIGNABLE_ROLES: [&str; 4] =
    [COMPANY_USER, COMPANY_ADMIN, RESELLER_ADMIN, GLOBAL_ADMIN];

/// Resolve the effective role for a set of verified claims.
///
/// Precedence: a non-empty `user_metadata.role` wins over the top-level
/// `role` claim. The top-level claim is accepted as a fallback, including
/// the `authenticated` sentinel. A token carrying neither is rejected with
/// [`AuthError::MissingRole`] rather than defaulted to anything.
pub fn resolve_role(claims: &Claims) -> Result<String, AuthError> {
    if let Some(role) = claims
        .user_metadata
        .as_ref()
        .and_then(|meta| meta.role.as_deref())
    {
        if !role.is_empty() {
            return Ok(role.to_string());
        }
    }

    match claims.role.as_deref() {
        Some(role) if !role.is_empty() => Ok(role.to_string()),
        _ => Err(AuthError::MissingRole),
    }
}

/// True iff the identity's role is a member of `allowed_roles`.
///
/// Exact, case-sensitive string match. Roles are lowercased at issuance
/// time, so callers pass already-lowercased allow-lists.
pub fn authorize(identity: &ResolvedIdentity, allowed_roles: &[&str]) -> bool {
    allowed_roles.iter().any(|role| *role == identity.role)
}
