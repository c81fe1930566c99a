//! Declarative route policy and the role authorizer.
//!
//! A [`RoutePolicy`] maps path prefixes to an [`Access`] rule. Prefixes match
//! on segment boundaries (`/admin` covers `/admin` and `/admin/plans`, never
//! `/adminx`) and the longest matching prefix wins, whatever the declaration
//! order.
//!
//! ```ignore
//! let policy = RoutePolicy::new()
//!     .guest_only("/login")
//!     .allow("/admin", [AdminRole::Admin, AdminRole::Operator])
//!     .allow("/admin/plans", [AdminRole::Admin]);
//!
//! assert_eq!(policy.check("/admin/plans", Some(&operator)), Gate::Forbidden);
//! ```

use std::collections::HashSet;

use crate::identity::Identity;
use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<R: Role> {
    /// Anyone, token or not.
    Public,
    /// Entry routes such as the login page. Signed-in callers are sent home.
    GuestOnly,
    /// Any verified identity of the universe.
    Authenticated,
    /// Verified identities whose role is in the set.
    Roles(HashSet<R>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Outcome of checking one request against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// No rule applies or the route is public.
    Open,
    /// Identity verified and allowed.
    Admit,
    /// Guest-only route requested with a valid token.
    RedirectHome,
    /// Protected route without a valid token.
    Unauthenticated,
    /// Valid token whose role is not allowed.
    Forbidden,
}

/// Set membership only. Roles carry no ordering.
pub fn authorize<R: Role>(role: R, access: &Access<R>) -> Decision {
    let allowed = match access {
        Access::Public | Access::GuestOnly | Access::Authenticated => true,
        Access::Roles(roles) => roles.contains(&role),
    };

    if allowed {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

#[derive(Debug, Clone)]
pub struct RoutePolicy<R: Role> {
    rules: Vec<(String, Access<R>)>,
}

impl<R: Role> Default for RoutePolicy<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Role> RoutePolicy<R> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn public(self, pattern: &str) -> Self {
        self.rule(pattern, Access::Public)
    }

    pub fn guest_only(self, pattern: &str) -> Self {
        self.rule(pattern, Access::GuestOnly)
    }

    pub fn authenticated(self, pattern: &str) -> Self {
        self.rule(pattern, Access::Authenticated)
    }

    pub fn allow(self, pattern: &str, roles: impl IntoIterator<Item = R>) -> Self {
        self.rule(pattern, Access::Roles(roles.into_iter().collect()))
    }

    /// Adds a rule, replacing any earlier rule for the same pattern.
    pub fn rule(mut self, pattern: &str, access: Access<R>) -> Self {
        let pattern = normalize(pattern);
        self.rules.retain(|(existing, _)| *existing != pattern);
        self.rules.push((pattern, access));
        self
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Access<R>)> {
        self.rules
            .iter()
            .map(|(pattern, access)| (pattern.as_str(), access))
    }

    /// The most specific rule covering `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<&Access<R>> {
        self.rules
            .iter()
            .filter(|(pattern, _)| covers(pattern, path))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, access)| access)
    }

    /// Whether the gate for `path` depends on the caller's token.
    pub fn needs_identity(&self, path: &str) -> bool {
        !matches!(self.resolve(path), None | Some(Access::Public))
    }

    /// Decides what happens to a request for `path` made by `identity`.
    ///
    /// `identity` must already be verified; an invalid token is passed as `None`.
    pub fn check(&self, path: &str, identity: Option<&Identity<R>>) -> Gate {
        match (self.resolve(path), identity) {
            (None | Some(Access::Public), _) => Gate::Open,
            (Some(Access::GuestOnly), Some(_)) => Gate::RedirectHome,
            (Some(Access::GuestOnly), None) => Gate::Open,
            (Some(_), None) => Gate::Unauthenticated,
            (Some(access), Some(identity)) => match authorize(identity.role, access) {
                Decision::Allow => Gate::Admit,
                Decision::Deny => Gate::Forbidden,
            },
        }
    }
}

fn normalize(pattern: &str) -> String {
    let trimmed = pattern.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn covers(pattern: &str, path: &str) -> bool {
    if pattern == "/" {
        return path.starts_with('/');
    }

    match path.strip_prefix(pattern) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{AdminRole, AppRole};
    use uuid::Uuid;

    fn admin_policy() -> RoutePolicy<AdminRole> {
        RoutePolicy::new()
            .guest_only("/login")
            .allow("/admin/plans", [AdminRole::Admin])
            .allow("/admin", [AdminRole::Admin, AdminRole::Operator])
            .allow("/admin/audit", [AdminRole::Admin])
    }

    fn admin(role: AdminRole) -> Identity<AdminRole> {
        Identity::new(Uuid::new_v4(), "Admin", "admin@local.dev", role)
    }

    #[test]
    fn test_longest_prefix_wins_regardless_of_order() {
        let policy = admin_policy();
        assert_eq!(
            policy.resolve("/admin/plans/new"),
            Some(&Access::Roles(HashSet::from([AdminRole::Admin])))
        );
        assert_eq!(
            policy.resolve("/admin/instructors"),
            Some(&Access::Roles(HashSet::from([
                AdminRole::Admin,
                AdminRole::Operator
            ])))
        );
    }

    #[test]
    fn test_prefix_matches_on_segment_boundary() {
        let policy = admin_policy();
        assert!(policy.resolve("/adminx").is_none());
        assert!(policy.resolve("/admin/plansx").is_some());
        assert_eq!(
            policy.resolve("/admin/plansx"),
            policy.resolve("/admin/instructors")
        );
        assert!(policy.resolve("/").is_none());
    }

    #[test]
    fn test_trailing_slash_pattern_is_normalized() {
        let policy = RoutePolicy::<AdminRole>::new().authenticated("/admin/");
        assert_eq!(policy.resolve("/admin"), Some(&Access::Authenticated));
    }

    #[test]
    fn test_operator_forbidden_on_admin_only_routes() {
        let policy = admin_policy();
        let operator = admin(AdminRole::Operator);

        assert_eq!(policy.check("/admin/plans", Some(&operator)), Gate::Forbidden);
        assert_eq!(policy.check("/admin/audit", Some(&operator)), Gate::Forbidden);
        assert_eq!(policy.check("/admin", Some(&operator)), Gate::Admit);
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        let policy = admin_policy();
        let admin = admin(AdminRole::Admin);

        for path in ["/admin", "/admin/plans", "/admin/audit", "/admin/instructors"] {
            assert_eq!(policy.check(path, Some(&admin)), Gate::Admit, "{}", path);
        }
    }

    #[test]
    fn test_guest_only_route() {
        let policy = admin_policy();
        assert_eq!(policy.check("/login", None), Gate::Open);
        assert_eq!(
            policy.check("/login", Some(&admin(AdminRole::Operator))),
            Gate::RedirectHome
        );
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let policy = admin_policy();
        assert_eq!(policy.check("/admin", None), Gate::Unauthenticated);
        assert_eq!(policy.check("/admin/plans", None), Gate::Unauthenticated);
    }

    #[test]
    fn test_unlisted_and_public_routes_are_open() {
        let policy = RoutePolicy::<AppRole>::new()
            .public("/auth/login")
            .authenticated("/auth");

        assert_eq!(policy.check("/health", None), Gate::Open);
        assert_eq!(policy.check("/auth/login", None), Gate::Open);
        assert_eq!(policy.check("/auth/profile", None), Gate::Unauthenticated);
        assert!(!policy.needs_identity("/auth/login"));
        assert!(policy.needs_identity("/auth/profile"));
    }

    #[test]
    fn test_later_rule_replaces_same_pattern() {
        let policy = RoutePolicy::<AppRole>::new()
            .allow("/users", [AppRole::Admin])
            .public("/users");

        assert_eq!(policy.rules().count(), 1);
        assert_eq!(policy.resolve("/users"), Some(&Access::Public));
    }

    #[test]
    fn test_authorize_is_set_membership() {
        let access = Access::Roles(HashSet::from([AppRole::Admin, AppRole::Instructor]));
        assert_eq!(authorize(AppRole::Admin, &access), Decision::Allow);
        assert_eq!(authorize(AppRole::Instructor, &access), Decision::Allow);
        assert_eq!(authorize(AppRole::Student, &access), Decision::Deny);
        assert_eq!(
            authorize(AppRole::Student, &Access::Authenticated),
            Decision::Allow
        );
        assert_eq!(
            authorize(AppRole::Student, &Access::Roles(HashSet::new())),
            Decision::Deny
        );
    }
}
