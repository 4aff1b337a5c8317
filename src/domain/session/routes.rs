//! Protected route table
//!
//! Maps path prefixes of role areas to the access they require. The
//! table is static configuration evaluated per request; it holds no
//! per-request state.

use crate::domain::user::Role;

/// Access required by a protected route prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Any authenticated user may enter
    AnyAuthenticated,
    /// Only users with the given role may enter
    Role(Role),
}

/// A protected path prefix and the access it requires
#[derive(Debug, Clone)]
pub struct RouteRule {
    prefix: String,
    access: RouteAccess,
}

impl RouteRule {
    pub fn new(prefix: impl Into<String>, access: RouteAccess) -> Self {
        Self {
            prefix: prefix.into(),
            access,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn access(&self) -> RouteAccess {
        self.access
    }

    /// Prefix match on path segment boundaries
    ///
    /// "/admin" matches "/admin" and "/admin/users" but not
    /// "/administrators".
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// The static mapping of protected prefixes to required access
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The three role areas, each restricted to its own role
    pub fn with_defaults() -> Self {
        Self::new(
            [Role::Admin, Role::Organizer, Role::Player]
                .into_iter()
                .map(|role| RouteRule::new(role.area_prefix(), RouteAccess::Role(role)))
                .collect(),
        )
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Access required for the given path, or `None` for public paths
    ///
    /// The longest matching prefix wins, so a more specific rule can
    /// tighten access inside a broader area.
    pub fn required_access(&self, path: &str) -> Option<RouteAccess> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.prefix.len())
            .map(|rule| rule.access)
    }

    /// Whether the path is inside any protected area
    pub fn is_protected(&self, path: &str) -> bool {
        self.required_access(path).is_some()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
