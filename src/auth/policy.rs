//! Declarative access rules, keyed by HTTP method and route pattern.
//!
//! Patterns are the ones the router was built with (as reported by
//! `MatchedPath`), so `/api/orders/:id` covers every order id. Routes with no
//! rule require a valid token of any role.

use axum::http::Method;

use crate::auth::claims::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Roles(&'static [Role]),
}

impl Access {
    pub fn allows(self, role: Role) -> bool {
        match self {
            Access::Public => true,
            Access::Roles(roles) => roles.contains(&role),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub method: Method,
    pub pattern: &'static str,
    pub access: Access,
}

#[derive(Debug, Clone)]
pub struct Policy {
    rules: Vec<Rule>,
}

const ANY_ROLE: &[Role] = Role::ALL;
const ADMIN: &[Role] = &[Role::Admin];
const ADMIN_OR_WAREHOUSE: &[Role] = &[Role::Admin, Role::Warehouse];

impl Policy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        use Access::{Public, Roles};

        let rule = |method: Method, pattern: &'static str, access: Access| Rule {
            method,
            pattern,
            access,
        };
        Self::new(vec![
            rule(Method::GET, "/api/health", Public),
            rule(Method::POST, "/api/auth/login", Public),
            rule(Method::POST, "/api/auth/register", Roles(ADMIN)),
            rule(Method::GET, "/api/auth/me", Roles(ANY_ROLE)),
            rule(Method::GET, "/api/drivers/test", Public),
            rule(Method::GET, "/api/drivers", Roles(ADMIN_OR_WAREHOUSE)),
            rule(Method::POST, "/api/drivers", Roles(ADMIN)),
            rule(Method::GET, "/api/orders", Roles(ANY_ROLE)),
            rule(Method::POST, "/api/orders", Roles(ADMIN_OR_WAREHOUSE)),
            rule(Method::GET, "/api/orders/:id", Roles(ANY_ROLE)),
            rule(Method::DELETE, "/api/orders/:id", Roles(ADMIN)),
            rule(Method::GET, "/api/orders/:id/stage", Roles(ANY_ROLE)),
            rule(Method::PUT, "/api/orders/:id/status", Roles(ANY_ROLE)),
        ])
    }

    pub fn access_for(&self, method: &Method, pattern: &str) -> Access {
        self.rules
            .iter()
            .find(|r| r.method == *method && r.pattern == pattern)
            .map(|r| r.access)
            .unwrap_or(Access::Roles(ANY_ROLE))
    }
}
