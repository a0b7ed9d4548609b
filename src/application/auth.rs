//! # Authorizer
//!
//! Gates commands behind role membership. A command naming an app needs the
//! `heroku-<app>` role or the global `admin` role; everything is allowed when
//! enforcement is switched off.

use std::collections::{HashMap, HashSet};

use crate::domain::config::AuthConfig;
use crate::domain::errors::CommandError;
use crate::domain::types::AuthScope;

pub const ADMIN_ROLE: &str = "admin";

pub fn app_role(app: &str) -> String {
    format!("heroku-{app}")
}

/// Role membership lookups for chat users.
#[derive(Debug, Default, Clone)]
pub struct RoleDirectory {
    roles: HashMap<String, HashSet<String>>,
}

impl RoleDirectory {
    pub fn from_config(config: &AuthConfig) -> Self {
        let mut directory = Self::default();
        for admin in &config.admins {
            directory.grant(admin, ADMIN_ROLE);
        }
        for (role, users) in &config.roles {
            for user in users {
                directory.grant(user, role);
            }
        }
        directory
    }

    pub fn grant(&mut self, user: &str, role: &str) {
        self.roles
            .entry(role.to_lowercase())
            .or_default()
            .insert(user.to_lowercase());
    }

    pub fn has_role(&self, user: &str, role: &str) -> bool {
        self.roles
            .get(&role.to_lowercase())
            .is_some_and(|users| users.contains(&user.to_lowercase()))
    }
}

#[derive(Debug, Clone)]
pub struct Authorizer {
    enabled: bool,
    directory: RoleDirectory,
}

impl Authorizer {
    pub fn new(enabled: bool, directory: RoleDirectory) -> Self {
        Self { enabled, directory }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.enabled, RoleDirectory::from_config(config))
    }

    /// Checks `requester` against the role `scope` demands.
    pub fn authorize(&self, requester: &str, scope: &AuthScope) -> Result<(), CommandError> {
        if !self.enabled {
            return Ok(());
        }

        let required = match scope {
            AuthScope::Public => return Ok(()),
            AuthScope::Admin => ADMIN_ROLE.to_string(),
            AuthScope::App(app) => app_role(app),
        };

        if self.directory.has_role(requester, &required)
            || self.directory.has_role(requester, ADMIN_ROLE)
        {
            Ok(())
        } else {
            tracing::info!("Denied {} (missing role {})", requester, required);
            Err(CommandError::AuthorizationDenied { role: required })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorizer(enabled: bool) -> Authorizer {
        let mut directory = RoleDirectory::default();
        directory.grant("@ops:example.org", ADMIN_ROLE);
        directory.grant("@damon:example.org", "heroku-shield");
        Authorizer::new(enabled, directory)
    }

    fn app(name: &str) -> AuthScope {
        AuthScope::App(name.to_string())
    }

    #[test]
    fn test_app_role_grants_only_that_app() {
        let auth = authorizer(true);
        assert!(auth.authorize("@damon:example.org", &app("shield")).is_ok());

        match auth.authorize("@damon:example.org", &app("helicarrier")) {
            Err(CommandError::AuthorizationDenied { role }) => {
                assert_eq!(role, "heroku-helicarrier")
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn test_admin_passes_everything() {
        let auth = authorizer(true);
        assert!(auth.authorize("@ops:example.org", &app("helicarrier")).is_ok());
        assert!(auth.authorize("@ops:example.org", &AuthScope::Admin).is_ok());
    }

    #[test]
    fn test_unscoped_commands_still_need_admin() {
        let auth = authorizer(true);
        match auth.authorize("@damon:example.org", &AuthScope::Admin) {
            Err(CommandError::AuthorizationDenied { role }) => assert_eq!(role, "admin"),
            other => panic!("expected denial, got {other:?}"),
        }
        assert!(auth.authorize("@nobody:example.org", &AuthScope::Public).is_ok());
    }

    #[test]
    fn test_disabled_enforcement_allows_all() {
        let auth = authorizer(false);
        assert!(auth.authorize("@nobody:example.org", &app("shield")).is_ok());
        assert!(auth.authorize("@nobody:example.org", &AuthScope::Admin).is_ok());
    }

    #[test]
    fn test_directory_from_config_is_case_insensitive() {
        let config = AuthConfig {
            enabled: true,
            admins: vec!["@Ops:Example.org".to_string()],
            roles: HashMap::from([(
                "Heroku-Shield".to_string(),
                vec!["@damon:example.org".to_string()],
            )]),
        };
        let directory = RoleDirectory::from_config(&config);
        assert!(directory.has_role("@ops:example.org", ADMIN_ROLE));
        assert!(directory.has_role("@DAMON:example.org", "heroku-shield"));
    }
}
