//! Keystone v3 password authentication request body.
//!
//! ```json
//! { "auth": { "identity": { "methods": ["password"],
//!                           "password": { "user": { "name", "password", "domain": { "id" } } } },
//!             "scope": { "project": { "id", "domain": { "id" } } } } }
//! ```

use serde::Serialize;

use crate::config::credentials::Credentials;
use crate::utils::constants::PASSWORD_METHOD;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthRequest {
    pub auth: Auth,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Auth {
    pub identity: Identity,
    pub scope: Scope,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Identity {
    pub methods: Vec<String>,
    pub password: PasswordMethod,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PasswordMethod {
    pub user: User,
}

#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub password: String,
    pub domain: DomainRef,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("password", &"***")
            .field("domain", &self.domain)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Scope {
    pub project: ProjectRef,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub domain: DomainRef,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DomainRef {
    pub id: String,
}

impl From<&Credentials> for AuthRequest {
    fn from(credentials: &Credentials) -> Self {
        let domain = DomainRef {
            id: credentials.domain_id.to_owned(),
        };

        AuthRequest {
            auth: Auth {
                identity: Identity {
                    methods: vec![PASSWORD_METHOD.to_string()],
                    password: PasswordMethod {
                        user: User {
                            name: credentials.username.to_owned(),
                            password: credentials.password.to_owned(),
                            domain: domain.clone(),
                        },
                    },
                },
                scope: Scope {
                    project: ProjectRef {
                        id: credentials.project_id.to_owned(),
                        domain,
                    },
                },
            },
        }
    }
}
