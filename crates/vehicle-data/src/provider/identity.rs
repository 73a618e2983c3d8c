//! Static bearer-token identity provider.
//!
//! Tokens are configured as `token:subject` pairs separated by commas,
//! which is enough for service-to-service callers of the auto-fill API.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::provider::{IdentityProvider, Principal};

const PROVIDER_ID: &str = "static_token";

pub struct StaticTokenIdentity {
    tokens: HashMap<String, String>,
}

impl StaticTokenIdentity {
    /// Parses `token:subject,token:subject`. Malformed pairs are ignored.
    pub fn from_spec(spec: &str) -> Self {
        let tokens = spec
            .split(',')
            .filter_map(|pair| {
                let (token, subject) = pair.trim().split_once(':')?;
                let (token, subject) = (token.trim(), subject.trim());
                if token.is_empty() || subject.is_empty() {
                    None
                } else {
                    Some((token.to_string(), subject.to_string()))
                }
            })
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentity {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn verify(&self, token: &str) -> Result<Option<Principal>, ProviderError> {
        Ok(self.tokens.get(token).map(|subject| Principal {
            subject: subject.clone(),
        }))
    }
}
