//! Configuration options for the supplier client

use std::env;
use std::time::Duration;

use crate::validation::DescriptionPolicy;

/// Default backend base URL, overridable through [`ENV_BASE_URL`]
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/neostore/api/v1";

/// Environment variable consulted for the backend base URL
pub const ENV_BASE_URL: &str = "NEOSTORE_API_URL";

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 100;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_EMAIL_LENGTH: usize = 100;

/// The only MIME type accepted for import files
pub const ALLOWED_IMPORT_TYPE: &str = "application/json";

/// Reserved retry budget. No retry logic consumes this yet; requests are
/// attempted exactly once.
pub const RETRY_ATTEMPTS: u32 = 3;

/// Configuration options for the supplier client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the backend, including the API base path
    pub base_url: String,

    /// Bound applied to every request
    pub request_timeout: Duration,

    /// Page length used by the store when listing suppliers
    pub page_size: u32,

    /// Whether the description field is required on validation
    pub description_policy: DescriptionPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: env::var(ENV_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(10),
            page_size: DEFAULT_PAGE_SIZE,
            description_policy: DescriptionPolicy::Optional,
        }
    }
}

impl ClientOptions {
    /// Set the backend base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Duration) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the page length, clamped to [`MAX_PAGE_SIZE`]
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value.min(MAX_PAGE_SIZE);
        self
    }

    /// Set the description policy
    pub fn with_description_policy(mut self, value: DescriptionPolicy) -> Self {
        self.description_policy = value;
        self
    }
}
