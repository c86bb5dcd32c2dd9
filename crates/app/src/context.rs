//! Scoped suite resources.

use std::sync::Arc;

use crudcheck_application::ObjectsApi;
use crudcheck_infrastructure::{ReqwestHttpClient, SuiteConfig, TestRunner, init_tracing};

use crate::error::{ScenarioError, ScenarioResult};

/// Everything one suite run owns: the HTTP client bound to the base
/// address, the assertion runner and the last identifier created in this
/// run. Dropping the context releases the client.
pub struct SuiteContext {
    api: ObjectsApi<ReqwestHttpClient>,
    runner: TestRunner,
    last_created_id: Option<String>,
}

impl SuiteContext {
    /// Starts a run with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Setup` if the HTTP client cannot be built.
    pub fn start(config: &SuiteConfig) -> ScenarioResult<Self> {
        init_tracing(&config.log_filter);

        let client = ReqwestHttpClient::new(&config.user_agent)?;
        tracing::info!(base_url = %config.base_url, "suite context started");

        Ok(Self {
            api: ObjectsApi::new(Arc::new(client), config.base_url.as_str()),
            runner: TestRunner::new(),
            last_created_id: None,
        })
    }

    /// Starts a run configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Setup` on invalid configuration or client
    /// construction failure.
    pub fn from_env() -> ScenarioResult<Self> {
        Self::start(&SuiteConfig::from_env()?)
    }

    /// The objects API bound to this run's client.
    #[must_use]
    pub const fn api(&self) -> &ObjectsApi<ReqwestHttpClient> {
        &self.api
    }

    /// The assertion runner.
    #[must_use]
    pub const fn runner(&self) -> &TestRunner {
        &self.runner
    }

    /// Caches the identifier of a freshly created product.
    pub fn remember_created(&mut self, id: impl Into<String>) {
        self.last_created_id = Some(id.into());
    }

    /// The identifier cached by the last successful create.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NoCachedIdentifier` if nothing was created yet.
    pub fn last_created_id(&self) -> ScenarioResult<&str> {
        self.last_created_id
            .as_deref()
            .ok_or(ScenarioError::NoCachedIdentifier)
    }
}

impl Drop for SuiteContext {
    fn drop(&mut self) {
        tracing::info!(
            base_url = %self.api.base_url(),
            last_created_id = ?self.last_created_id,
            "suite context released"
        );
    }
}
