//! Scenario fixtures.
//!
//! Each scenario names the preconditions it needs (open the site, sign in,
//! open the transfer generator). The [`FixtureRegistry`] declares those
//! capabilities with their dependencies and resolves a request into an
//! ordered plan; [`Fixtures`] applies the plan against one session and hands
//! out page objects built for that session only.

use crate::browser::Session;
use crate::config::SuiteConfig;
use crate::page::Page;
use crate::page_object::PageObject;
use crate::pages::{DashboardPage, GenerateTransferPage, LoginPage, Navigation};
use crate::result::{E2eError, E2eResult};
use crate::wait::LoadState;
use futures::future::BoxFuture;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Instrument;

// =============================================================================
// PRECONDITIONS
// =============================================================================

/// A named capability a scenario can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precondition {
    /// Navigate to the configured base URL
    OpenSite,
    /// Sign in with the configured credentials
    SignIn,
    /// Open "generuj przelew" from the menu
    OpenGenerateTransfer,
}

impl Precondition {
    /// Name used in logs and error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OpenSite => "open-site",
            Self::SignIn => "sign-in",
            Self::OpenGenerateTransfer => "open-generate-transfer",
        }
    }
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration of one capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSpec {
    /// The capability
    pub precondition: Precondition,
    /// Capabilities that must run first
    pub depends_on: Vec<Precondition>,
    /// Runs for every scenario, requested or not
    pub auto: bool,
}

impl FixtureSpec {
    /// Capability with no dependencies that runs only on request
    #[must_use]
    pub const fn new(precondition: Precondition) -> Self {
        Self {
            precondition,
            depends_on: Vec::new(),
            auto: false,
        }
    }

    /// Add a dependency
    #[must_use]
    pub fn depends_on(mut self, dependency: Precondition) -> Self {
        self.depends_on.push(dependency);
        self
    }

    /// Run for every scenario
    #[must_use]
    pub const fn auto(mut self) -> Self {
        self.auto = true;
        self
    }
}

/// Declared capabilities, in declaration order
#[derive(Debug, Clone, Default)]
pub struct FixtureRegistry {
    specs: Vec<FixtureSpec>,
}

impl FixtureRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The suite's capabilities: opening the site runs for every scenario,
    /// signing in needs the site, and the transfer generator needs a session
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .declare(FixtureSpec::new(Precondition::OpenSite).auto())
            .declare(FixtureSpec::new(Precondition::SignIn).depends_on(Precondition::OpenSite))
            .declare(
                FixtureSpec::new(Precondition::OpenGenerateTransfer)
                    .depends_on(Precondition::SignIn),
            )
    }

    /// Declare a capability, replacing an earlier declaration of the same one
    #[must_use]
    pub fn declare(mut self, spec: FixtureSpec) -> Self {
        match self
            .specs
            .iter_mut()
            .find(|s| s.precondition == spec.precondition)
        {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
        self
    }

    /// Declaration of a capability
    #[must_use]
    pub fn get(&self, precondition: Precondition) -> Option<&FixtureSpec> {
        self.specs.iter().find(|s| s.precondition == precondition)
    }

    /// Order in which to apply `requested`.
    ///
    /// Auto capabilities come first, then the requested ones; every entry
    /// follows its dependencies and appears once.
    ///
    /// # Errors
    ///
    /// [`E2eError::Fixture`] when a capability is not declared or the
    /// dependencies form a cycle.
    pub fn plan(&self, requested: &[Precondition]) -> E2eResult<Vec<Precondition>> {
        let roots = self
            .specs
            .iter()
            .filter(|s| s.auto)
            .map(|s| s.precondition)
            .chain(requested.iter().copied());

        let mut order = Vec::new();
        let mut done = HashSet::new();
        let mut visiting = Vec::new();
        for root in roots {
            self.visit(root, &mut done, &mut visiting, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        precondition: Precondition,
        done: &mut HashSet<Precondition>,
        visiting: &mut Vec<Precondition>,
        order: &mut Vec<Precondition>,
    ) -> E2eResult<()> {
        if done.contains(&precondition) {
            return Ok(());
        }
        if visiting.contains(&precondition) {
            let chain: Vec<&str> = visiting
                .iter()
                .chain(std::iter::once(&precondition))
                .map(|p| p.name())
                .collect();
            return Err(E2eError::fixture(format!(
                "dependency cycle: {}",
                chain.join(" -> ")
            )));
        }
        let spec = self.get(precondition).ok_or_else(|| {
            E2eError::fixture(format!("'{precondition}' is not declared"))
        })?;

        visiting.push(precondition);
        for dependency in &spec.depends_on {
            self.visit(*dependency, done, visiting, order)?;
        }
        visiting.pop();

        done.insert(precondition);
        order.push(precondition);
        Ok(())
    }
}

// =============================================================================
// PER-SCENARIO FIXTURES
// =============================================================================

/// Everything one scenario works with.
///
/// Page objects are built lazily, once, against this scenario's page.
#[derive(Debug)]
pub struct Fixtures {
    session: Session,
    config: SuiteConfig,
    login: OnceLock<LoginPage>,
    dashboard: OnceLock<DashboardPage>,
    navigation: OnceLock<Navigation>,
    generate_transfer: OnceLock<GenerateTransferPage>,
}

impl Fixtures {
    /// Fixtures over an open session
    #[must_use]
    pub fn new(session: Session, config: SuiteConfig) -> Self {
        Self {
            session,
            config,
            login: OnceLock::new(),
            dashboard: OnceLock::new(),
            navigation: OnceLock::new(),
            generate_transfer: OnceLock::new(),
        }
    }

    /// The scenario's session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The scenario's page
    #[must_use]
    pub const fn page(&self) -> &Page {
        self.session.page()
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn memo<'a, P: PageObject>(&'a self, cell: &'a OnceLock<P>) -> &'a P {
        cell.get_or_init(|| {
            tracing::trace!(page_object = P::NAME, "build page object");
            P::build(self.page())
        })
    }

    /// Login screen
    pub fn login(&self) -> &LoginPage {
        self.memo(&self.login)
    }

    /// Dashboard and its widgets
    pub fn dashboard(&self) -> &DashboardPage {
        self.memo(&self.dashboard)
    }

    /// Side menu
    pub fn navigation(&self) -> &Navigation {
        self.memo(&self.navigation)
    }

    /// Transfer generator
    pub fn generate_transfer(&self) -> &GenerateTransferPage {
        self.memo(&self.generate_transfer)
    }

    /// Navigate to the base URL. Repeating it lands on the same screen.
    pub async fn open_site(&self) -> E2eResult<()> {
        self.page().goto(&self.config.base_url).await
    }

    /// Sign in with the configured credentials
    pub async fn sign_in(&self) -> E2eResult<()> {
        self.login().sign_in(&self.config.credentials).await?;
        self.page().wait_for_load_state(LoadState::Load).await
    }

    /// Open the transfer generator from the menu
    pub async fn open_generate_transfer(&self) -> E2eResult<()> {
        self.navigation().go_to_generate_transfer().await
    }

    /// Apply one capability
    pub async fn apply(&self, precondition: Precondition) -> E2eResult<()> {
        tracing::info!(fixture = %precondition, "fixture setup");
        match precondition {
            Precondition::OpenSite => self.open_site().await,
            Precondition::SignIn => self.sign_in().await,
            Precondition::OpenGenerateTransfer => self.open_generate_transfer().await,
        }
    }

    /// Plan `requested` against `registry` and apply it in order
    pub async fn setup(
        &self,
        registry: &FixtureRegistry,
        requested: &[Precondition],
    ) -> E2eResult<()> {
        for precondition in registry.plan(requested)? {
            self.apply(precondition).await?;
        }
        Ok(())
    }

    /// Save a screenshot under the artifacts directory, if one is configured
    pub async fn capture_failure(&self, scenario: &str) -> E2eResult<Option<PathBuf>> {
        let Some(dir) = &self.config.artifacts_dir else {
            return Ok(None);
        };
        let png = self.page().screenshot().await?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(artifact_name(scenario, &self.session.id().to_string()));
        tokio::fs::write(&path, png).await?;
        tracing::warn!(path = %path.display(), "failure screenshot saved");
        Ok(Some(path))
    }

    /// Close the session
    pub async fn teardown(self) -> E2eResult<()> {
        tracing::info!(session = %self.session.id(), "fixture teardown");
        self.session.close().await
    }
}

/// File name for a failure screenshot: scenario name reduced to
/// `[a-z0-9-]`, a UTC timestamp and the session id
#[must_use]
pub fn artifact_name(scenario: &str, session_id: &str) -> String {
    let slug: String = scenario
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    format!("{slug}-{stamp}-{session_id}.png")
}

/// Scenario body: borrows the fixtures for as long as it runs
pub type ScenarioBody<'a> = BoxFuture<'a, E2eResult<()>>;

/// Run one scenario on an existing session.
///
/// Applies the standard plan for `preconditions`, runs `body`, captures a
/// screenshot when either fails, and always tears the session down. The
/// scenario's error wins over a teardown error.
pub async fn run_in_session<F>(
    session: Session,
    config: SuiteConfig,
    name: &str,
    preconditions: &[Precondition],
    body: F,
) -> E2eResult<()>
where
    F: for<'a> FnOnce(&'a Fixtures) -> ScenarioBody<'a>,
{
    let span = tracing::info_span!("scenario", name, session = %session.id());
    async move {
        let fixtures = Fixtures::new(session, config);
        let registry = FixtureRegistry::standard();

        let outcome = match fixtures.setup(&registry, preconditions).await {
            Ok(()) => body(&fixtures).await,
            Err(err) => Err(err),
        };

        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "scenario failed");
            if let Err(capture) = fixtures.capture_failure(name).await {
                tracing::warn!(error = %capture, "could not capture failure screenshot");
            }
        } else {
            tracing::info!("scenario passed");
        }

        let closed = fixtures.teardown().await;
        outcome.and(closed)
    }
    .instrument(span)
    .await
}

/// Launch a browser session from `config` and run one scenario in it
#[cfg(feature = "browser")]
pub async fn run_scenario<F>(
    config: SuiteConfig,
    name: &str,
    preconditions: &[Precondition],
    body: F,
) -> E2eResult<()>
where
    F: for<'a> FnOnce(&'a Fixtures) -> ScenarioBody<'a>,
{
    config.validate()?;
    let session = Session::launch(&config).await?;
    run_in_session(session, config, name, preconditions, body).await
}
