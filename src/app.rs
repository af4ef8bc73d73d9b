//! Wiring of the session core and store API client for CLI commands.

use std::sync::Arc;

use tracing::debug;

use storefront_auth::{Navigation, RouteGuard, SessionManager, SessionStore};
use storefront_cache::StoreManager;
use storefront_client::{
    CategoryApi, DashboardService, HttpAuthService, ReqwestTransport, RequestGateway, Transport,
};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::KeyValueStore;

/// Everything a command needs, built once per invocation.
#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionManager,
    pub categories: CategoryApi,
    pub dashboard: DashboardService,
    guard: RouteGuard,
}

impl AppContext {
    /// Build the stack from configuration and restore any persisted session.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.api)?);
        let stores = StoreManager::new(&config.session)?;
        let session_store = SessionStore::from_config(stores.store(), &config.session);

        let auth = HttpAuthService::new(Arc::clone(&transport), &config.api);
        let session = SessionManager::new(Arc::new(auth), session_store);
        session.restore().await?;

        let gateway = RequestGateway::new(transport, session.clone());
        let categories = CategoryApi::new(gateway, &config.api);
        let dashboard = DashboardService::new(categories.clone(), config.ui.dashboard_recent);
        let guard = RouteGuard::new(
            config.session.login_route.clone(),
            config.session.home_route.clone(),
        );
        debug!(state = %session.state(), backend = stores.backend(), "CLI context ready");

        Ok(Self {
            config,
            session,
            categories,
            dashboard,
            guard,
        })
    }

    /// Require a session, as any route in the protected area does.
    pub fn require_session(&self) -> AppResult<()> {
        self.enter(self.guard.home_route())
    }

    /// Require no session, as the login route does.
    pub fn require_signed_out(&self) -> AppResult<()> {
        self.enter(self.guard.login_route())
    }

    fn enter(&self, route: &str) -> AppResult<()> {
        match self.guard.decide(self.session.state(), route) {
            Navigation::Stay => Ok(()),
            Navigation::Redirect(target) if target == self.guard.login_route() => {
                Err(AppError::authentication("Not logged in"))
            }
            Navigation::Redirect(_) => Err(AppError::validation("Already logged in")),
        }
    }
}
