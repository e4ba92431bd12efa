use std::sync::Arc;

use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::error_log_repository::ErrorLogRepository;
use crate::application::ports::link_repository::LinkRepository;
use crate::bootstrap::config::Config;

/// Handle on everything a request handler needs. Built once at startup and
/// passed around by value; repositories stay behind their port traits so
/// tests can swap the storage engine.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    category_repo: Arc<dyn CategoryRepository>,
    link_repo: Arc<dyn LinkRepository>,
    error_log_repo: Arc<dyn ErrorLogRepository>,
}

impl AppServices {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        link_repo: Arc<dyn LinkRepository>,
        error_log_repo: Arc<dyn ErrorLogRepository>,
    ) -> Self {
        Self {
            category_repo,
            link_repo,
            error_log_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn category_repo(&self) -> Arc<dyn CategoryRepository> {
        self.services.category_repo.clone()
    }

    pub fn link_repo(&self) -> Arc<dyn LinkRepository> {
        self.services.link_repo.clone()
    }

    pub fn error_log_repo(&self) -> Arc<dyn ErrorLogRepository> {
        self.services.error_log_repo.clone()
    }
}
