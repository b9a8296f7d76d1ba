pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use estate_kernel::{InitCtx, Module, RouteInfo};

use crate::common::{crud, crud::CrudService, store::MemoryStore};
use models::{CreateUserManageDto, UpdateUserManageDto};

/// Default resident profile service backed by the in-memory store
pub type UserManageService = MemoryStore<CreateUserManageDto, UpdateUserManageDto>;

/// Resident (citizen profile) management: CRUD routes under `/user-manage`
pub struct UserManageModule<S = UserManageService> {
    service: Arc<S>,
}

impl<S> UserManageModule<S>
where
    S: CrudService<Create = CreateUserManageDto, Update = UpdateUserManageDto>,
{
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> Module for UserManageModule<S>
where
    S: CrudService<Create = CreateUserManageDto, Update = UpdateUserManageDto>,
{
    fn name(&self) -> &'static str {
        "user-manage"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "user-manage module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        crud::router(self.service.clone())
    }

    fn route_table(&self) -> Vec<RouteInfo> {
        crud::route_table()
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(crud::openapi("Residents", "UserManage"))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "user-manage module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "user-manage module stopped");
        Ok(())
    }
}

/// Create the resident module wired to a fresh in-memory service
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(UserManageModule::new(Arc::new(UserManageService::new(
        "user-manage",
    ))))
}
