pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use estate_kernel::{InitCtx, Module, RouteInfo};

use crate::common::{crud, crud::CrudService, store::MemoryStore};
use models::{CreateUnitManageDto, UpdateUnitManageDto};

/// Default unit service backed by the in-memory store
pub type UnitManageService = MemoryStore<CreateUnitManageDto, UpdateUnitManageDto>;

/// Housing unit management: CRUD routes under `/unit-manage`
pub struct UnitManageModule<S = UnitManageService> {
    service: Arc<S>,
}

impl<S> UnitManageModule<S>
where
    S: CrudService<Create = CreateUnitManageDto, Update = UpdateUnitManageDto>,
{
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> Module for UnitManageModule<S>
where
    S: CrudService<Create = CreateUnitManageDto, Update = UpdateUnitManageDto>,
{
    fn name(&self) -> &'static str {
        "unit-manage"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "unit-manage module initialized"
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
        Some(crud::openapi("Units", "UnitManage"))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "unit-manage module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "unit-manage module stopped");
        Ok(())
    }
}

/// Create the unit module wired to a fresh in-memory service
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(UnitManageModule::new(Arc::new(UnitManageService::new(
        "unit-manage",
    ))))
}
