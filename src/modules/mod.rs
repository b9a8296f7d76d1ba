pub mod unit_manage;
pub mod user_manage;

use estate_kernel::ModuleRegistry;

/// Register all resource modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(unit_manage::create_module());
    registry.register(user_manage::create_module());
}
