use feedapp_frontend::{App, config};
use leptos::prelude::*;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let (level, level_error) = config::log_level();
    // 日志初始化失败不影响应用运行
    let _ = console_log::init_with_level(level);
    if let Some(e) = level_error {
        log::warn!("[App] {}; using '{}'.", e, level);
    }

    mount_to_body(App);
}
