use std::rc::Rc;

use payloads::APIClient;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, Config};

pub mod mock;
pub mod transport;

pub use transport::{Gate, MockTransport};

pub struct TestApp {
    pub app: App,
    pub transport: Rc<MockTransport>,
}

impl TestApp {
    /// Script successful responses for everything [`App::mount`] reads.
    pub fn script_mount_defaults(&self) {
        let t = &self.transport;
        t.respond("app_info", &mock::sample_app_info());
        t.respond("platform_info", &mock::sample_platform());
        t.respond("check_for_update", &mock::sample_update_info());
        t.respond("cache_info", &mock::sample_cache_info());
        t.respond("env_list", &mock::sample_environments());
        t.respond("shim_list", &mock::sample_shims());
        t.respond("path_status", &mock::sample_path_status(true));
    }
}

/// Send logs from tests to stderr. `RUST_LOG=debug cargo test` to see them.
pub fn init_test_logging() {
    let subscriber = ui::logs::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// Build an app on a [`MockTransport`]. Nothing is scripted and nothing is
/// mounted yet.
pub fn spawn_app_with(config: Config) -> TestApp {
    init_test_logging();
    let transport = Rc::new(MockTransport::new());
    let client = APIClient::with_transport(transport.clone());
    TestApp {
        app: App::new(config, client),
        transport,
    }
}

/// Like [`spawn_app_with`], without request timeouts.
pub fn spawn_app() -> TestApp {
    spawn_app_with(Config {
        request_timeout: None,
        ..Config::default()
    })
}
