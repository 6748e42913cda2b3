//! Common test utilities for e2e tests
//!
//! Provides test infrastructure for spinning up a MySQL container and
//! building connection configs that point at it.

use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::mysql::Mysql;

use tailormade_db::domain::{ConnectionConfig, ConnectionConfigBuilder};

/// Database created by the MySQL test image
pub const TEST_DATABASE: &str = "test";

/// Test database context
pub struct TestDb {
    pub host: String,
    _container: ContainerAsync<Mysql>,
}

impl TestDb {
    /// Start a fresh MySQL container
    pub async fn new() -> Self {
        let container = Mysql::default()
            .start()
            .await
            .expect("Failed to start MySQL container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get port");

        Self {
            host: format!("{host}:{port}"),
            _container: container,
        }
    }

    /// Config builder for the container's root account
    pub fn config(&self) -> ConnectionConfigBuilder {
        ConnectionConfig::builder(self.host.clone())
            .database(TEST_DATABASE)
            .user("root")
            .password("")
    }
}
