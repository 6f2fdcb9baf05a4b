//! `PacketLens` builder: a registry wired to its own mutation executor.
//!
//! The executor is the single writer for dynamic registrations. Lookups
//! never touch it.

use std::sync::Arc;

use packetlens_protocol::PacketType;
use packetlens_registry::{DeclarationTable, IdMismatch, Registry, RegistryHooks, TypeFilter};
use packetlens_tick::{ExecutorHandle, ExecutorStats, TickExecutor};
use tokio::task::JoinHandle;
use tracing::info;

use crate::PacketLensError;
use crate::config::PacketLensConfig;

/// Builder for a [`PacketLens`].
///
/// # Example
///
/// ```rust,no_run
/// use packetlens::prelude::*;
///
/// # async fn run() -> Result<(), PacketLensError> {
/// let lens = PacketLens::builder()
///     .on_id_mismatch(|event| eprintln!("{} drifted", event.class_name))
///     .build()?;
/// let registry = lens.registry();
/// # let _ = registry;
/// lens.shutdown().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PacketLensBuilder {
    config: PacketLensConfig,
    tables: Vec<&'static DeclarationTable>,
    hooks: RegistryHooks,
}

impl PacketLensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: PacketLensConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a declaration table on top of the builtins.
    pub fn declare(mut self, table: &'static DeclarationTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn hooks(mut self, hooks: RegistryHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_id_mismatch<F>(mut self, hook: F) -> Self
    where
        F: Fn(&IdMismatch<'_>) + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_id_mismatch(hook);
        self
    }

    pub fn on_dynamic_create<F>(mut self, hook: F) -> Self
    where
        F: Fn(&PacketType) + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_dynamic_create(hook);
        self
    }

    /// Spawns the executor and builds the registry on top of it.
    ///
    /// Must be called from inside a tokio runtime. If the tables are
    /// malformed the executor is shut down again before returning.
    pub fn build(self) -> Result<PacketLens, PacketLensError> {
        let config = self.config.validated();
        let (executor, join) = TickExecutor::spawn(config.tick.clone());

        let registry = self
            .tables
            .into_iter()
            .fold(Registry::builder(), |builder, table| builder.declare(table))
            .config(config.registry.clone())
            .hooks(self.hooks)
            .context(executor.clone())
            .build();

        let registry = match registry {
            Ok(registry) => registry,
            Err(err) => {
                executor.shutdown();
                return Err(err.into());
            }
        };

        info!(
            types = registry.all().len(),
            tick_rate_hz = config.tick.tick_rate_hz,
            "packetlens ready"
        );
        Ok(PacketLens {
            registry,
            executor,
            join,
            config,
        })
    }
}

/// A running registry together with the executor that mutates it.
///
/// Clone [`PacketLens::registry`] freely into packet-processing tasks.
#[derive(Debug)]
pub struct PacketLens {
    registry: Registry,
    executor: ExecutorHandle,
    join: JoinHandle<()>,
    config: PacketLensConfig,
}

impl PacketLens {
    pub fn builder() -> PacketLensBuilder {
        PacketLensBuilder::new()
    }

    /// Builds with the builtin tables and default configuration.
    pub fn start() -> Result<Self, PacketLensError> {
        Self::builder().build()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The executor handle. Submit work here to run it on the thread that
    /// owns registry mutations.
    pub fn executor(&self) -> &ExecutorHandle {
        &self.executor
    }

    pub fn config(&self) -> &PacketLensConfig {
        &self.config
    }

    /// Parses `filter` and resolves it against the registry.
    pub fn filter(&self, filter: &str) -> Result<Vec<Arc<PacketType>>, PacketLensError> {
        let filter = TypeFilter::parse(filter)?;
        Ok(filter.resolve(&self.registry).into_iter().collect())
    }

    /// Stops the executor after it has run every queued task.
    ///
    /// Registry clones stay readable afterwards. Dynamic types classified
    /// after shutdown register synchronously on the calling thread.
    pub async fn shutdown(self) -> Result<ExecutorStats, PacketLensError> {
        self.executor.shutdown();
        self.join.await?;
        let stats = self.executor.stats();
        info!(
            completed = stats.completed,
            panicked = stats.panicked,
            ticks = stats.ticks,
            skipped_ticks = stats.skipped_ticks,
            max_drain_ms = stats.max_drain.as_secs_f64() * 1000.0,
            "packetlens stopped"
        );
        Ok(stats)
    }
}
