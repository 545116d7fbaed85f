use std::io;
use std::path::Path;
use std::sync::Arc;

use miette::{IntoDiagnostic, WrapErr};
use mw_bridge::{CommandBridge, JsonDirRepository, LogSink};
use mw_core::WorldStore;
use mw_fiction::{ProseConfig, TemplateProse};

pub fn run(data_dir: Option<&Path>, prose_seed: Option<u64>, config: Option<&Path>) -> miette::Result<()> {
    let config = super::load_config(config)?;
    let mut prose = ProseConfig::new();
    if let Some(seed) = prose_seed {
        prose = prose.with_seed(seed);
    }

    let store = Arc::new(WorldStore::new(Arc::new(TemplateProse::new(prose))).with_config(config));
    let mut bridge = CommandBridge::new(store, Arc::new(LogSink));
    if let Some(dir) = data_dir {
        let repository = JsonDirRepository::open(dir)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot open data directory {}", dir.display()))?;
        bridge = bridge.with_repository(Arc::new(repository));
    }

    tracing::info!(persistent = data_dir.is_some(), "bridge listening on stdin");
    bridge
        .run(io::stdin().lock(), io::stdout().lock())
        .into_diagnostic()
        .wrap_err("bridge I/O failed")
}
