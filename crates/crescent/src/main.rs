use crescent::config;
use crescent::menu::FileStore;
use crescent::sys::host::Host;
use crescent::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }
    let config = config::load_or_default();
    let store = FileStore::in_data_dir()?;
    log::info!(
        "Starting with {} options, selection stored in {}",
        config.options.len(),
        store.root().display()
    );
    let host = Host::new(&config, store);

    let (tx, rx) = async_channel::bounded(32);
    let _services = runtime::start_background_services(tx)?;

    runtime::run_foreground(host, rx)?;
    Ok(())
}
