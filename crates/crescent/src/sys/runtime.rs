use crate::config;
use crate::events::AppEvent;
use crate::menu::KeyValueStore;
use crate::sys::host::{self, Host};
use crate::sys::server;
use async_channel::{Receiver, Sender};
use std::io;
use std::thread::{self, JoinHandle};
use tokio::runtime::{Builder, Runtime};

/// Control socket and config watcher on their own thread and runtime.
pub fn start_background_services(tx: Sender<AppEvent>) -> io::Result<JoinHandle<()>> {
    let rt = Runtime::new()?;
    thread::Builder::new()
        .name("crescent-io".to_string())
        .spawn(move || {
            rt.block_on(async move {
                tokio::join!(
                    server::run_server(tx.clone()),
                    config::run_async_watcher(tx)
                );
            });
            log::warn!("Background services stopped");
        })
}

/// Drives the host on the calling thread until every sender is dropped.
pub fn run_foreground<S: KeyValueStore>(host: Host<S>, rx: Receiver<AppEvent>) -> io::Result<()> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(host::run(host, rx));
    Ok(())
}
