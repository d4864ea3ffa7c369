//! TCP Server
//!
//! Accepts connections and hands each one to its own execution context.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Sender};

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{RankError, Result};
use crate::store::Store;

use super::Connection;

/// TCP server for RankKV
pub struct Server {
    config: Config,
    dispatcher: Dispatcher,
    listener: Option<TcpListener>,
    shutdown: Arc<AtomicBool>,
    next_connection_id: AtomicU64,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<Store>) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(store),
            listener: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            next_connection_id: AtomicU64::new(1),
        }
    }

    /// Bind the listening socket, returning the bound address
    ///
    /// Calling again after a successful bind returns the same address.
    /// Binding `port 0` picks a free port.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        if let Some(listener) = &self.listener {
            return Ok(listener.local_addr()?);
        }

        self.config.validate()?;
        let listener = TcpListener::bind(&self.config.listen_addr)?;
        let addr = listener.local_addr()?;
        tracing::info!("Listening on {}", addr);

        self.listener = Some(listener);
        Ok(addr)
    }

    /// Address the server is bound to, if bound
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// A handle that stops `run` from another thread
    ///
    /// Only available once bound.
    pub fn shutdown_handle(&self) -> Option<ShutdownHandle> {
        self.local_addr().map(|addr| ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            addr,
        })
    }

    /// Start the server (blocking)
    ///
    /// Binds if needed, then accepts until shut down. Accept errors are
    /// logged and skipped; a failing connection never stops the loop.
    pub fn run(&mut self) -> Result<()> {
        self.bind()?;
        let listener = self
            .listener
            .take()
            .ok_or_else(|| RankError::Config("listener not bound".to_string()))?;

        let pool = self
            .config
            .worker_threads
            .map(|workers| WorkerPool::spawn(workers, &self.dispatcher, &self.config))
            .transpose()?;

        for stream in listener.incoming() {
            if self.shutdown.load(Ordering::Acquire) {
                break;
            }

            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!("Accept error: {}", e);
                    continue;
                }
            };

            let id = self.next_connection_id.fetch_add(1, Ordering::Relaxed);
            match &pool {
                Some(pool) => pool.submit(stream),
                None => self.spawn_connection(id, stream),
            }
        }

        tracing::info!("Server shutting down");
        Ok(())
    }

    /// Signal the server to stop accepting connections
    ///
    /// Connections already being served run until their clients disconnect.
    pub fn shutdown(&self) {
        match self.shutdown_handle() {
            Some(handle) => handle.shutdown(),
            None => self.shutdown.store(true, Ordering::Release),
        }
    }

    fn spawn_connection(&self, id: u64, stream: TcpStream) {
        let dispatcher = self.dispatcher.clone();
        let config = self.config.clone();

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", id))
            .spawn(move || serve(stream, dispatcher, &config));

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn thread for connection {}: {}", id, e);
        }
    }
}

/// Stops a running server from another thread
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    addr: SocketAddr,
}

impl ShutdownHandle {
    /// Set the shutdown flag and wake the blocked accept call
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Release);

        // A wildcard bind is reachable through loopback
        let mut addr = self.addr;
        if addr.ip().is_unspecified() {
            addr.set_ip(match addr.ip() {
                IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            });
        }
        let _ = TcpStream::connect(addr);
    }
}

/// Fixed set of workers fed accepted connections over a channel
struct WorkerPool {
    sender: Sender<TcpStream>,
}

impl WorkerPool {
    fn spawn(workers: usize, dispatcher: &Dispatcher, config: &Config) -> Result<Self> {
        let (sender, receiver) = channel::unbounded::<TcpStream>();

        for i in 0..workers {
            let receiver = receiver.clone();
            let dispatcher = dispatcher.clone();
            let config = config.clone();

            thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || {
                    // Ends once the server drops the sender
                    for stream in receiver.iter() {
                        serve(stream, dispatcher.clone(), &config);
                    }
                })?;
        }

        tracing::info!("Started {} connection workers", workers);
        Ok(Self { sender })
    }

    fn submit(&self, stream: TcpStream) {
        if self.sender.send(stream).is_err() {
            tracing::warn!("Connection dropped: no workers running");
        }
    }
}

/// Serve one connection to completion; failures stay local to it
fn serve(stream: TcpStream, dispatcher: Dispatcher, config: &Config) {
    let result = Connection::new(stream, dispatcher, config).and_then(|mut conn| conn.handle());

    if let Err(e) = result {
        tracing::debug!("Connection closed with error: {}", e);
    }
}
