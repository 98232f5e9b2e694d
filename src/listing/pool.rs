//! Fixed-size pool of long-lived worker threads.
//!
//! Each worker owns one piece of state `S` (a browser, in production) that it
//! creates lazily on its first job and keeps until the pool is dropped. The
//! number of workers, and therefore the number of live `S` values, never
//! exceeds the size given at construction.

use std::fmt;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::error::ScrapeError;

type Job<S> = Box<dyn FnOnce(&mut Option<S>) + Send>;

pub struct WorkerPool<S> {
    sender: Option<mpsc::Sender<Job<S>>>,
    workers: Vec<JoinHandle<()>>,
}

impl<S: 'static> WorkerPool<S> {
    /// Spawn `size` workers (at least one) named `{name}-{index}`
    pub fn new(size: usize, name: &str) -> Result<Self, ScrapeError> {
        let size = size.max(1);
        let (sender, receiver) = mpsc::channel::<Job<S>>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let receiver = Arc::clone(&receiver);
            let handle = thread::Builder::new()
                .name(format!("{}-{}", name, index))
                .spawn(move || worker_loop(receiver))
                .map_err(|e| ScrapeError::Internal(format!("Failed to spawn worker: {}", e)))?;
            workers.push(handle);
        }

        info!("Started {} {} workers", size, name);
        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Run `job` on the next free worker and block until it returns
    pub fn run<T, F>(&self, job: F) -> Result<T, ScrapeError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Option<S>) -> T + Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| ScrapeError::Internal("Worker pool is shut down".to_string()))?;

        sender
            .send(Box::new(move |state: &mut Option<S>| {
                // The caller may have gone away; nothing to do then
                let _ = reply_tx.send(job(state));
            }))
            .map_err(|_| ScrapeError::Internal("Worker pool is shut down".to_string()))?;

        reply_rx
            .recv()
            .map_err(|_| ScrapeError::Internal("Worker exited before replying".to_string()))
    }
}

fn worker_loop<S>(receiver: Arc<Mutex<mpsc::Receiver<Job<S>>>>) {
    let mut state: Option<S> = None;
    loop {
        let job = match receiver.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };
        match job {
            Ok(job) => job(&mut state),
            Err(_) => break,
        }
    }
    debug!("Worker {:?} stopping", thread::current().name());
    // `state` is dropped here, releasing the worker's browser
}

impl<S> Drop for WorkerPool<S> {
    fn drop(&mut self) {
        // Closing the channel lets every worker finish its loop
        self.sender.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl<S> fmt::Debug for WorkerPool<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.workers.len())
            .finish()
    }
}
