//! Background flow recalculation for interactive editors.
//!
//! Requests arrive faster than they are worth solving while a user drags
//! parts around. The worker waits for a quiet window after the last request
//! and only solves the newest layout; older requests are dropped.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bf_parts::Registry;
use bf_project::Layout;

use crate::error::{AppError, AppResult};
use crate::flow_service::{FlowOptions, FlowResponse, compute_flows};

#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    /// Quiet time after the last request before solving.
    pub debounce: Duration,
    pub options: FlowOptions,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(150),
            options: FlowOptions::default(),
        }
    }
}

/// Outcome of one solved request.
#[derive(Debug)]
pub struct FlowResult {
    /// Generation of the request this answers; increases with every request.
    pub generation: u64,
    pub result: AppResult<FlowResponse>,
}

struct Request {
    generation: u64,
    layout: Layout,
}

pub struct FlowWorker {
    requests: Option<Sender<Request>>,
    results: Receiver<FlowResult>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl FlowWorker {
    pub fn start(config: WorkerConfig) -> Self {
        let (request_tx, request_rx) = channel();
        let (result_tx, result_rx) = channel();
        let handle = thread::spawn(move || run(&config, &request_rx, &result_tx));
        Self {
            requests: Some(request_tx),
            results: result_rx,
            generation: 0,
            handle: Some(handle),
        }
    }

    /// Queue a recalculation; returns the generation assigned to it.
    pub fn request(&mut self, layout: Layout) -> AppResult<u64> {
        let tx = self.requests.as_ref().ok_or(AppError::WorkerStopped)?;
        self.generation += 1;
        tx.send(Request {
            generation: self.generation,
            layout,
        })
        .map_err(|_| AppError::WorkerStopped)?;
        Ok(self.generation)
    }

    pub fn results(&self) -> &Receiver<FlowResult> {
        &self.results
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop accepting requests and wait for the pending one to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("flow worker panicked");
            }
        }
    }
}

impl Drop for FlowWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(config: &WorkerConfig, requests: &Receiver<Request>, results: &Sender<FlowResult>) {
    let registry = Registry::standard();
    while let Ok(mut latest) = requests.recv() {
        loop {
            match requests.recv_timeout(config.debounce) {
                Ok(newer) => {
                    tracing::trace!(superseded = latest.generation, "flow request dropped");
                    latest = newer;
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
            }
        }

        let result = compute_flows(&latest.layout, &registry, &config.options);
        tracing::debug!(generation = latest.generation, ok = result.is_ok(), "flows recalculated");
        let message = FlowResult {
            generation: latest.generation,
            result,
        };
        if results.send(message).is_err() {
            return;
        }
    }
}
