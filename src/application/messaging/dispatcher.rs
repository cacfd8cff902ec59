//! Session dispatcher - Routes events to one worker task per user
//!
//! Events from the same user are handled strictly in arrival order, each to
//! completion before the next. Different users are handled concurrently, so
//! a slow checkout for one user never holds up another.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::application::services::InteractionController;
use crate::domain::entities::{Event, UserId};

/// Pending events a single user may queue before `dispatch` waits
const WORKER_QUEUE: usize = 32;

struct Worker {
    sender: mpsc::Sender<Event>,
    handle: JoinHandle<()>,
}

/// Message dispatcher - fans events out to per-user workers
pub struct SessionDispatcher {
    controller: Arc<InteractionController>,
    workers: Mutex<HashMap<UserId, Worker>>,
}

impl SessionDispatcher {
    pub fn new(controller: Arc<InteractionController>) -> Self {
        Self {
            controller,
            workers: Mutex::new(HashMap::new()),
        }
    }

    /// Queue an event on its sender's worker, starting one if needed
    pub async fn dispatch(&self, event: Event) {
        let user_id = event.sender.id;
        let sender = {
            let mut workers = self.workers.lock().await;
            let worker = workers
                .entry(user_id)
                .or_insert_with(|| spawn_worker(user_id, self.controller.clone()));
            if worker.sender.is_closed() {
                tracing::warn!("Worker for user {} stopped, restarting", user_id);
                *worker = spawn_worker(user_id, self.controller.clone());
            }
            worker.sender.clone()
        };

        if let Err(e) = sender.send(event).await {
            tracing::error!("Dropped event for user {}: worker gone", e.0.sender.id);
        }
    }

    /// Number of users with a live worker
    pub async fn active_sessions(&self) -> usize {
        self.workers.lock().await.len()
    }

    /// Stop accepting events and wait for every queued event to finish
    pub async fn shutdown(&self) {
        let workers: Vec<Worker> = self.workers.lock().await.drain().map(|(_, w)| w).collect();
        for Worker { sender, handle } in workers {
            drop(sender);
            if let Err(e) = handle.await {
                tracing::error!("Session worker failed: {}", e);
            }
        }
    }
}

fn spawn_worker(user_id: UserId, controller: Arc<InteractionController>) -> Worker {
    let (sender, mut receiver) = mpsc::channel::<Event>(WORKER_QUEUE);
    let handle = tokio::spawn(async move {
        tracing::debug!("Session worker started for user {}", user_id);
        while let Some(event) = receiver.recv().await {
            controller.handle(event).await;
        }
        tracing::debug!("Session worker for user {} finished", user_id);
    });
    Worker { sender, handle }
}
