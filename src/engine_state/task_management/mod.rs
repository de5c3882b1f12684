//! # Task Management System
//!
//! This module provides a small thread pool for the two heavy jobs of the world:
//! generating chunks and meshing them. Both are pure reads of shared state followed by
//! a short write, which maps onto a task / result split.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work executed on a worker thread
//! - `TaskResult`: The result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: Communication channel between the calling thread and one worker
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager distributes tasks to available worker channels using round-robin
//! 3. Workers process tasks and send back results
//! 4. Results are applied to the world in `process_completed_tasks()`
//! 5. Results can spawn new tasks
//! 6. `wait_until_idle()` repeats the above until nothing is left
//!
//! With zero workers every task runs on the calling thread inside `wait_until_idle()`,
//! which gives the same results in the same order as the sequential code paths.
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new(4);
//! task_manager.publish_task(Box::new(ChunkMeshGenerationTask::new(world.clone(), 0, 0)));
//! task_manager.wait_until_idle(&world);
//! ```

pub mod task;

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{debug, error, info};

use crate::core::MtResource;
use crate::engine_state::voxels::world::World;
use task::{Task, TaskResult};

/// A communication channel between the calling thread and a worker thread.
///
/// # Fields
/// - `task_sender`: Sends tasks to the worker
/// - `result_receiver`: Receives task results from the worker
/// - `num_tasks_in_flight`: Tracks number of tasks currently being processed
/// - `disconnected`: Set once the worker is found dead
/// - `_worker`: Handle to the worker thread
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    disconnected: bool,
    _worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// # Fields
/// - `channels`: Set of active worker channels
/// - `queued_tasks`: Tasks waiting for an available worker
/// - `current_channel`: Index for round-robin scheduling
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
}

/// Maximum number of tasks that can be in flight per worker channel.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with the specified number of worker threads.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to create. `0` runs every task on the
    ///   thread calling `wait_until_idle()`.
    ///
    /// A worker thread that cannot be spawned is logged and skipped.
    pub fn new(num_workers: usize) -> Self {
        info!(
            "Starting {} workers (available parallelism: {:?})",
            num_workers,
            thread::available_parallelism()
        );

        let mut channels = Vec::with_capacity(num_workers);
        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            match thread::Builder::new()
                .name(format!("voxel-worker-{index}"))
                .spawn(task_closure)
            {
                Ok(worker) => channels.push(TaskChannel {
                    task_sender: task_tx,
                    result_receiver: result_rx,
                    num_tasks_in_flight: 0,
                    disconnected: false,
                    _worker: worker,
                }),
                Err(e) => error!("Failed to spawn worker {index}: {e}"),
            }
        }

        TaskManager {
            channels,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
        }
    }

    /// The number of live worker threads.
    pub fn worker_count(&self) -> usize {
        self.channels.iter().filter(|c| !c.disconnected).count()
    }

    /// Tasks sent to workers whose results have not been applied yet.
    pub fn tasks_in_flight(&self) -> usize {
        self.channels.iter().map(|c| c.num_tasks_in_flight).sum()
    }

    /// Tasks waiting for a worker.
    pub fn queued_task_count(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Whether every published task has been processed and applied.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.tasks_in_flight() == 0
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was sent
    /// - `Err(task)` if the worker is gone; the channel is flagged as disconnected
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        let channel = &mut self.channels[channel_idx];
        match channel.task_sender.send(task) {
            Ok(_) => {
                channel.num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                channel.disconnected = true;
                Err(task.0)
            }
        }
    }

    /// Finds an available worker channel, round-robin from the last one used.
    ///
    /// # Returns
    /// - `Some(usize)` index of a live channel below `MAX_TASKS_IN_FLIGHT`
    /// - `None` if all channels are busy or there are no channels available
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|i| (self.current_channel + i) % len)
            .find(|&i| {
                let channel = &self.channels[i];
                !channel.disconnected && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
            })
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task was immediately scheduled on an available worker
    /// - `false` if the task was queued
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Sends queued tasks to workers until the queue is empty or all workers are busy.
    ///
    /// Tasks leave the queue in FIFO order.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => self.queued_tasks.push_front(task),
            }
        }
    }

    /// Applies all results workers have sent back so far, without blocking.
    ///
    /// Follow-up tasks returned by the results are published.
    ///
    /// # Returns
    /// The number of results applied.
    pub fn process_completed_tasks(&mut self, world: &MtResource<World>) -> usize {
        let mut results = Vec::new();
        for channel in &mut self.channels {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight -= 1;
                        results.push(result);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        channel.disconnected = true;
                        break;
                    }
                }
            }
        }
        self.prune_disconnected_channels();

        let applied = results.len();
        for result in results {
            self.apply_result(result, world);
        }
        applied
    }

    /// Processes and applies everything that has been published, including follow-up
    /// tasks, blocking until done.
    pub fn wait_until_idle(&mut self, world: &MtResource<World>) {
        loop {
            self.process_completed_tasks(world);
            self.process_queued_tasks();

            if self.channels.is_empty() {
                self.run_queued_inline(world);
                return;
            }
            if self.is_idle() {
                return;
            }

            let Some(channel_idx) = self.channels.iter().position(|c| c.num_tasks_in_flight > 0) else {
                continue;
            };
            let channel = &mut self.channels[channel_idx];
            match channel.result_receiver.recv() {
                Ok(result) => {
                    channel.num_tasks_in_flight -= 1;
                    self.apply_result(result, world);
                }
                Err(_) => channel.disconnected = true,
            }
        }
    }

    fn apply_result(&mut self, result: Box<dyn TaskResult + Send>, world: &MtResource<World>) {
        for task in result.handle_result(world) {
            self.publish_task(task);
        }
    }

    fn run_queued_inline(&mut self, world: &MtResource<World>) {
        if !self.queued_tasks.is_empty() {
            debug!("Running {} tasks on the calling thread", self.queued_tasks.len());
        }
        while let Some(task) = self.queued_tasks.pop_front() {
            let result = task.process();
            self.queued_tasks.extend(result.handle_result(world));
        }
    }

    fn prune_disconnected_channels(&mut self) {
        if !self.channels.iter().any(|c| c.disconnected) {
            return;
        }
        for channel in self.channels.iter().filter(|c| c.disconnected) {
            error!(
                "Worker {:?} stopped, {} task(s) lost",
                channel._worker.thread().name(),
                channel.num_tasks_in_flight
            );
        }
        self.channels.retain(|c| !c.disconnected);
        self.current_channel = 0;
    }
}
