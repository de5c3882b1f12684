//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system.
//!
//! ## Core Components
//! - `Task`: A unit of work executed on a worker thread
//! - `TaskResult`: The outcome of a task, applied to the world on the calling thread
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called by `TaskManager::process_completed_tasks()`
//! 5. The result can mutate the world and spawn new tasks
//!
//! ## Thread Safety
//! - `Task` must be `Send` to be transferred to a worker
//! - `TaskResult` must be `Send` to be transferred back
//! - Workers only ever take read guards on the world; writes happen in `handle_result()`

use crate::core::MtResource;
use crate::engine_state::voxels::world::World;

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own what they compute from and only read shared state.
pub trait Task: Send {
    /// Processes the task and returns a result.
    ///
    /// # Returns
    /// A boxed `TaskResult` that will be applied on the calling thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`.
pub trait TaskResult: Send {
    /// Applies the result.
    ///
    /// # Arguments
    /// * `world` - The shared world; take the write guard only as long as needed
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty).
    fn handle_result(self: Box<Self>, world: &MtResource<World>) -> Vec<Box<dyn Task + Send>>;
}
