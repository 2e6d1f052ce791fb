//! Phase scheduler: labeled task queues drained in priority order.
//!
//! Page initialization and filter re-evaluation are split into named phases
//! ("labels"), each with a fixed numeric priority. Work is enqueued under a
//! label and `run()` drains all queues in ascending priority order, so
//! ordering between phases never depends on enqueue order.
//!
//! Execution is single-threaded and cooperative: every task runs
//! synchronously to completion, and `run()` is expected to be invoked once
//! per meaningful UI event and finish before the next.

mod label;
mod queue;

pub use label::{
    LABEL_FILTER, LABEL_FOCUS, LABEL_INIT, LABEL_KIND, PRIORITY_FILTER, PRIORITY_FOCUS,
    PRIORITY_INIT, PRIORITY_KIND,
};
pub use queue::{Scheduler, Task};
