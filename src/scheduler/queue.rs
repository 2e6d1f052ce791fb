//! The label-priority task queue.

use std::collections::VecDeque;

use crate::error::{DocsiftError, Result};

use super::label::{
    LABEL_FILTER, LABEL_FOCUS, LABEL_INIT, LABEL_KIND, PRIORITY_FILTER, PRIORITY_FOCUS,
    PRIORITY_INIT, PRIORITY_KIND,
};

/// A unit of scheduled work. Tasks receive the scheduler so they can enqueue
/// follow-up work into later phases.
pub type Task = Box<dyn FnOnce(&mut Scheduler) -> Result<()>>;

struct LabelQueue {
    name: String,
    priority: i32,
    tasks: VecDeque<Task>,
}

/// Ordered multi-queue of labeled tasks.
///
/// Labels are declared once ahead of use; enqueuing to an undeclared label is
/// a configuration error. `run()` drains each label's queue to empty before
/// moving to the next, so a task enqueuing into a not-yet-drained label (its
/// own included) is processed in the same pass, while enqueues into an
/// already-drained label wait for the next `run()`.
#[derive(Default)]
pub struct Scheduler {
    // kept sorted by priority, declaration order breaking ties
    queues: Vec<LabelQueue>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler with the four standard index labels declared.
    pub fn with_standard_labels() -> Self {
        let mut scheduler = Self::new();
        for (name, priority) in [
            (LABEL_INIT, PRIORITY_INIT),
            (LABEL_FOCUS, PRIORITY_FOCUS),
            (LABEL_KIND, PRIORITY_KIND),
            (LABEL_FILTER, PRIORITY_FILTER),
        ] {
            // fresh scheduler, the standard names cannot collide
            let _ = scheduler.declare_label(name, priority);
        }
        scheduler
    }

    /// Register a label with a numeric priority; lower runs first.
    /// Redeclaring an existing label is an error.
    pub fn declare_label(&mut self, name: &str, priority: i32) -> Result<()> {
        if self.queues.iter().any(|q| q.name == name) {
            return Err(DocsiftError::DuplicateLabel(name.to_string()));
        }
        self.queues.push(LabelQueue {
            name: name.to_string(),
            priority,
            tasks: VecDeque::new(),
        });
        // stable sort keeps declaration order within equal priorities
        self.queues.sort_by_key(|q| q.priority);
        Ok(())
    }

    /// Append a task to a declared label's queue.
    pub fn enqueue<F>(&mut self, label: &str, task: F) -> Result<()>
    where
        F: FnOnce(&mut Scheduler) -> Result<()> + 'static,
    {
        let queue = self.queue_mut(label)?;
        queue.tasks.push_back(Box::new(task));
        Ok(())
    }

    /// Enqueue one task per item, each item captured by value.
    pub fn enqueue_for_each<T, I, F>(&mut self, label: &str, items: I, f: F) -> Result<()>
    where
        T: 'static,
        I: IntoIterator<Item = T>,
        F: Fn(&mut Scheduler, T) -> Result<()> + Clone + 'static,
    {
        for item in items {
            let f = f.clone();
            self.enqueue(label, move |scheduler| f(scheduler, item))?;
        }
        Ok(())
    }

    /// Discard all pending tasks for a label.
    pub fn clear(&mut self, label: &str) -> Result<()> {
        let queue = self.queue_mut(label)?;
        let discarded = queue.tasks.len();
        queue.tasks.clear();
        if discarded > 0 {
            log::debug!("cleared {discarded} pending task(s) from label {label:?}");
        }
        Ok(())
    }

    /// Number of pending tasks for a label.
    pub fn pending(&self, label: &str) -> Result<usize> {
        self.queues
            .iter()
            .find(|q| q.name == label)
            .map(|q| q.tasks.len())
            .ok_or_else(|| DocsiftError::UndeclaredLabel(label.to_string()))
    }

    /// Drain all non-empty label queues in ascending priority order,
    /// executing each task synchronously to completion.
    ///
    /// A task returning an error aborts the remainder of that label's drain
    /// (its pending tasks are discarded) but other labels still run. Returns
    /// the number of tasks executed.
    pub fn run(&mut self) -> usize {
        let order: Vec<String> = self.queues.iter().map(|q| q.name.clone()).collect();
        let mut executed = 0;

        for name in order {
            loop {
                let task = match self.queue_mut(&name) {
                    Ok(queue) => queue.tasks.pop_front(),
                    Err(_) => None,
                };
                let Some(task) = task else { break };

                executed += 1;
                if let Err(e) = task(self) {
                    log::warn!("task in label {name:?} failed, dropping the rest of its queue: {e}");
                    if let Ok(queue) = self.queue_mut(&name) {
                        queue.tasks.clear();
                    }
                    break;
                }
            }
        }

        executed
    }

    fn queue_mut(&mut self, label: &str) -> Result<&mut LabelQueue> {
        self.queues
            .iter_mut()
            .find(|q| q.name == label)
            .ok_or_else(|| DocsiftError::UndeclaredLabel(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn trace() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn push(trace: &Rc<RefCell<Vec<String>>>, entry: &str) {
        trace.borrow_mut().push(entry.to_string());
    }

    #[test]
    fn test_enqueue_undeclared_label_fails() {
        let mut scheduler = Scheduler::new();
        let err = scheduler.enqueue("nope", |_| Ok(())).unwrap_err();
        assert!(matches!(err, DocsiftError::UndeclaredLabel(_)));
    }

    #[test]
    fn test_declare_label_twice_fails() {
        let mut scheduler = Scheduler::new();
        scheduler.declare_label("init", 1).unwrap();
        let err = scheduler.declare_label("init", 9).unwrap_err();
        assert!(matches!(err, DocsiftError::DuplicateLabel(_)));
    }

    #[test]
    fn test_labels_drain_in_priority_order_regardless_of_enqueue_order() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();

        let l = log.clone();
        scheduler.enqueue(LABEL_FILTER, move |_| {
            push(&l, "filter");
            Ok(())
        }).unwrap();
        let l = log.clone();
        scheduler.enqueue(LABEL_FOCUS, move |_| {
            push(&l, "focus");
            Ok(())
        }).unwrap();
        let l = log.clone();
        scheduler.enqueue(LABEL_INIT, move |_| {
            push(&l, "init");
            Ok(())
        }).unwrap();

        assert_eq!(scheduler.run(), 3);
        assert_eq!(*log.borrow(), ["init", "focus", "filter"]);
    }

    #[test]
    fn test_insertion_order_within_label() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();
        for i in 0..3 {
            let l = log.clone();
            scheduler.enqueue(LABEL_INIT, move |_| {
                push(&l, &format!("task-{i}"));
                Ok(())
            }).unwrap();
        }
        scheduler.run();
        assert_eq!(*log.borrow(), ["task-0", "task-1", "task-2"]);
    }

    #[test]
    fn test_task_enqueuing_into_later_label_runs_same_pass() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();

        let l = log.clone();
        scheduler.enqueue(LABEL_FOCUS, move |scheduler| {
            push(&l, "focus");
            let l2 = l.clone();
            scheduler.enqueue(LABEL_KIND, move |_| {
                push(&l2, "kind");
                Ok(())
            })
        }).unwrap();

        assert_eq!(scheduler.run(), 2);
        assert_eq!(*log.borrow(), ["focus", "kind"]);
    }

    #[test]
    fn test_task_enqueuing_into_own_label_runs_same_pass() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();

        let l = log.clone();
        scheduler.enqueue(LABEL_KIND, move |scheduler| {
            push(&l, "outer");
            let l2 = l.clone();
            scheduler.enqueue(LABEL_KIND, move |_| {
                push(&l2, "inner");
                Ok(())
            })
        }).unwrap();

        assert_eq!(scheduler.run(), 2);
        assert_eq!(*log.borrow(), ["outer", "inner"]);
    }

    #[test]
    fn test_enqueue_into_drained_label_waits_for_next_run() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();

        let l = log.clone();
        scheduler.enqueue(LABEL_KIND, move |scheduler| {
            push(&l, "kind");
            // init (priority 1) has already been drained in this pass
            let l2 = l.clone();
            scheduler.enqueue(LABEL_INIT, move |_| {
                push(&l2, "late-init");
                Ok(())
            })
        }).unwrap();

        assert_eq!(scheduler.run(), 1);
        assert_eq!(*log.borrow(), ["kind"]);
        assert_eq!(scheduler.pending(LABEL_INIT).unwrap(), 1);

        assert_eq!(scheduler.run(), 1);
        assert_eq!(*log.borrow(), ["kind", "late-init"]);
    }

    #[test]
    fn test_failing_task_aborts_its_label_but_not_others() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();

        scheduler.enqueue(LABEL_FOCUS, |_| {
            Err(DocsiftError::Markup("broken".to_string()))
        }).unwrap();
        let l = log.clone();
        scheduler.enqueue(LABEL_FOCUS, move |_| {
            push(&l, "skipped");
            Ok(())
        }).unwrap();
        let l = log.clone();
        scheduler.enqueue(LABEL_FILTER, move |_| {
            push(&l, "filter");
            Ok(())
        }).unwrap();

        // the failing task counts as executed, its queued sibling does not
        assert_eq!(scheduler.run(), 2);
        assert_eq!(*log.borrow(), ["filter"]);
        assert_eq!(scheduler.pending(LABEL_FOCUS).unwrap(), 0);
    }

    #[test]
    fn test_clear_discards_pending_tasks() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();
        let l = log.clone();
        scheduler.enqueue(LABEL_FILTER, move |_| {
            push(&l, "filter");
            Ok(())
        }).unwrap();
        scheduler.clear(LABEL_FILTER).unwrap();
        assert_eq!(scheduler.run(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_enqueue_for_each_captures_items_by_value() {
        let mut scheduler = Scheduler::with_standard_labels();
        let log = trace();
        let l = log.clone();
        scheduler
            .enqueue_for_each(LABEL_INIT, vec!["a", "b", "c"], move |_, item| {
                push(&l, item);
                Ok(())
            })
            .unwrap();
        assert_eq!(scheduler.pending(LABEL_INIT).unwrap(), 3);
        scheduler.run();
        assert_eq!(*log.borrow(), ["a", "b", "c"]);
    }

    #[test]
    fn test_run_on_empty_scheduler_is_a_noop() {
        let mut scheduler = Scheduler::with_standard_labels();
        assert_eq!(scheduler.run(), 0);
    }
}
