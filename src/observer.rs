//! Trace points for monitoring integrations.
//!
//! Observers see what happened but cannot change it: every hook returns `()`
//! and is called after the corresponding decision has been made.

use std::sync::Arc;

use crate::graph::Topology;

/// A single trace point emitted by the provisioner, graphs or tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    ProvisionStarted {
        model: String,
    },
    ProvisionFinished {
        model: String,
        attempts: usize,
        ok: bool,
    },
    GraphStarted {
        topology: Topology,
        thread_id: Option<String>,
    },
    GraphFinished {
        topology: Topology,
        ok: bool,
    },
    ToolInvoked {
        name: String,
        ok: bool,
    },
}

pub trait Observer: Send + Sync {
    fn on_event(&self, event: &TraceEvent);
}

pub type SharedObserver = Arc<dyn Observer>;

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&self, _event: &TraceEvent) {}
}

/// Observer that forwards events to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_event(&self, event: &TraceEvent) {
        match event {
            TraceEvent::ProvisionStarted { model } => {
                log::debug!("trace: provisioning model {model}")
            }
            TraceEvent::ProvisionFinished {
                model,
                attempts,
                ok,
            } => log::debug!("trace: provisioned {model} ok={ok} attempts={attempts}"),
            TraceEvent::GraphStarted {
                topology,
                thread_id,
            } => log::debug!("trace: graph {topology:?} started thread={thread_id:?}"),
            TraceEvent::GraphFinished { topology, ok } => {
                log::debug!("trace: graph {topology:?} finished ok={ok}")
            }
            TraceEvent::ToolInvoked { name, ok } => {
                log::debug!("trace: tool {name} invoked ok={ok}")
            }
        }
    }
}

pub fn noop() -> SharedObserver {
    Arc::new(NoopObserver)
}
