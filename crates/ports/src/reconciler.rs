use super::errors::PortError;
use super::models::{Operator, PortReconciler, ProcessTable, ReconcileState};
use filedock_events::{AppEvent, EventBus};
use filedock_models::PortConflict;
use std::sync::Arc;
use std::time::Duration;

type Result<T> = std::result::Result<T, PortError>;

impl<P: ProcessTable, O: Operator> PortReconciler<P, O> {
    pub fn new(processes: P, operator: O, events: Arc<EventBus>, release_delay: Duration) -> Self {
        Self {
            processes,
            operator,
            events,
            release_delay,
        }
    }

    /// Clears `port` for binding. Returns `Ok` when the port was free or its
    /// owner was killed; the caller must not bind on `Err`.
    pub async fn reconcile(&self, port: u16) -> Result<()> {
        let mut state = ReconcileState::Idle;
        loop {
            state = match self.step(port, state).await {
                ReconcileState::Resolved => return Ok(()),
                ReconcileState::Failed(err) => return Err(err),
                next => next,
            };
        }
    }

    /// Advances the state machine by one transition.
    pub async fn step(&self, port: u16, state: ReconcileState) -> ReconcileState {
        match state {
            ReconcileState::Idle => match self.processes.listeners(port).await {
                Ok(pids) if pids.is_empty() => ReconcileState::Resolved,
                Ok(pids) => {
                    let conflict = PortConflict { port, pids };
                    self.events.emit(AppEvent::PortConflict {
                        port,
                        pids: conflict.pid_list(),
                    });
                    ReconcileState::PromptedForKill(conflict)
                }
                Err(err) => {
                    // An unknown owner cannot be killed; let the bind decide.
                    tracing::debug!("Port owner lookup failed for {}: {}", port, err);
                    ReconcileState::Resolved
                }
            },
            ReconcileState::PromptedForKill(conflict) => {
                match self.operator.confirm_kill(&conflict).await {
                    Ok(true) => ReconcileState::Confirmed(conflict),
                    Ok(false) => ReconcileState::Declined(conflict),
                    Err(err) => ReconcileState::Failed(err),
                }
            }
            ReconcileState::Confirmed(conflict) => {
                self.events.emit(AppEvent::ProcessKilling {
                    pids: conflict.pid_list(),
                });

                for pid in &conflict.pids {
                    if let Err(err) = self.processes.kill(*pid).await {
                        self.events.emit(AppEvent::ProcessKillFailed {
                            error: err.to_string(),
                        });
                        return ReconcileState::Failed(match err {
                            err @ PortError::KillFailed { .. } => err,
                            other => PortError::KillFailed {
                                pid: *pid,
                                reason: other.to_string(),
                            },
                        });
                    }
                }

                self.events.emit(AppEvent::ProcessKilled);
                tokio::time::sleep(self.release_delay).await;
                ReconcileState::Resolved
            }
            ReconcileState::Declined(conflict) => {
                self.events.emit(AppEvent::StartupCancelled);
                ReconcileState::Failed(PortError::UserDeclined {
                    port: conflict.port,
                    pids: conflict.pid_list(),
                })
            }
            terminal @ (ReconcileState::Resolved | ReconcileState::Failed(_)) => terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeProcesses {
        listeners: Vec<u32>,
        fail_kill: bool,
        killed: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl ProcessTable for FakeProcesses {
        async fn listeners(&self, _port: u16) -> Result<Vec<u32>> {
            Ok(self.listeners.clone())
        }

        async fn kill(&self, pid: u32) -> Result<()> {
            if self.fail_kill {
                return Err(PortError::KillFailed {
                    pid,
                    reason: "Operation not permitted".to_string(),
                });
            }
            self.killed.lock().unwrap().push(pid);
            Ok(())
        }
    }

    struct ScriptedOperator {
        answer: &'static str,
        prompts: AtomicUsize,
    }

    #[async_trait]
    impl Operator for ScriptedOperator {
        async fn confirm_kill(&self, _conflict: &PortConflict) -> Result<bool> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            Ok(crate::is_affirmative(self.answer))
        }
    }

    fn reconciler(
        listeners: Vec<u32>,
        fail_kill: bool,
        answer: &'static str,
    ) -> PortReconciler<FakeProcesses, ScriptedOperator> {
        let processes = FakeProcesses {
            listeners,
            fail_kill,
            ..Default::default()
        };
        let operator = ScriptedOperator {
            answer,
            prompts: AtomicUsize::new(0),
        };
        PortReconciler::new(processes, operator, EventBus::new(true), Duration::ZERO)
    }

    fn prompts(reconciler: &PortReconciler<FakeProcesses, ScriptedOperator>) -> usize {
        reconciler.operator.prompts.load(Ordering::SeqCst)
    }

    fn killed(reconciler: &PortReconciler<FakeProcesses, ScriptedOperator>) -> Vec<u32> {
        reconciler.processes.killed.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_free_port_never_prompts() {
        let reconciler = reconciler(vec![], false, "y");

        reconciler.reconcile(8080).await.unwrap();

        assert_eq!(prompts(&reconciler), 0);
        assert!(killed(&reconciler).is_empty());
    }

    #[tokio::test]
    async fn test_declined_conflict() {
        let reconciler = reconciler(vec![4242], false, "n");

        let err = reconciler.reconcile(8080).await.unwrap_err();

        assert!(matches!(err, PortError::UserDeclined { port: 8080, .. }));
        assert_eq!(prompts(&reconciler), 1);
        assert!(killed(&reconciler).is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_conflict_kills_every_listener() {
        let reconciler = reconciler(vec![4242, 4243], false, "YES");

        reconciler.reconcile(8080).await.unwrap();

        assert_eq!(killed(&reconciler), vec![4242, 4243]);
    }

    #[tokio::test]
    async fn test_kill_failure() {
        let reconciler = reconciler(vec![4242], true, "y");

        let err = reconciler.reconcile(8080).await.unwrap_err();

        assert!(matches!(err, PortError::KillFailed { pid: 4242, .. }));
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let reconciler = reconciler(vec![7], false, "");

        let state = reconciler.step(9000, ReconcileState::Idle).await;
        assert!(matches!(state, ReconcileState::PromptedForKill(ref c) if c.pids == vec![7]));

        let state = reconciler.step(9000, state).await;
        assert!(matches!(state, ReconcileState::Declined(_)));

        let state = reconciler.step(9000, state).await;
        assert!(matches!(state, ReconcileState::Failed(PortError::UserDeclined { .. })));
    }
}
