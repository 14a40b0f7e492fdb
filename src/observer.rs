//! Step observer trait for monitoring simulation progress.

/// Trait for observing fixed-step simulation progress.
///
/// Implement this to monitor the solver (debug overlays, profiling, stall
/// diagnostics). All methods have default no-op implementations. An observer
/// is injected at world construction; there is no process-wide debug state.
pub trait StepObserver {
    /// Called after all particles have been integrated in a sub-step.
    fn on_integrate(&mut self) {}

    /// Called after each constraint relaxation round.
    fn on_constraint_iteration(&mut self, _iteration: u32) {}

    /// Called after the collision pass that follows each relaxation round.
    fn on_collision_pass(&mut self, _iteration: u32) {}

    /// Called when one fixed sub-step is fully complete.
    fn on_sub_step_complete(&mut self) {}

    /// Called when a `step()` call returns, with the number of sub-steps run.
    fn on_step_complete(&mut self, _sub_steps: u32) {}

    /// Called when pending sub-steps beyond the per-call cap are discarded.
    fn on_time_dropped(&mut self, _dropped_sub_steps: u32) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
