//! Simulation clock.
//!
//! [`WorldTime`] is owned by the [`World`](crate::world::World) and advanced
//! once per step. `time_scale` stretches or compresses every step uniformly,
//! so bodies' sleep timers run in scaled time as well.

#[derive(Debug, Clone, Copy)]
pub struct WorldTime {
    /// Scaled seconds since the world was created.
    pub elapsed: f32,
    /// Scaled length of the last step.
    pub delta: f32,
    pub time_scale: f32,
    /// Number of completed steps.
    pub step_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            step_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Advance by an unscaled `dt`, applying `time_scale`.
    pub fn advance(&mut self, dt: f32) {
        let scaled_dt = dt * self.time_scale;
        self.elapsed += scaled_dt;
        self.delta = scaled_dt;
        self.step_count += 1;
    }
}
