use bevy_ecs::prelude::Resource;

/// Simulation time, advanced once per frame before the tick pass.
#[derive(Resource, Clone, Copy)]
pub struct WorldClock {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldClock {
    fn default() -> Self {
        WorldClock {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldClock {
    /// Advance the clock by one frame of `raw_delta` wall seconds, applying
    /// the time scale.
    pub fn advance(&mut self, raw_delta: f32) {
        self.delta = raw_delta * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_applies_time_scale() {
        let mut clock = WorldClock {
            time_scale: 0.5,
            ..WorldClock::default()
        };
        clock.advance(0.2);
        clock.advance(0.2);
        assert!((clock.delta - 0.1).abs() < 1e-6);
        assert!((clock.elapsed - 0.2).abs() < 1e-6);
        assert_eq!(clock.frame_count, 2);
    }
}
