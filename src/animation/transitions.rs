use crate::core::{color::Color, shape::PathHandle};
use crate::prelude::HashMap;
use std::time::Duration;

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Running,
    Completed,
    Cancelled,
}

/// Linear fill color animation for one path
#[derive(Debug, Clone)]
pub struct FillTransition {
    pub from: Color,
    pub to: Color,
    pub duration: Duration,
    pub state: TransitionState,
    elapsed: Duration,
    current: Color,
}

impl FillTransition {
    pub fn new(from: Color, to: Color, duration: Duration) -> Self {
        let mut transition = Self {
            from,
            to,
            duration,
            state: TransitionState::Running,
            elapsed: Duration::ZERO,
            current: from,
        };
        if duration.is_zero() {
            transition.complete();
        }
        transition
    }

    /// Advance by `delta` and return the color to show
    pub fn update(&mut self, delta: Duration) -> Color {
        if self.state != TransitionState::Running {
            return self.current;
        }

        // hosts may hand over arbitrarily long frame gaps
        self.elapsed = self.elapsed.saturating_add(delta);
        let progress = self.progress();
        self.current = self.from.lerp(self.to, progress);

        if progress >= 1.0 {
            self.complete();
        }
        self.current
    }

    /// Jump a running transition straight to its target
    pub fn finish(&mut self) -> Color {
        if self.state == TransitionState::Running {
            self.complete();
        }
        self.current
    }

    fn complete(&mut self) {
        self.state = TransitionState::Completed;
        self.elapsed = self.duration;
        self.current = self.to;
    }

    pub fn stop(&mut self) {
        self.state = TransitionState::Cancelled;
    }

    /// Color currently shown
    pub fn current(&self) -> Color {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }
}

/// Running fill transitions, at most one per path
#[derive(Debug, Default)]
pub struct TransitionManager {
    active: HashMap<PathHandle, FillTransition>,
}

impl TransitionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transition, replacing whatever was running on that path.
    /// The replacement starts from `from`, which callers pass as the color
    /// currently on screen.
    pub fn start(&mut self, handle: PathHandle, transition: FillTransition) {
        if let Some(mut previous) = self.active.remove(&handle) {
            previous.stop();
            log::trace!("redirecting fill transition on {:?}", handle);
        }
        if !transition.is_finished() {
            self.active.insert(handle, transition);
        }
    }

    /// Drop a path's transition without applying its target
    pub fn cancel(&mut self, handle: PathHandle) -> Option<FillTransition> {
        self.active.remove(&handle).map(|mut transition| {
            transition.stop();
            transition
        })
    }

    /// Advance every transition and return the colors that changed.
    /// Finished transitions are removed after reporting their final color.
    pub fn update(&mut self, delta: Duration) -> Vec<(PathHandle, Color)> {
        let mut frame: Vec<(PathHandle, Color)> = self
            .active
            .iter_mut()
            .map(|(handle, transition)| (*handle, transition.update(delta)))
            .collect();
        self.active.retain(|_, transition| !transition.is_finished());
        frame.sort_by_key(|(handle, _)| *handle);
        frame
    }

    /// Complete every transition at once and return the final colors
    pub fn finish_all(&mut self) -> Vec<(PathHandle, Color)> {
        let mut frame: Vec<(PathHandle, Color)> = self
            .active
            .drain()
            .map(|(handle, mut transition)| (handle, transition.finish()))
            .collect();
        frame.sort_by_key(|(handle, _)| *handle);
        frame
    }

    pub fn get(&self, handle: PathHandle) -> Option<&FillTransition> {
        self.active.get(&handle)
    }

    pub fn is_active(&self, handle: PathHandle) -> bool {
        self.active.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color::BLACK;
    const WHITE: Color = Color::WHITE;

    #[test]
    fn test_transition_progresses_linearly() {
        let mut transition = FillTransition::new(BLACK, WHITE, Duration::from_millis(800));
        assert_eq!(transition.current(), BLACK);

        let color = transition.update(Duration::from_millis(400));
        assert_eq!(color, Color::rgb(128, 128, 128));
        assert!(!transition.is_finished());

        let color = transition.update(Duration::from_millis(500));
        assert_eq!(color, WHITE);
        assert_eq!(transition.state, TransitionState::Completed);
        assert_eq!(transition.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let transition = FillTransition::new(BLACK, WHITE, Duration::ZERO);
        assert!(transition.is_finished());
        assert_eq!(transition.current(), WHITE);
    }

    #[test]
    fn test_manager_last_writer_wins() {
        let mut manager = TransitionManager::new();
        let handle = PathHandle(0);

        manager.start(handle, FillTransition::new(BLACK, WHITE, Duration::from_millis(100)));
        manager.update(Duration::from_millis(50));
        let midway = manager.get(handle).unwrap().current();

        let red = Color::rgb(255, 0, 0);
        manager.start(handle, FillTransition::new(midway, red, Duration::from_millis(100)));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(handle).unwrap().to, red);

        let frame = manager.update(Duration::from_millis(100));
        assert_eq!(frame, vec![(handle, red)]);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_manager_skips_finished_transitions() {
        let mut manager = TransitionManager::new();
        manager.start(PathHandle(1), FillTransition::new(BLACK, WHITE, Duration::ZERO));
        assert!(!manager.is_active(PathHandle(1)));
    }

    #[test]
    fn test_huge_frame_delta_completes() {
        let mut transition = FillTransition::new(BLACK, WHITE, Duration::from_millis(800));
        transition.update(Duration::from_millis(1));
        assert_eq!(transition.update(Duration::MAX), WHITE);
        assert_eq!(transition.state, TransitionState::Completed);
    }

    #[test]
    fn test_finish_all_jumps_to_targets() {
        let mut manager = TransitionManager::new();
        let forever = Duration::from_millis(u64::MAX);
        manager.start(PathHandle(1), FillTransition::new(BLACK, WHITE, forever));
        manager.start(PathHandle(0), FillTransition::new(WHITE, BLACK, forever));

        let frame = manager.finish_all();
        assert_eq!(frame, vec![(PathHandle(0), BLACK), (PathHandle(1), WHITE)]);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut manager = TransitionManager::new();
        manager.start(PathHandle(2), FillTransition::new(BLACK, WHITE, Duration::from_secs(1)));
        let cancelled = manager.cancel(PathHandle(2)).unwrap();
        assert_eq!(cancelled.state, TransitionState::Cancelled);
        assert!(manager.update(Duration::from_secs(1)).is_empty());
    }
}
