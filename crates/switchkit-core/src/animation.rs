use crossbeam_channel::Sender;
use keyframe::{AnimationSequence, EasingFunction, Keyframe};
use serde::{Deserialize, Serialize};
use skia_safe::Path;
use std::fmt;
use tracing::{debug, warn};

/// Supported easing functions for animations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    /// Evaluates the easing curve at a specific point `x` (0.0 to 1.0).
    pub fn eval(&self, x: f32) -> f32 {
        self.y(x as f64) as f32
    }
}

/// A generic animated value that tracks keyframes and current state.
#[derive(Clone)]
pub struct Animated<T>
where
    T: Clone + keyframe::CanTween + Default,
{
    /// Raw storage of keyframes (value, absolute_time, easing).
    pub raw_keyframes: Vec<(T, f64, EasingType)>,
    /// The underlying keyframe sequence used for interpolation.
    pub sequence: AnimationSequence<T>,
    /// The current calculated value for the last updated time.
    pub current_value: T,
}

impl<T> Animated<T>
where
    T: Clone + keyframe::CanTween + Default,
{
    /// Creates a new animated value with an initial state and no motion.
    pub fn new(initial: T) -> Self {
        let raw = vec![(initial.clone(), 0.0, EasingType::Linear)];
        let kf = Keyframe::new(initial.clone(), 0.0, EasingType::Linear);

        Self {
            sequence: AnimationSequence::from(vec![kf]),
            raw_keyframes: raw,
            current_value: initial,
        }
    }

    /// Appends a new keyframe to the end of the current sequence.
    ///
    /// # Arguments
    /// * `target` - The value to reach.
    /// * `duration` - Time in seconds to reach the target from the previous keyframe.
    /// * `easing` - The easing curve to use.
    pub fn add_keyframe(&mut self, target: T, duration: f64, easing: EasingType) {
        let current_end_time = self.sequence.duration();
        let new_time = current_end_time + duration;

        self.raw_keyframes.push((target, new_time, easing));

        let frames: Vec<Keyframe<T>> = self
            .raw_keyframes
            .iter()
            .map(|(val, time, ease_type)| Keyframe::new(val.clone(), *time, *ease_type))
            .collect();

        self.sequence = AnimationSequence::from(frames);
    }

    /// Returns the total duration of the animation sequence in seconds.
    pub fn duration(&self) -> f64 {
        self.sequence.duration()
    }

    /// Updates `current_value` based on the provided absolute time.
    pub fn update(&mut self, time: f64) {
        self.sequence.advance_to(time);
        self.current_value = self.sequence.now();
    }
}

impl<T> fmt::Debug for Animated<T>
where
    T: Clone + keyframe::CanTween + Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animated")
            .field("current_value", &self.current_value)
            .finish()
    }
}

/// Signals delivered by an animation to whoever owns the animated layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The animation for `key` reached its end. Sent exactly once.
    Finished { key: &'static str },
}

/// A one-shot transition between two shape paths.
///
/// The animation is time-driven: callers feed it absolute timeline seconds through
/// [`PathAnimation::advance`]. Once the elapsed time reaches the duration, it parks on
/// the target path and sends [`AnimationEvent::Finished`] on its completion channel.
/// There is no pause, reverse or restart: a time earlier than the last one seen is ignored.
pub struct PathAnimation {
    key: &'static str,
    from: Path,
    to: Path,
    interpolatable: bool,
    progress: Animated<f32>,
    start_time: f64,
    duration: f64,
    current: Path,
    last_time: Option<f64>,
    completion: Option<Sender<AnimationEvent>>,
}

impl PathAnimation {
    /// Creates an animation that starts at `start_time` and runs for `duration` seconds.
    pub fn new(
        key: &'static str,
        from: Path,
        to: Path,
        start_time: f64,
        duration: f64,
        easing: EasingType,
        completion: Sender<AnimationEvent>,
    ) -> Self {
        let interpolatable = to.is_interpolatable(&from);
        if !interpolatable {
            warn!(key, "paths are not interpolatable, animation will snap at the end");
        }

        let mut progress = Animated::new(0.0f32);
        progress.add_keyframe(1.0, duration.max(0.0), easing);

        Self {
            key,
            current: from.clone(),
            from,
            to,
            interpolatable,
            progress,
            start_time,
            duration: duration.max(0.0),
            last_time: None,
            completion: Some(completion),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// True once the completion signal has been sent.
    pub fn is_finished(&self) -> bool {
        self.completion.is_none()
    }

    /// Eased progress (0.0 to 1.0) as of the last `advance`.
    pub fn progress(&self) -> f32 {
        self.progress.current_value
    }

    /// The path as of the last `advance`.
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    /// Moves the animation to absolute time `time` and returns the interpolated path.
    pub fn advance(&mut self, time: f64) -> &Path {
        if self.is_finished() || self.last_time.is_some_and(|last| time < last) {
            return &self.current;
        }
        self.last_time = Some(time);

        let elapsed = time - self.start_time;
        if elapsed >= self.duration {
            self.progress.current_value = 1.0;
            self.current = self.to.clone();
            if let Some(tx) = self.completion.take() {
                debug!(key = self.key, time, "path animation finished");
                // The receiver may already be gone; the path still parks on the target.
                let _ = tx.send(AnimationEvent::Finished { key: self.key });
            }
            return &self.current;
        }

        self.progress.update(elapsed.max(0.0));
        let t = self.progress.current_value.clamp(0.0, 1.0);

        self.current = if self.interpolatable {
            // Skia weights `self` by `t` and `ending` by `1 - t`.
            self.to
                .interpolate(&self.from, t)
                .unwrap_or_else(|| self.from.clone())
        } else {
            self.from.clone()
        };
        &self.current
    }
}

impl fmt::Debug for PathAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathAnimation")
            .field("key", &self.key)
            .field("duration", &self.duration)
            .field("progress", &self.progress.current_value)
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use skia_safe::Rect;

    fn oval(x: f32) -> Path {
        let mut path = Path::new();
        path.add_oval(Rect::from_xywh(x, 10.0, 20.0, 20.0), None);
        path
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
        ] {
            assert!(easing.eval(0.0).abs() < 0.001);
            assert!((easing.eval(1.0) - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_animated_linear_midpoint() {
        let mut value = Animated::new(0.0f32);
        value.add_keyframe(10.0, 2.0, EasingType::Linear);
        value.update(1.0);
        assert!((value.current_value - 5.0).abs() < 0.01);
        assert!((value.duration() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_path_animation_interpolates_bounds() {
        let (tx, _rx) = unbounded();
        let mut anim = PathAnimation::new("path", oval(0.0), oval(100.0), 0.0, 4.0, EasingType::Linear, tx);

        let mid = anim.advance(2.0).bounds().left;
        assert!((mid - 50.0).abs() < 0.5, "midpoint left edge was {}", mid);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_completion_sent_once() {
        let (tx, rx) = unbounded();
        let mut anim = PathAnimation::new("path", oval(0.0), oval(100.0), 0.0, 5.0, EasingType::Linear, tx);

        anim.advance(4.99);
        assert!(rx.try_recv().is_err());

        anim.advance(5.0);
        assert_eq!(rx.try_recv(), Ok(AnimationEvent::Finished { key: "path" }));

        anim.advance(6.0);
        anim.advance(50.0);
        assert!(rx.try_recv().is_err());
        assert_eq!(anim.current_path(), &oval(100.0));
    }

    #[test]
    fn test_non_interpolatable_snaps_at_end() {
        let (tx, _rx) = unbounded();
        let mut rect = Path::new();
        rect.add_rect(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), None);
        let mut anim = PathAnimation::new("path", rect.clone(), oval(40.0), 0.0, 1.0, EasingType::Linear, tx);

        assert_eq!(anim.advance(0.5), &rect);
        assert_eq!(anim.advance(1.0), &oval(40.0));
    }

    #[test]
    fn test_earlier_time_does_not_rewind() {
        let (tx, _rx) = unbounded();
        let mut anim = PathAnimation::new("path", oval(0.0), oval(100.0), 0.0, 5.0, EasingType::Linear, tx);

        let forward = anim.advance(4.0).clone();
        let progress = anim.progress();
        assert_eq!(anim.advance(1.0), &forward);
        assert_eq!(anim.progress(), progress);
        assert!(anim.advance(4.5).bounds().left > forward.bounds().left);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let (tx, rx) = unbounded();
        let mut anim = PathAnimation::new("path", oval(0.0), oval(10.0), 0.0, 0.0, EasingType::Linear, tx);
        anim.advance(0.0);
        assert!(anim.is_finished());
        assert!(rx.try_recv().is_ok());
    }
}
