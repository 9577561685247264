//! Counter animation for the statistics section.
//!
//! Each counter climbs toward its `data-count` target in steps of
//! `target / 200`, rounded up. The animation starts the first time the
//! section is at least half visible and never runs again.

use tracing::warn;

/// Number of steps a counter takes from zero to its target.
pub const COUNTER_SPEED: f64 = 200.0;
/// Fraction of the section that must be visible to start counting.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Successive displayed values from `current` up to `target`.
///
/// Values strictly increase and the last one is exactly `target`. A counter
/// already past its target snaps back to it in a single step.
#[derive(Debug, Clone)]
pub struct CounterTween {
    current: u64,
    target: u64,
    step: f64,
    done: bool,
}

impl CounterTween {
    pub fn new(current: u64, target: u64) -> Self {
        Self {
            current,
            target,
            step: target as f64 / COUNTER_SPEED,
            done: current == target,
        }
    }
}

impl Iterator for CounterTween {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        if self.current > self.target {
            self.current = self.target;
            self.done = true;
            return Some(self.target);
        }

        let raw = (self.current as f64 + self.step).ceil() as u64;
        let next = raw.clamp(self.current + 1, self.target);
        self.current = next;
        self.done = next == self.target;
        Some(next)
    }
}

/// A `.counter h2` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub element: Option<usize>,
    pub displayed: u64,
    pub target: u64,
}

impl Counter {
    /// Build from the element's text and `data-count` attribute.
    /// Counters with a non-numeric target are skipped.
    pub fn from_markup(text: &str, data_count: &str) -> Option<Self> {
        let Ok(target) = data_count.trim().parse::<u64>() else {
            warn!(data_count, "counter target is not a whole number; skipping");
            return None;
        };
        let displayed = text.trim().parse::<u64>().unwrap_or(0);
        Some(Self {
            element: None,
            displayed,
            target,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CounterSection {
    pub counters: Vec<Counter>,
    fired: bool,
}

impl CounterSection {
    pub fn new(counters: Vec<Counter>) -> Self {
        Self { counters, fired: false }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Intersection update. Animates on the first qualifying call only and
    /// returns the number of frames it took.
    pub fn on_intersect(&mut self, visible_ratio: f64) -> Option<usize> {
        if self.fired || visible_ratio < VISIBILITY_THRESHOLD {
            return None;
        }
        self.fired = true;
        Some(self.animate())
    }

    /// Advance every counter one value per frame until all reach their targets.
    fn animate(&mut self) -> usize {
        let mut tweens: Vec<CounterTween> = self
            .counters
            .iter()
            .map(|c| CounterTween::new(c.displayed, c.target))
            .collect();

        let mut frames = 0;
        loop {
            let mut advanced = false;
            for (counter, tween) in self.counters.iter_mut().zip(tweens.iter_mut()) {
                if let Some(value) = tween.next() {
                    counter.displayed = value;
                    advanced = true;
                }
            }
            if !advanced {
                break;
            }
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_to_one_hundred_is_strict_and_exact() {
        let values: Vec<u64> = CounterTween::new(0, 100).collect();
        assert_eq!(values.len(), 100);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(values.last(), Some(&100));
    }

    #[test]
    fn tween_never_overshoots_awkward_targets() {
        for target in [1u64, 7, 199, 201, 1001, 12_345] {
            let values: Vec<u64> = CounterTween::new(0, target).collect();
            assert_eq!(values.last(), Some(&target));
            assert!(values.iter().all(|v| *v <= target));
            assert!(values.len() <= 201, "target {target} took {} steps", values.len());
        }
    }

    #[test]
    fn tween_edge_starts() {
        assert_eq!(CounterTween::new(0, 0).count(), 0);
        assert_eq!(CounterTween::new(500, 100).collect::<Vec<_>>(), vec![100]);
    }

    #[test]
    fn section_fires_once_at_half_visibility() {
        let counters = vec![
            Counter::from_markup("0", "100").unwrap(),
            Counter::from_markup("", "2500").unwrap(),
        ];
        let mut section = CounterSection::new(counters);

        assert_eq!(section.on_intersect(0.49), None);
        assert!(!section.has_fired());

        let frames = section.on_intersect(0.5).unwrap();
        assert!(frames >= 100);
        assert_eq!(section.counters[0].displayed, 100);
        assert_eq!(section.counters[1].displayed, 2500);

        section.counters[0].displayed = 0;
        assert_eq!(section.on_intersect(1.0), None);
        assert_eq!(section.counters[0].displayed, 0);
    }

    #[test]
    fn non_numeric_targets_are_skipped() {
        assert_eq!(Counter::from_markup("0", "many"), None);
    }
}
