//! Debounced viewport resize fan-out to registered charts.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::debounce::{debounce, Debounced};
use crate::traits::{Resizable, Viewport};

/// Charts that recompute their layout after the viewport settles, by name
#[derive(Default)]
pub struct ChartRegistry {
    charts: BTreeMap<String, Box<dyn Resizable>>,
}

impl std::fmt::Debug for ChartRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartRegistry")
            .field("charts", &self.charts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a chart, returning any chart previously under `name`
    pub fn register(&mut self, name: impl Into<String>, chart: Box<dyn Resizable>) -> Option<Box<dyn Resizable>> {
        self.charts.insert(name.into(), chart)
    }

    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Resizable>> {
        self.charts.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.charts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Resizes every registered chart and returns how many were notified
    pub fn resize_all(&mut self, viewport: Viewport) -> usize {
        for chart in self.charts.values_mut() {
            chart.resize(viewport);
        }
        self.charts.len()
    }
}

/// Collapses bursts of resize events into one fan-out per quiet period.
///
/// Owns the chart registry; the debounced fan-out is the only code that
/// resizes charts.
pub struct ResizeDispatcher {
    charts: Rc<RefCell<ChartRegistry>>,
    last_applied: Rc<Cell<Option<Viewport>>>,
    fan_out: Debounced<Viewport>,
}

impl std::fmt::Debug for ResizeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeDispatcher")
            .field("charts", &self.charts.borrow())
            .field("last_applied", &self.last_applied.get())
            .field("fan_out", &self.fan_out)
            .finish()
    }
}

impl Default for ResizeDispatcher {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl ResizeDispatcher {
    pub fn new(wait: Duration) -> Self {
        let charts = Rc::new(RefCell::new(ChartRegistry::new()));
        let last_applied = Rc::new(Cell::new(None));

        let registry = Rc::clone(&charts);
        let applied = Rc::clone(&last_applied);
        let fan_out = debounce(
            move |viewport: Viewport| {
                applied.set(Some(viewport));
                let notified = registry.borrow_mut().resize_all(viewport);
                debug!(width = viewport.width, height = viewport.height, notified, "resize dispatched");
            },
            wait,
        );

        Self {
            charts,
            last_applied,
            fan_out,
        }
    }

    /// Registers a chart, returning any chart previously under `name`
    pub fn register(&mut self, name: impl Into<String>, chart: Box<dyn Resizable>) -> Option<Box<dyn Resizable>> {
        self.charts.borrow_mut().register(name, chart)
    }

    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Resizable>> {
        self.charts.borrow_mut().unregister(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.charts.borrow().contains(name)
    }

    pub fn chart_count(&self) -> usize {
        self.charts.borrow().len()
    }

    /// Records a viewport change; restarts the quiet period
    pub fn on_resize(&mut self, now: Duration, viewport: Viewport) {
        self.fan_out.call(now, viewport);
    }

    /// Fans the latest viewport out to every chart once the quiet period
    /// has elapsed. Returns the number of charts notified.
    pub fn tick(&mut self, now: Duration) -> usize {
        if self.fan_out.poll(now) {
            self.charts.borrow().len()
        } else {
            0
        }
    }

    /// Viewport of the most recent fan-out
    pub fn last_applied(&self) -> Option<Viewport> {
        self.last_applied.get()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.fan_out.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingChart(Rc<RefCell<Vec<Viewport>>>);

    impl Resizable for RecordingChart {
        fn resize(&mut self, viewport: Viewport) {
            self.0.borrow_mut().push(viewport);
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fan_out_after_events_settle() {
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = ResizeDispatcher::default();
        dispatcher.register("price", Box::new(RecordingChart(Rc::clone(&seen_a))));
        dispatcher.register("volume", Box::new(RecordingChart(Rc::clone(&seen_b))));

        dispatcher.on_resize(ms(0), Viewport::new(800.0, 600.0));
        dispatcher.on_resize(ms(100), Viewport::new(1024.0, 768.0));
        assert_eq!(dispatcher.next_deadline(), Some(ms(350)));
        assert_eq!(dispatcher.tick(ms(300)), 0);
        assert_eq!(dispatcher.tick(ms(350)), 2);
        assert_eq!(dispatcher.tick(ms(1000)), 0);

        assert_eq!(*seen_a.borrow(), vec![Viewport::new(1024.0, 768.0)]);
        assert_eq!(*seen_b.borrow(), vec![Viewport::new(1024.0, 768.0)]);
        assert_eq!(dispatcher.last_applied(), Some(Viewport::new(1024.0, 768.0)));
    }

    #[test]
    fn test_charts_registered_after_resize_get_next_fan_out() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = ResizeDispatcher::new(ms(100));
        dispatcher.on_resize(ms(0), Viewport::new(640.0, 480.0));
        assert_eq!(dispatcher.tick(ms(100)), 0);
        assert_eq!(dispatcher.last_applied(), Some(Viewport::new(640.0, 480.0)));

        assert!(dispatcher.register("price", Box::new(RecordingChart(Rc::clone(&seen)))).is_none());
        assert!(dispatcher.contains("price"));
        dispatcher.on_resize(ms(500), Viewport::new(320.0, 480.0));
        assert_eq!(dispatcher.tick(ms(600)), 1);
        assert_eq!(*seen.borrow(), vec![Viewport::new(320.0, 480.0)]);

        assert!(dispatcher.unregister("price").is_some());
        assert_eq!(dispatcher.chart_count(), 0);
    }

    #[test]
    fn test_registry_replace_and_unregister() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ChartRegistry::new();
        assert!(registry.register("price", Box::new(RecordingChart(Rc::clone(&seen)))).is_none());
        assert!(registry.register("price", Box::new(RecordingChart(Rc::clone(&seen)))).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister("price").is_some());
        assert!(registry.is_empty());
        assert_eq!(registry.resize_all(Viewport::default()), 0);
    }
}
