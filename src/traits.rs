use crate::domain::simulator::event::SimulationEvent;
use crate::error::Result;

/// Consumer of simulation events (console report, CSV export, test recorder, ...).
pub trait EventSink {
    fn on_event(&mut self, event: &SimulationEvent) -> Result<()>;
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<SimulationEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, event: &SimulationEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: &SimulationEvent) -> Result<()> {
        (**self).on_event(event)
    }
}

/// Forwards each event to every inner sink, in order.
#[derive(Default)]
pub struct FanOutSink<'a> {
    sinks: Vec<Box<dyn EventSink + 'a>>,
}

impl<'a> FanOutSink<'a> {
    pub fn new() -> Self {
        FanOutSink { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: impl EventSink + 'a) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl EventSink for FanOutSink<'_> {
    fn on_event(&mut self, event: &SimulationEvent) -> Result<()> {
        for sink in &mut self.sinks {
            sink.on_event(event)?;
        }
        Ok(())
    }
}
