use crate::clock::SystemClock;
use crate::controller::CalendarController;
use crate::source::Source;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<CalendarController>>,
    pub source: Arc<Source>,
    pub clock: SystemClock,
}

impl AppState {
    pub fn new(controller: CalendarController, source: Source, clock: SystemClock) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            source: Arc::new(source),
            clock,
        }
    }
}
