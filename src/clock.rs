use chrono::{DateTime, Local};

pub trait Clock {
    fn now(&mut self) -> DateTime<Local>;
}

pub struct StdClock;

impl Clock for StdClock {
    fn now(&mut self) -> DateTime<Local> {
        Local::now()
    }
}
