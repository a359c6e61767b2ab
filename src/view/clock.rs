use chrono::{ DateTime, Local, TimeZone };
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const TICK_INTERVAL: Duration = Duration::from_secs(60);
const CLOCK_FORMAT: &str = "%H:%M";

pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
    where Tz::Offset: std::fmt::Display
{
    time.format(CLOCK_FORMAT).to_string()
}

pub fn current_time() -> String {
    format_clock(&Local::now())
}

/// Periodic clock refresh. The background task lives exactly as long as this handle.
pub struct ClockTicker {
    handle: JoinHandle<()>,
}

impl ClockTicker {
    pub fn start(period: Duration, tx: mpsc::Sender<String>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately; the view already shows the time.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(current_time()).await.is_err() {
                    debug!("Clock receiver dropped, stopping ticker");
                    break;
                }
            }
        });
        Self { handle }
    }

}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
