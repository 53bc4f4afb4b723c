use std::io::Write;
use anyhow::Result;
use crate::reminders::scheduler::Notification;

/// Delivery channel for fired reminders
pub trait Notifier {
    fn notify(&mut self, notification: &Notification) -> Result<()>;
}

/// Writes reminders to a terminal stream, ringing the bell when asked
pub struct ConsoleNotifier<W: Write> {
    out: W,
    bell: bool,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W, bell: bool) -> Self {
        Self { out, bell }
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, notification: &Notification) -> Result<()> {
        if self.bell {
            write!(self.out, "\x07")?;
        }
        writeln!(
            self.out,
            "[{}] {}",
            notification.fire_at.format("%Y-%m-%d %H:%M"),
            notification.body
        )?;
        self.out.flush()?;
        Ok(())
    }
}
