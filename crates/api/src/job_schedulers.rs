use crate::reminder::ReminderScheduler;
use actix_web::rt::time::interval;
use event_scheduler_infra::SchedulerContext;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{error, info};

/// Handle to the background reminder job
pub struct ReminderJobHandle {
    stop_sender: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ReminderJobHandle {
    /// Signals the job to stop and waits until the current cycle is done
    pub async fn stop(self) {
        if self.stop_sender.send(true).is_err() {
            // The job has already exited
            return;
        }
        if let Err(e) = self.handle.await {
            error!("Reminder job did not shut down cleanly: {:?}", e);
        }
    }
}

/// Runs a reminder cycle every `reminder_check_interval`, starting right away.
/// A failed cycle is logged and the job carries on with the next one.
pub fn start_reminder_job(ctx: SchedulerContext) -> ReminderJobHandle {
    let (stop_sender, mut stop_receiver) = watch::channel(false);

    let handle = actix_web::rt::spawn(async move {
        let mut scheduler = ReminderScheduler::new();
        let mut interval = interval(ctx.config.reminder_check_interval);
        info!(
            "Reminder job started, checking every {:?}",
            ctx.config.reminder_check_interval
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match scheduler.check_reminders(&ctx).await {
                        Ok(fired) if !fired.is_empty() => {
                            info!("Reminder cycle fired {} reminder(s)", fired.len());
                        }
                        Ok(_) => {}
                        Err(e) => error!("Reminder cycle failed: {:?}", e),
                    }
                }
                res = stop_receiver.changed() => {
                    if res.is_err() || *stop_receiver.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Reminder job stopped");
    });

    ReminderJobHandle {
        stop_sender,
        handle,
    }
}
