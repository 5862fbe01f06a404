//! Periodic cleanup of expired session rows
//!
//! Expiry is enforced on every token lookup, so correctness never depends on
//! this job; it only keeps the sessions table from accumulating dead rows.

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::repositories::SessionRepository;

/// Default schedule: top of every hour
pub const DEFAULT_SWEEP_SCHEDULE: &str = "0 0 * * * *";

/// Background job deleting expired sessions
#[derive(Clone)]
pub struct SessionSweeper {
    sessions: SessionRepository,
}

impl SessionSweeper {
    pub fn new(sessions: SessionRepository) -> Self {
        Self { sessions }
    }

    /// Read the sweep schedule from `SESSION_SWEEP_SCHEDULE` (6-field cron)
    pub fn schedule_from_env() -> String {
        std::env::var("SESSION_SWEEP_SCHEDULE")
            .unwrap_or_else(|_| DEFAULT_SWEEP_SCHEDULE.to_string())
    }

    pub async fn start(&self, schedule: &str) -> Result<()> {
        let sweeper = self.clone();

        let scheduler = JobScheduler::new().await?;

        let job = Job::new_async(schedule, move |_, _| {
            let sweeper = sweeper.clone();
            Box::pin(async move {
                match sweeper.sessions.purge_expired().await {
                    Ok(purged) if purged > 0 => {
                        info!("Session sweep removed {} expired sessions", purged);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Session sweep failed: {}", e);
                    }
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("Started session sweeper with schedule: {}", schedule);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_schedule_default() {
        unsafe { std::env::remove_var("SESSION_SWEEP_SCHEDULE") };
        assert_eq!(SessionSweeper::schedule_from_env(), DEFAULT_SWEEP_SCHEDULE);
    }

    #[test]
    #[serial]
    fn test_schedule_override() {
        unsafe { std::env::set_var("SESSION_SWEEP_SCHEDULE", "0 */10 * * * *") };
        assert_eq!(SessionSweeper::schedule_from_env(), "0 */10 * * * *");
        unsafe { std::env::remove_var("SESSION_SWEEP_SCHEDULE") };
    }
}
