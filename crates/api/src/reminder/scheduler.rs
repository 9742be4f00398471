use super::notification::send_reminder;
use chrono::{DateTime, Utc};
use event_scheduler_domain::{format_occurrence, ReminderKey, ReminderMessage};
use event_scheduler_infra::SchedulerContext;
use std::collections::HashSet;
use tracing::{info, warn};

/// A reminder that was due during a cycle
#[derive(Debug, Clone, PartialEq)]
pub struct FiredReminder {
    pub key: ReminderKey,
    pub title: String,
    /// Whether a mail was handed over to the relay. `false` when the event
    /// has no email or delivery failed.
    pub email_sent: bool,
}

/// Finds occurrences that start within the lookahead window and fires one
/// reminder per occurrence.
///
/// Fired reminders are remembered for the lifetime of this value. A key is
/// forgotten once its occurrence is in the past, since resolved occurrences
/// are never earlier than `now` and it cannot become due again.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    seen_reminders: HashSet<ReminderKey>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen_count(&self) -> usize {
        self.seen_reminders.len()
    }

    /// Runs one reminder cycle.
    ///
    /// Events with an unparseable `start_time` are skipped. Only a failure
    /// to read the event store fails the cycle.
    pub async fn check_reminders(
        &mut self,
        ctx: &SchedulerContext,
    ) -> anyhow::Result<Vec<FiredReminder>> {
        let now = ctx.sys.now();
        let horizon = now
            .checked_add_signed(ctx.config.reminder_lookahead)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let tz = ctx.config.reminder_timezone;

        self.evict_elapsed(now);

        let events = ctx.repos.events.find_all().await?;
        let mut fired = Vec::new();

        for event in events {
            let occurrence = match event.next_occurrence(now, &tz) {
                Ok(Some(occurrence)) => occurrence,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping event {} in reminder check: {}", event.id, e);
                    continue;
                }
            };
            if occurrence > horizon {
                continue;
            }

            let key = ReminderKey::new(&event, occurrence);
            if !self.seen_reminders.insert(key.clone()) {
                continue;
            }

            info!(
                "Reminder due for event {} ({}) at {}",
                event.id,
                event.title,
                format_occurrence(&occurrence, &tz)
            );

            let email_sent = match event.reminder_email() {
                Some(to) => {
                    let msg = ReminderMessage::new(to, &event, &occurrence, &tz);
                    send_reminder(ctx.mailer.as_ref(), &msg).await
                }
                None => false,
            };

            fired.push(FiredReminder {
                key,
                title: event.title,
                email_sent,
            });
        }

        Ok(fired)
    }

    fn evict_elapsed(&mut self, now: DateTime<Utc>) {
        self.seen_reminders.retain(|key| key.occurrence >= now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use chrono_tz::Tz;
    use event_scheduler_domain::{Event, Recurrence};
    use event_scheduler_infra::{
        Config, IMailer, ISys, InMemoryMailer, Repos, SchedulerContext, StaticTimeSys,
    };
    use std::sync::Arc;

    struct TestContext {
        ctx: SchedulerContext,
        mailer: Arc<InMemoryMailer>,
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn setup_with(mailer: InMemoryMailer, at: DateTime<Utc>) -> TestContext {
        let sys: Arc<dyn ISys> = Arc::new(StaticTimeSys(at.timestamp_millis()));
        let mut config = Config::new();
        config.reminder_lookahead = Duration::hours(1);
        config.reminder_timezone = Tz::UTC;
        let mailer = Arc::new(mailer);

        let ctx = SchedulerContext {
            repos: Repos::create_inmemory(sys.clone(), 2),
            config,
            sys,
            mailer: mailer.clone() as Arc<dyn IMailer>,
        };
        TestContext { ctx, mailer }
    }

    fn setup() -> TestContext {
        setup_with(InMemoryMailer::new(), now())
    }

    /// Same store, clock moved to `at`
    fn at_time(ctx: &SchedulerContext, at: DateTime<Utc>) -> SchedulerContext {
        SchedulerContext {
            sys: Arc::new(StaticTimeSys(at.timestamp_millis())),
            ..ctx.clone()
        }
    }

    async fn insert(
        ctx: &SchedulerContext,
        title: &str,
        start: DateTime<Utc>,
        recurrence: Option<Recurrence>,
        email: Option<&str>,
    ) -> Event {
        let mut e = Event::new(
            None,
            title.into(),
            format!("About {}", title),
            start.to_rfc3339(),
            (start + Duration::hours(1)).to_rfc3339(),
        );
        e.recurrence = recurrence;
        e.email = email.map(String::from);
        ctx.repos.events.put(&e).await.unwrap()
    }

    #[actix_web::test]
    async fn fires_within_the_lookahead_window_only() {
        let TestContext { ctx, mailer } = setup();
        let soon = insert(
            &ctx,
            "Soon",
            now() + Duration::minutes(45),
            None,
            Some("test@example.com"),
        )
        .await;
        insert(
            &ctx,
            "Later",
            now() + Duration::minutes(65),
            None,
            Some("test@example.com"),
        )
        .await;

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key.event_id, soon.id);
        assert_eq!(fired[0].key.occurrence, now() + Duration::minutes(45));
        assert!(fired[0].email_sent);

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "test@example.com");
        assert_eq!(sent[0].subject, "Reminder: Soon is starting soon");
        assert_eq!(
            sent[0].body,
            "⏰ Event: Soon\n📅 Time: 2024-03-01 12:45\n📝 Description: About Soon"
        );
    }

    #[actix_web::test]
    async fn skips_elapsed_one_shot_events() {
        let TestContext { ctx, mailer } = setup();
        insert(
            &ctx,
            "Past",
            now() - Duration::minutes(10),
            None,
            Some("test@example.com"),
        )
        .await;

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert!(fired.is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[actix_web::test]
    async fn resolves_recurring_events_to_their_next_occurrence() {
        let TestContext { ctx, .. } = setup();
        // Started two days ago, next occurrence is 30 minutes from now
        let start = now() - Duration::days(2) + Duration::minutes(30);
        let e = insert(&ctx, "Standup", start, Some(Recurrence::Daily), None).await;

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key.event_id, e.id);
        assert_eq!(fired[0].key.occurrence, now() + Duration::minutes(30));
        assert!(!fired[0].email_sent);
    }

    #[actix_web::test]
    async fn fires_each_occurrence_once() {
        let TestContext { ctx, mailer } = setup();
        insert(
            &ctx,
            "Soon",
            now() + Duration::minutes(45),
            None,
            Some("test@example.com"),
        )
        .await;

        let mut scheduler = ReminderScheduler::new();
        assert_eq!(scheduler.check_reminders(&ctx).await.unwrap().len(), 1);
        assert!(scheduler.check_reminders(&ctx).await.unwrap().is_empty());

        let a_minute_later = at_time(&ctx, now() + Duration::minutes(1));
        assert!(scheduler
            .check_reminders(&a_minute_later)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(mailer.sent().len(), 1);
    }

    #[actix_web::test]
    async fn fires_again_for_the_next_occurrence_of_a_series() {
        let TestContext { ctx, .. } = setup();
        let start = now() + Duration::minutes(30);
        insert(&ctx, "Standup", start, Some(Recurrence::Daily), None).await;

        let mut scheduler = ReminderScheduler::new();
        assert_eq!(scheduler.check_reminders(&ctx).await.unwrap().len(), 1);

        let next_day = at_time(&ctx, now() + Duration::days(1));
        let fired = scheduler.check_reminders(&next_day).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key.occurrence, start + Duration::days(1));
    }

    #[actix_web::test]
    async fn evicts_keys_of_elapsed_occurrences() {
        let TestContext { ctx, .. } = setup();
        insert(&ctx, "Soon", now() + Duration::minutes(45), None, None).await;

        let mut scheduler = ReminderScheduler::new();
        scheduler.check_reminders(&ctx).await.unwrap();
        assert_eq!(scheduler.seen_count(), 1);

        let after_start = at_time(&ctx, now() + Duration::minutes(46));
        scheduler.check_reminders(&after_start).await.unwrap();
        assert_eq!(scheduler.seen_count(), 0);
    }

    #[actix_web::test]
    async fn delivery_failure_does_not_stop_the_cycle() {
        let TestContext { ctx, .. } = setup_with(InMemoryMailer::failing(), now());
        insert(&ctx, "A", now() + Duration::minutes(10), None, Some("a@example.com")).await;
        insert(&ctx, "B", now() + Duration::minutes(20), None, Some("b@example.com")).await;
        insert(&ctx, "C", now() + Duration::minutes(30), None, Some("c@example.com")).await;

        let mut scheduler = ReminderScheduler::new();
        let fired = scheduler.check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 3);
        assert!(fired.iter().all(|r| !r.email_sent));
        // A failed delivery is not retried
        assert!(scheduler.check_reminders(&ctx).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn malformed_start_time_skips_only_that_event() {
        let TestContext { ctx, .. } = setup();
        let mut broken = Event::new(
            None,
            "Broken".into(),
            "".into(),
            "next tuesday".into(),
            "".into(),
        );
        broken.email = Some("test@example.com".into());
        ctx.repos.events.put(&broken).await.unwrap();
        insert(&ctx, "Soon", now() + Duration::minutes(45), None, None).await;

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].title, "Soon");
    }

    #[actix_web::test]
    async fn naive_start_times_use_the_configured_timezone() {
        let TestContext { mut ctx, .. } = setup();
        ctx.config.reminder_timezone = Tz::Europe__Oslo;
        // 13:30 in Oslo is 12:30 UTC
        let e = Event::new(
            None,
            "Lunch".into(),
            "".into(),
            "2024-03-01T13:30:00".into(),
            "2024-03-01T14:30:00".into(),
        );
        ctx.repos.events.put(&e).await.unwrap();

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key.occurrence, now() + Duration::minutes(30));
    }

    #[actix_web::test]
    async fn local_series_keep_their_wall_clock_time_after_dst_change() {
        // 2024-04-02 09:30 CEST, the series started in CET
        let at = Utc.with_ymd_and_hms(2024, 4, 2, 7, 30, 0).unwrap();
        let TestContext { mut ctx, mailer } = setup_with(InMemoryMailer::new(), at);
        ctx.config.reminder_timezone = Tz::Europe__Oslo;
        let mut e = Event::new(
            None,
            "Standup".into(),
            "Daily sync".into(),
            "2024-03-29T10:00:00".into(),
            "2024-03-29T10:15:00".into(),
        );
        e.recurrence = Some(Recurrence::Daily);
        e.email = Some("test@example.com".into());
        ctx.repos.events.put(&e).await.unwrap();

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(
            fired[0].key.occurrence,
            Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap()
        );
        assert_eq!(
            mailer.sent()[0].body,
            "⏰ Event: Standup\n📅 Time: 2024-04-02 10:00\n📝 Description: Daily sync"
        );
    }

    #[actix_web::test]
    async fn huge_lookahead_does_not_overflow() {
        let TestContext { mut ctx, .. } = setup();
        ctx.config.reminder_lookahead = Duration::max_value();
        insert(&ctx, "Far away", now() + Duration::days(3650), None, None).await;

        let fired = ReminderScheduler::new().check_reminders(&ctx).await.unwrap();
        assert_eq!(fired.len(), 1);
    }
}
