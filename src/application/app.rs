use crate::application::renderer;
use crate::config::Settings;
use crate::domain::WatcherStats;
use crate::feed::{EventFeedSimulator, EventFilter};
use crate::Result;
use chrono::Utc;
use std::future::Future;
use tracing::{debug, error, info, instrument};

/// Main application struct wiring both feeds to the terminal renderer
pub struct Application {
    settings: Settings,
    live_activity: EventFeedSimulator,
    silent_watcher: EventFeedSimulator,
    live_filter: EventFilter,
    watcher_filter: EventFilter,
}

impl Application {
    #[instrument]
    pub fn new() -> Result<Self> {
        let settings = Settings::new()?;
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Result<Self> {
        let live_filter = settings.live_activity.event_filter()?;
        let watcher_filter = settings.silent_watcher.event_filter()?;

        Ok(Self {
            settings,
            live_activity: EventFeedSimulator::new("live_activity"),
            silent_watcher: EventFeedSimulator::new("silent_watcher"),
            live_filter,
            watcher_filter,
        })
    }

    /// Start every enabled feed
    ///
    /// Either all enabled feeds are running afterwards or none are.
    pub fn start(&self) -> Result<()> {
        if self.settings.live_activity.enabled {
            self.live_activity
                .start(self.settings.live_activity_config())?;
        }
        if self.settings.silent_watcher.enabled {
            if let Err(e) = self
                .silent_watcher
                .start(self.settings.silent_watcher_config())
            {
                self.live_activity.stop();
                return Err(e);
            }
            info!(
                "Silent watcher summary: {}",
                renderer::render_stats(&WatcherStats::default())
            );
            self.render_feed(&self.silent_watcher, &self.watcher_filter);
        }
        Ok(())
    }

    pub fn stop(&self) {
        self.live_activity.stop();
        self.silent_watcher.stop();
    }

    /// Run until Ctrl-C
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await
    }

    /// Render feed updates until `shutdown` completes, then stop the feeds
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut live_ticks = self.live_activity.subscribe();
        let mut watcher_ticks = self.silent_watcher.subscribe();
        self.start()?;
        info!("Watchtower started");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                Ok(()) = live_ticks.changed() => {
                    self.render_head(&self.live_activity, &self.live_filter);
                }
                Ok(()) = watcher_ticks.changed() => {
                    self.render_head(&self.silent_watcher, &self.watcher_filter);
                }
            }
        }

        self.stop();
        info!("Watchtower stopped");
        Ok(())
    }

    fn render_head(&self, feed: &EventFeedSimulator, filter: &EventFilter) {
        let events = feed.current_events(&EventFilter::All);
        let Some(head) = events.first() else {
            return;
        };
        if !filter.matches(head) {
            debug!(feed = feed.name(), filter = %filter, "Head event filtered out");
            return;
        }

        let shown = events.iter().filter(|event| filter.matches(event)).count();
        info!(
            feed = feed.name(),
            shown,
            "{}",
            renderer::render_event(head, Utc::now())
        );
    }

    fn render_feed(&self, feed: &EventFeedSimulator, filter: &EventFilter) {
        let total = feed.current_events(&EventFilter::All).len();
        let events = feed.current_events(filter);
        info!("{}", renderer::render_header(feed.name(), events.len()));
        for line in renderer::render_feed(&events, total, Utc::now()) {
            info!(feed = feed.name(), "{}", line);
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn live_activity(&self) -> &EventFeedSimulator {
        &self.live_activity
    }

    pub fn silent_watcher(&self) -> &EventFeedSimulator {
        &self.silent_watcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use std::time::Duration;

    fn settings(toml: &str) -> Settings {
        Settings::builder()
            .expect("defaults are valid")
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .expect("config builds")
            .try_deserialize()
            .expect("settings deserialize")
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_renders_and_stops_feeds() {
        let app = Application::with_settings(settings(
            r#"
            [live_activity]
            seed = 1
            [silent_watcher]
            seed = 2
            backfill = true
            "#,
        ))
        .expect("valid settings");

        app.run_until(tokio::time::sleep(Duration::from_secs(50)))
            .await
            .expect("runs");

        assert!(!app.live_activity().is_running());
        assert!(!app.silent_watcher().is_running());
        // Every live delay is under 5s
        assert!(app.live_activity().tick_count() >= 10);
        // Watcher ticks at 15s, 30s and 45s on top of four historical alerts
        assert_eq!(app.silent_watcher().tick_count(), 3);
        assert_eq!(
            app.silent_watcher()
                .current_events(&EventFilter::All)
                .len(),
            7
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_feed_is_not_started() {
        let app = Application::with_settings(settings(
            r#"
            [silent_watcher]
            enabled = false
            "#,
        ))
        .expect("valid settings");

        app.run_until(tokio::time::sleep(Duration::from_secs(20)))
            .await
            .expect("runs");

        assert_eq!(app.silent_watcher().tick_count(), 0);
        assert!(app
            .silent_watcher()
            .current_events(&EventFilter::All)
            .is_empty());
    }

    #[test]
    fn test_bad_filter_is_rejected() {
        let result = Application::with_settings(settings(
            r#"
            [live_activity]
            filter = "loud"
            "#,
        ));
        assert!(result.is_err_and(|e| e.is_invalid_config()));
    }

    #[tokio::test]
    async fn test_invalid_feed_config_fails_start() {
        let app = Application::with_settings(settings(
            r#"
            [live_activity]
            capacity = 0
            "#,
        ))
        .expect("filters are valid");

        let error = app
            .run_until(std::future::ready(()))
            .await
            .expect_err("zero capacity");
        assert!(error.is_invalid_config());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_failure_stops_live_feed() {
        let app = Application::with_settings(settings(
            r#"
            [live_activity]
            seed = 3
            [silent_watcher]
            capacity = 0
            "#,
        ))
        .expect("filters are valid");

        let error = app
            .run_until(std::future::ready(()))
            .await
            .expect_err("zero watcher capacity");
        assert!(error.is_invalid_config());
        assert!(!app.live_activity().is_running());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(app.live_activity().tick_count(), 0);
        assert!(app
            .live_activity()
            .current_events(&EventFilter::All)
            .is_empty());
    }
}
