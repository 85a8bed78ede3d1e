//! # Maintenance Window
//!
//! Decides whether listing operations are refused right now. Injected into
//! [`ProductManager`](crate::manager::ProductManager) so tests can pin the
//! clock.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Timelike};

use crate::config::MaintenanceSettings;

/// Default maintenance hour (22:00 to 22:59 local time).
pub const DEFAULT_MAINTENANCE_HOUR: u32 = 22;

pub trait MaintenanceWindow: Send + Sync {
    fn is_active(&self) -> bool;
}

/// Active for one full hour of the local wall clock each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyMaintenanceWindow {
    pub hour: u32,
}

impl HourlyMaintenanceWindow {
    pub fn new(hour: u32) -> Self {
        HourlyMaintenanceWindow { hour }
    }

    /// Whether the window covers `at`, read in its own timezone.
    pub fn is_active_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        at.hour() == self.hour
    }
}

impl Default for HourlyMaintenanceWindow {
    fn default() -> Self {
        HourlyMaintenanceWindow::new(DEFAULT_MAINTENANCE_HOUR)
    }
}

impl MaintenanceWindow for HourlyMaintenanceWindow {
    fn is_active(&self) -> bool {
        self.is_active_at(&Local::now())
    }
}

/// Never in maintenance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMaintenance;

impl MaintenanceWindow for NoMaintenance {
    fn is_active(&self) -> bool {
        false
    }
}

/// Builds the policy described by the `[maintenance]` config section.
pub fn from_settings(settings: &MaintenanceSettings) -> Arc<dyn MaintenanceWindow> {
    if settings.enabled {
        Arc::new(HourlyMaintenanceWindow::new(settings.hour))
    } else {
        Arc::new(NoMaintenance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_window_covers_whole_hour() {
        let window = HourlyMaintenanceWindow::default();

        let before = Utc.with_ymd_and_hms(2024, 3, 1, 21, 59, 59).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 22, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();

        assert!(!window.is_active_at(&before));
        assert!(window.is_active_at(&start));
        assert!(window.is_active_at(&end));
        assert!(!window.is_active_at(&after));
    }

    #[test]
    fn test_hour_read_in_given_timezone() {
        let window = HourlyMaintenanceWindow::new(22);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        // 20:30 UTC is 22:30 at +02:00
        let at = plus_two.with_ymd_and_hms(2024, 3, 1, 22, 30, 0).unwrap();
        assert!(window.is_active_at(&at));
        assert!(!window.is_active_at(&at.with_timezone(&Utc)));
    }

    #[test]
    fn test_from_settings() {
        let disabled = MaintenanceSettings {
            enabled: false,
            hour: Local::now().hour(),
        };
        assert!(!from_settings(&disabled).is_active());
        assert!(!NoMaintenance.is_active());
    }
}
