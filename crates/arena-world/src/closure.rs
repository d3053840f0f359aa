//! Area closures: the arena shrinks from the outside in.
//!
//! Closures run once per day, right after the day counter advances. First
//! every area scheduled for the new day becomes inactive. Then, on closure
//! days, the highest-id active non-hub areas are scheduled for the next
//! day. A closed area never reopens.

use arena_types::{AreaId, Event, Flags, MapData};
use serde::Deserialize;

/// When and how many areas get scheduled for closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ClosureSchedule {
    /// First day on which a batch is scheduled.
    #[serde(default = "default_start_day")]
    pub start_day: u32,
    /// Days between batches.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Areas per batch.
    #[serde(default = "default_batch")]
    pub batch: usize,
}

const fn default_start_day() -> u32 {
    3
}

const fn default_interval() -> u32 {
    2
}

const fn default_batch() -> usize {
    4
}

impl Default for ClosureSchedule {
    fn default() -> Self {
        Self {
            start_day: default_start_day(),
            interval: default_interval(),
            batch: default_batch(),
        }
    }
}

impl ClosureSchedule {
    /// Whether a new batch is scheduled on `day`.
    pub fn is_batch_day(&self, day: u32) -> bool {
        let Some(since) = day.checked_sub(self.start_day) else {
            return false;
        };
        since.checked_rem(self.interval).map_or(since == 0, |r| r == 0)
    }
}

/// What a closure pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureReport {
    /// Day the pass ran for.
    pub day: u32,
    /// Areas that became inactive, ascending.
    pub closed: Vec<AreaId>,
    /// Areas newly scheduled to close tomorrow, highest id first.
    pub scheduled: Vec<AreaId>,
}

impl ClosureReport {
    /// Log events for this pass: closures first, then warnings.
    pub fn events(&self) -> Vec<Event> {
        let on_day = self.day.saturating_add(1);
        self.closed
            .iter()
            .map(|&area_id| Event::AreaClosed { area_id })
            .chain(
                self.scheduled
                    .iter()
                    .map(|&area_id| Event::AreaClosing { area_id, on_day }),
            )
            .collect()
    }
}

/// Apply closures for `day` to the map and the closed-area set.
pub fn apply_closures_for_day(
    map: &mut MapData,
    flags: &mut Flags,
    day: u32,
    schedule: &ClosureSchedule,
) -> ClosureReport {
    let mut report = ClosureReport {
        day,
        ..ClosureReport::default()
    };

    for area in map.areas_by_id.values_mut() {
        if area.is_active && area.will_close_on_day == Some(day) {
            area.is_active = false;
            flags.closed_areas.insert(area.id);
            report.closed.push(area.id);
        }
    }

    if schedule.is_batch_day(day) {
        let tomorrow = day.saturating_add(1);
        let batch = map
            .areas_by_id
            .values_mut()
            .rev()
            .filter(|a| !a.id.is_hub() && a.is_active)
            .take(schedule.batch);
        for area in batch {
            if area.will_close_on_day.is_none() {
                area.will_close_on_day = Some(tomorrow);
                report.scheduled.push(area.id);
            }
        }
    }

    if !report.closed.is_empty() || !report.scheduled.is_empty() {
        tracing::info!(
            day,
            closed = report.closed.len(),
            scheduled = report.scheduled.len(),
            "applied area closures"
        );
    }
    report
}
