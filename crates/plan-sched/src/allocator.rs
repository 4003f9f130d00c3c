//! 機台分配
//!
//! 在既有訂席與保養日限制下，為指定站別找出最早可開工的機台。

use chrono::{Datelike, Duration, NaiveDateTime};
use plan_core::{round2, MachinePark, MachineType, PlanError, ScheduleOperation, WorkingCalendar};
use rust_decimal::Decimal;

/// 分配結果
#[derive(Debug, Clone)]
pub struct Allocation {
    /// 機台編號
    pub machine_id: String,

    /// 機台產能（米/小時）
    pub capacity: Decimal,

    /// 可開工時刻
    pub start: NaiveDateTime,
}

/// 機台分配器
pub struct MachineAllocator;

impl MachineAllocator {
    /// 找出某站別最早可用的機台
    ///
    /// 逐台掃描：從貼齊後的候選時刻起，只要與該機台既有工序重疊，
    /// 就推進到該工序完工時刻加上站間緩衝，再貼齊工作視窗，直到無
    /// 衝突為止。全域最早者勝出，平手時以配置順序決勝。
    /// 該站別完全未配置機台時返回 `NoMachineAvailable`。
    pub fn find_earliest(
        park: &MachinePark,
        machine_type: MachineType,
        candidate: NaiveDateTime,
        workload: Decimal,
        booked: &[ScheduleOperation],
        calendar: &WorkingCalendar,
        buffer_hours: Decimal,
    ) -> plan_core::Result<Allocation> {
        if !park.has_type(machine_type) {
            return Err(PlanError::NoMachineAvailable(machine_type));
        }

        let snapped = calendar.advance_to_working_time(candidate);
        let buffer = hours_to_duration(buffer_hours);

        let mut best: Option<Allocation> = None;

        for machine in park.machines_of(machine_type) {
            if machine.capacity <= Decimal::ZERO {
                continue;
            }

            // 保養日排除
            if machine.maintenance_day == Some(snapped.weekday()) {
                continue;
            }

            let duration = round2(workload / machine.capacity);
            let mut start = snapped;

            loop {
                let end = calendar.add_working_duration(start, duration);

                let conflict = booked
                    .iter()
                    .filter(|op| op.machine_id == machine.id)
                    .filter(|op| op.overlaps(start, end))
                    .max_by_key(|op| op.end_time);

                match conflict {
                    Some(op) => {
                        start = calendar.advance_to_working_time(op.end_time + buffer);
                    }
                    None => break,
                }
            }

            let is_better = best.as_ref().map_or(true, |b| start < b.start);
            if is_better {
                best = Some(Allocation {
                    machine_id: machine.id.clone(),
                    capacity: machine.capacity,
                    start,
                });
            }
        }

        best.ok_or(PlanError::NoMachineAvailable(machine_type))
    }
}

/// 將小時數換算為時間長度（取整到秒）
pub(crate) fn hours_to_duration(hours: Decimal) -> Duration {
    let seconds = (hours * Decimal::from(3600))
        .round()
        .to_string()
        .parse::<i64>()
        .unwrap_or(0);
    Duration::seconds(seconds)
}
