//! 排程記錄輸出
//!
//! 將內部排程結構攤平為可落庫的記錄列表（交付排程存放服務）。

use chrono::NaiveDateTime;
use plan_core::{MachineType, PlanError, ProductionSchedule, ScheduleOperation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 記錄建構上下文（由呼叫方提供的歸屬資訊）
#[derive(Debug, Clone)]
pub struct RecordContext {
    /// 排程批次代號（未提供時自動生成）
    pub schedule_id: Option<String>,

    /// 生產計劃 ID（重新生成時由存放服務依此刪舊）
    pub plan_id: String,

    /// 產品編號
    pub product_code: String,

    /// 備註
    pub notes: Option<String>,
}

impl RecordContext {
    /// 創建新的上下文
    pub fn new(plan_id: impl Into<String>, product_code: impl Into<String>) -> Self {
        Self {
            schedule_id: None,
            plan_id: plan_id.into(),
            product_code: product_code.into(),
            notes: None,
        }
    }

    /// 建構器模式：指定排程批次代號
    pub fn with_schedule_id(mut self, schedule_id: impl Into<String>) -> Self {
        self.schedule_id = Some(schedule_id.into());
        self
    }

    /// 建構器模式：設置備註
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// 可落庫的排程記錄（每段工序一筆）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub schedule_id: String,
    pub plan_id: String,
    pub machine_type: MachineType,
    pub machine_id: String,
    pub operation: String,
    pub sequence: u32,
    pub product_code: String,
    pub quantity: Decimal,
    pub unit: String,
    pub setup_time: Decimal,
    pub operation_time: Decimal,
    pub cleanup_time: Decimal,
    /// 總時數＝加工時數；整備/清機僅記錄，不計入
    pub total_time: Decimal,
    pub scheduled_start_time: NaiveDateTime,
    pub scheduled_end_time: NaiveDateTime,
    pub status: String,
    pub shift: String,
    pub priority: u8,
    pub notes: Option<String>,
}

/// 排程記錄建構器
pub struct ScheduleRecordBuilder;

impl ScheduleRecordBuilder {
    /// 將排程攤平為記錄列表
    ///
    /// 個別工序格式不合法時跳過並記警告，整批絕不中斷。
    pub fn build(schedule: &ProductionSchedule, context: &RecordContext) -> Vec<ScheduleRecord> {
        let schedule_id = context
            .schedule_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        schedule
            .operations()
            .into_iter()
            .filter_map(|op| match Self::build_record(op, &schedule_id, context) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("跳過不合法的工序（序號 {}）: {}", op.sequence, e);
                    None
                }
            })
            .collect()
    }

    /// 單筆記錄轉換
    fn build_record(
        op: &ScheduleOperation,
        schedule_id: &str,
        context: &RecordContext,
    ) -> plan_core::Result<ScheduleRecord> {
        if op.machine_id.is_empty() {
            return Err(PlanError::SerializationError("機台編號為空".to_string()));
        }
        if op.duration_hours <= Decimal::ZERO {
            return Err(PlanError::SerializationError(format!(
                "加工時數不合法: {}",
                op.duration_hours
            )));
        }
        if op.end_time <= op.start_time {
            return Err(PlanError::SerializationError(format!(
                "完工時刻不晚於開工時刻: {} / {}",
                op.start_time, op.end_time
            )));
        }

        Ok(ScheduleRecord {
            schedule_id: schedule_id.to_string(),
            plan_id: context.plan_id.clone(),
            machine_type: op.machine_type,
            machine_id: op.machine_id.clone(),
            operation: op.label.clone(),
            sequence: op.sequence,
            product_code: context.product_code.clone(),
            quantity: op.quantity,
            unit: op.unit.clone(),
            setup_time: op.setup_time,
            operation_time: op.duration_hours,
            cleanup_time: op.cleanup_time,
            total_time: op.duration_hours,
            scheduled_start_time: op.start_time,
            scheduled_end_time: op.end_time,
            status: "Scheduled".to_string(),
            shift: op.shift.clone(),
            priority: op.priority,
            notes: context.notes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn op(machine_id: &str, sequence: u32) -> ScheduleOperation {
        let day = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        ScheduleOperation {
            machine_id: machine_id.to_string(),
            machine_type: MachineType::Extruder,
            label: "絕緣押出 - 紅".to_string(),
            quantity: Decimal::from(1500),
            unit: "米".to_string(),
            duration_hours: Decimal::from(3),
            start_time: day.and_hms_opt(8, 0, 0).unwrap(),
            end_time: day.and_hms_opt(11, 0, 0).unwrap(),
            shift: "早班".to_string(),
            sequence,
            setup_time: Decimal::new(5, 1),
            cleanup_time: Decimal::new(25, 2),
            priority: 5,
        }
    }

    fn schedule_with(ops: Vec<ScheduleOperation>) -> ProductionSchedule {
        let mut schedule = ProductionSchedule::empty();
        schedule.extrusion = ops;
        schedule
    }

    #[test]
    fn test_build_records() {
        let schedule = schedule_with(vec![op("EX-01", 1), op("EX-02", 2)]);
        let context = RecordContext::new("PLAN-001", "RVV-3x1.5").with_schedule_id("SCH-001");

        let records = ScheduleRecordBuilder::build(&schedule, &context);

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.schedule_id, "SCH-001");
        assert_eq!(first.plan_id, "PLAN-001");
        assert_eq!(first.product_code, "RVV-3x1.5");
        assert_eq!(first.status, "Scheduled");
        // 總時數只含加工時數，不含整備/清機
        assert_eq!(first.total_time, first.operation_time);
        assert_eq!(first.total_time, Decimal::from(3));
    }

    #[test]
    fn test_generated_schedule_id_shared_across_batch() {
        let schedule = schedule_with(vec![op("EX-01", 1), op("EX-02", 2)]);
        let context = RecordContext::new("PLAN-002", "RVV-3x1.5");

        let records = ScheduleRecordBuilder::build(&schedule, &context);

        assert_eq!(records.len(), 2);
        assert!(!records[0].schedule_id.is_empty());
        assert_eq!(records[0].schedule_id, records[1].schedule_id);
    }

    #[test]
    fn test_malformed_operation_skipped_not_fatal() {
        let mut bad = op("EX-02", 2);
        bad.machine_id = String::new();

        let mut inverted = op("EX-03", 3);
        inverted.end_time = inverted.start_time;

        let schedule = schedule_with(vec![op("EX-01", 1), bad, inverted]);
        let context = RecordContext::new("PLAN-003", "RVV-3x1.5");

        let records = ScheduleRecordBuilder::build(&schedule, &context);

        // 壞記錄被跳過，整批不中斷
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].machine_id, "EX-01");
    }
}
