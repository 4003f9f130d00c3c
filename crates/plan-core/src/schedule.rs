//! 生產排程模型

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::machine::MachineType;

/// 排程工序（單一機台上的一段作業）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOperation {
    /// 機台編號
    pub machine_id: String,

    /// 機台類型
    pub machine_type: MachineType,

    /// 工序名稱
    pub label: String,

    /// 加工量
    pub quantity: Decimal,

    /// 加工量單位
    pub unit: String,

    /// 加工時數（小時，依產能計算）
    pub duration_hours: Decimal,

    /// 開工時刻
    pub start_time: NaiveDateTime,

    /// 完工時刻
    pub end_time: NaiveDateTime,

    /// 開工班別
    pub shift: String,

    /// 工序序號（全排程嚴格遞增）
    pub sequence: u32,

    /// 整備時數（僅供參考，不計入排程視窗）
    pub setup_time: Decimal,

    /// 清機時數（僅供參考，不計入排程視窗）
    pub cleanup_time: Decimal,

    /// 優先級（1-10，10最高）
    pub priority: u8,
}

impl ScheduleOperation {
    /// 檢查兩段工序的 [start, end) 區間是否重疊
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && start < self.end_time
    }
}

/// 生產排程（四站別的工序集合）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionSchedule {
    /// 束絞工序（股數達門檻或強制啟用時存在）
    pub bunching: Option<ScheduleOperation>,

    /// 絕緣押出工序（每芯色一段，依芯序排列）
    pub extrusion: Vec<ScheduleOperation>,

    /// 成纜工序（多芯時存在）
    pub laying: Option<ScheduleOperation>,

    /// 外被押出工序
    pub final_extrusion: Option<ScheduleOperation>,
}

impl ProductionSchedule {
    /// 創建空排程
    pub fn empty() -> Self {
        Self::default()
    }

    /// 依站別順序列出全部工序
    pub fn operations(&self) -> Vec<&ScheduleOperation> {
        let mut ops = Vec::new();
        if let Some(op) = &self.bunching {
            ops.push(op);
        }
        ops.extend(self.extrusion.iter());
        if let Some(op) = &self.laying {
            ops.push(op);
        }
        if let Some(op) = &self.final_extrusion {
            ops.push(op);
        }
        ops
    }

    /// 工序總數
    pub fn operation_count(&self) -> usize {
        self.operations().len()
    }

    /// 排程起訖（最早開工與最晚完工）
    pub fn makespan(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let ops = self.operations();
        let start = ops.iter().map(|op| op.start_time).min()?;
        let end = ops.iter().map(|op| op.end_time).max()?;
        Some((start, end))
    }

    /// 序列化為 JSON 摘要（交付計劃存放服務的不透明資料塊）
    pub fn to_summary_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::PlanError::SerializationError(e.to_string()))
    }
}
