//! # Cable Plan
//!
//! 電纜生產排程核心引擎：材料需求計算 + 四站別機台排程。
//!
//! 引擎以函式庫形式被編排服務呼叫，不做任何網路/檔案 I/O，
//! 所有輸入（解析後規格、機台配置、既有訂席、計劃基準時刻）
//! 必須在呼叫前備齊。

pub use plan_core::*;

pub use plan_calc::MaterialCalculator;

pub use plan_sched::{
    Allocation, MachineAllocator, MachineScheduler, RecordContext, ScheduleRecord,
    ScheduleRecordBuilder, ScheduleRequest, ScheduleResult, ScheduleWarning, SchedulerConfig,
    WarningSeverity,
};

pub use plan_cache::{DirtyTracker, SpecCache};
