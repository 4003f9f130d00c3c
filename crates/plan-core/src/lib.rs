//! # Plan Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod catalog;
pub mod machine;
pub mod requirement;
pub mod schedule;
pub mod spec;

// Re-export 主要類型
pub use calendar::{Shift, WorkingCalendar};
pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use machine::{Machine, MachinePark, MachineType};
pub use requirement::{ColorRequirement, MaterialRequirement};
pub use schedule::{ProductionSchedule, ScheduleOperation};
pub use spec::{core_label, resolve_cores, CableSpec};

use rust_decimal::{Decimal, RoundingStrategy};

/// 排程引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("輸入參數無效: {0}")]
    InvalidInput(String),

    #[error("找不到產品規格: {0}")]
    ProductNotFound(String),

    #[error("無可用機台: {0}")]
    NoMachineAvailable(MachineType),

    #[error("序列化錯誤: {0}")]
    SerializationError(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

/// 四捨五入到小數點後兩位（與原系統一致，0.5 進位）
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
