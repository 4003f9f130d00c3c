//! 排程主引擎
//!
//! 依站別相依順序編排束絞、絕緣押出、成纜與外被押出四站。

use chrono::NaiveDateTime;
use plan_core::{
    round2, CableSpec, MachinePark, MachineType, PlanError, ProductionSchedule, ScheduleOperation,
    WorkingCalendar,
};
use rust_decimal::Decimal;

use crate::allocator::{hours_to_duration, MachineAllocator};
use crate::{ScheduleResult, ScheduleWarning};

/// 束絞啟用門檻（股數達此值才需要束絞站）
pub const BUNCHING_STRAND_THRESHOLD: u32 = 24;

/// 排程參數配置
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 站間/工序間緩衝（小時）
    pub buffer_hours: Decimal,

    /// 整備時數（小時，僅記錄不佔排程視窗）
    pub setup_hours: Decimal,

    /// 清機時數（小時，僅記錄不佔排程視窗）
    pub cleanup_hours: Decimal,

    /// 工序預設優先級（1-10）
    pub default_priority: u8,
}

impl SchedulerConfig {
    /// 建構器模式：設置緩衝時數
    pub fn with_buffer_hours(mut self, hours: Decimal) -> Self {
        self.buffer_hours = hours;
        self
    }

    /// 建構器模式：設置整備/清機時數
    pub fn with_setup_cleanup(mut self, setup: Decimal, cleanup: Decimal) -> Self {
        self.setup_hours = setup;
        self.cleanup_hours = cleanup;
        self
    }

    /// 建構器模式：設置預設優先級
    pub fn with_default_priority(mut self, priority: u8) -> Self {
        self.default_priority = priority.min(10);
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            buffer_hours: Decimal::new(5, 1),   // 0.5 小時
            setup_hours: Decimal::new(5, 1),    // 0.5 小時
            cleanup_hours: Decimal::new(25, 2), // 0.25 小時
            default_priority: 5,
        }
    }
}

/// 排程請求
///
/// `planning_anchor` 是注入的「當下」時刻：引擎內部絕不讀取系統時鐘，
/// 呼叫方可傳牆鐘時間或任意計劃基準時刻。
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// 電纜規格（芯數/芯色已解析）
    pub spec: CableSpec,

    /// 單芯總線長（來自材料需求計算）
    pub total_single_core_length: Decimal,

    /// 既有已排工序快照（跨站別/跨請求的衝突檢查依據）
    pub booked: Vec<ScheduleOperation>,

    /// 計劃基準時刻
    pub planning_anchor: NaiveDateTime,

    /// 強制啟用束絞站（不足門檻時的人工覆寫）
    pub force_bunching: bool,
}

impl ScheduleRequest {
    /// 創建新的排程請求
    pub fn new(
        spec: CableSpec,
        total_single_core_length: Decimal,
        planning_anchor: NaiveDateTime,
    ) -> Self {
        Self {
            spec,
            total_single_core_length,
            booked: Vec::new(),
            planning_anchor,
            force_bunching: false,
        }
    }

    /// 建構器模式：設置既有工序快照
    pub fn with_booked(mut self, booked: Vec<ScheduleOperation>) -> Self {
        self.booked = booked;
        self
    }

    /// 建構器模式：強制啟用束絞
    pub fn with_force_bunching(mut self, force: bool) -> Self {
        self.force_bunching = force;
        self
    }
}

/// 排程引擎
pub struct MachineScheduler {
    /// 機台配置
    park: MachinePark,

    /// 工作日曆
    calendar: WorkingCalendar,

    /// 排程參數
    config: SchedulerConfig,
}

impl MachineScheduler {
    /// 創建新的排程引擎
    pub fn new(park: MachinePark, calendar: WorkingCalendar) -> Self {
        Self {
            park,
            calendar,
            config: SchedulerConfig::default(),
        }
    }

    /// 建構器模式：設置排程參數
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// 主排程入口
    ///
    /// 站別嚴格依相依順序推進；某站別無可用機台時記為缺席並發出警告，
    /// 不阻斷後續站別。相同輸入與相同機台快照必得完全相同的排程。
    pub fn schedule(&self, request: &ScheduleRequest) -> plan_core::Result<ScheduleResult> {
        let spec = &request.spec;

        tracing::info!(
            "開始排程：產品 {}，數量 {}，芯數 {}",
            spec.product_code,
            spec.quantity,
            spec.core_count
        );

        let start_time = std::time::Instant::now();

        let anchor = self.calendar.advance_to_working_time(request.planning_anchor);
        let buffer = hours_to_duration(self.config.buffer_hours);

        let mut booked = request.booked.clone();
        let mut schedule = ProductionSchedule::empty();
        let mut warnings = Vec::new();
        let mut sequence = 0u32;

        // 每芯加工量 = 件數 × 單件長度
        let per_core_length = spec.quantity * spec.length_per_piece;

        // Step 1: 束絞（股數達門檻或人工強制時）
        if spec.strand_count >= BUNCHING_STRAND_THRESHOLD || request.force_bunching {
            tracing::debug!("Step 1: 束絞站，加工量 {} 米", request.total_single_core_length);
            match self.schedule_operation(
                MachineType::Bunching,
                MachineType::Bunching.operation_label().to_string(),
                request.total_single_core_length,
                anchor,
                &mut booked,
                &mut sequence,
            ) {
                Ok(op) => schedule.bunching = Some(op),
                Err(PlanError::NoMachineAvailable(machine_type)) => {
                    warnings.push(Self::stage_skipped(machine_type));
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("股數 {} 未達束絞門檻，跳過束絞站", spec.strand_count);
        }

        // Step 2: 絕緣押出（每芯色一段，束絞完工後接續）
        let extrusion_candidate = match &schedule.bunching {
            Some(op) => self.calendar.advance_to_working_time(op.end_time + buffer),
            None => anchor,
        };
        tracing::debug!("Step 2: 絕緣押出站，{} 芯", spec.core_count);
        for index in 0..spec.core_count as usize {
            let label = format!(
                "{} - {}",
                MachineType::Extruder.operation_label(),
                spec.core_label(index)
            );
            match self.schedule_operation(
                MachineType::Extruder,
                label,
                per_core_length,
                extrusion_candidate,
                &mut booked,
                &mut sequence,
            ) {
                Ok(op) => schedule.extrusion.push(op),
                Err(PlanError::NoMachineAvailable(machine_type)) => {
                    warnings.push(Self::stage_skipped(machine_type));
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        // Step 3: 成纜（多芯才需要；候選時刻 = 最晚押出完工 + 緩衝）
        if spec.core_count > 1 {
            tracing::debug!("Step 3: 成纜站");
            let candidate = schedule
                .extrusion
                .iter()
                .map(|op| op.end_time)
                .max()
                .map(|end| self.calendar.advance_to_working_time(end + buffer))
                .unwrap_or(anchor);

            match self.schedule_operation(
                MachineType::Laying,
                MachineType::Laying.operation_label().to_string(),
                per_core_length,
                candidate,
                &mut booked,
                &mut sequence,
            ) {
                Ok(op) => schedule.laying = Some(op),
                Err(PlanError::NoMachineAvailable(machine_type)) => {
                    warnings.push(Self::stage_skipped(machine_type));
                }
                Err(e) => return Err(e),
            }
        }

        // Step 4: 外被押出（候選時刻 = 成纜完工，缺成纜時退回最晚押出完工）
        tracing::debug!("Step 4: 外被押出站");
        let final_candidate = if let Some(op) = &schedule.laying {
            self.calendar.advance_to_working_time(op.end_time + buffer)
        } else if let Some(end) = schedule.extrusion.iter().map(|op| op.end_time).max() {
            self.calendar.advance_to_working_time(end + buffer)
        } else {
            anchor
        };

        match self.schedule_operation(
            MachineType::FinalExtruder,
            MachineType::FinalExtruder.operation_label().to_string(),
            per_core_length,
            final_candidate,
            &mut booked,
            &mut sequence,
        ) {
            Ok(op) => schedule.final_extrusion = Some(op),
            Err(PlanError::NoMachineAvailable(machine_type)) => {
                warnings.push(Self::stage_skipped(machine_type));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            "排程完成，共 {} 段工序，耗時 {:?}",
            schedule.operation_count(),
            start_time.elapsed()
        );

        Ok(ScheduleResult {
            schedule,
            warnings,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }

    /// 排入單段工序：分配機台、計算工時、標註班別、遞增序號
    fn schedule_operation(
        &self,
        machine_type: MachineType,
        label: String,
        quantity: Decimal,
        candidate: NaiveDateTime,
        booked: &mut Vec<ScheduleOperation>,
        sequence: &mut u32,
    ) -> plan_core::Result<ScheduleOperation> {
        let allocation = MachineAllocator::find_earliest(
            &self.park,
            machine_type,
            candidate,
            quantity,
            booked,
            &self.calendar,
            self.config.buffer_hours,
        )?;

        let duration = round2(quantity / allocation.capacity);
        let end = self.calendar.add_working_duration(allocation.start, duration);
        let shift = self.calendar.shift_for(allocation.start).name.clone();

        *sequence += 1;

        let op = ScheduleOperation {
            machine_id: allocation.machine_id,
            machine_type,
            label,
            quantity,
            unit: "米".to_string(),
            duration_hours: duration,
            start_time: allocation.start,
            end_time: end,
            shift,
            sequence: *sequence,
            setup_time: self.config.setup_hours,
            cleanup_time: self.config.cleanup_hours,
            priority: self.config.default_priority,
        };

        tracing::debug!(
            "已排 {}：機台 {}，{} → {}",
            op.label,
            op.machine_id,
            op.start_time,
            op.end_time
        );

        booked.push(op.clone());
        Ok(op)
    }

    /// 站別缺席警告
    fn stage_skipped(machine_type: MachineType) -> ScheduleWarning {
        tracing::warn!("站別 {} 無可用機台，記為缺席", machine_type);
        ScheduleWarning::warning(
            machine_type.operation_label().to_string(),
            format!("無可用機台: {}，站別記為缺席，後續站別照常排程", machine_type),
        )
    }

    /// 獲取工作日曆引用
    pub fn calendar(&self) -> &WorkingCalendar {
        &self.calendar
    }

    /// 獲取機台配置引用
    pub fn park(&self) -> &MachinePark {
        &self.park
    }
}
