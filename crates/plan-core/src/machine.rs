//! 機台配置模型

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 機台類型（對應四個生產站別）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    /// 束絞機
    Bunching,
    /// 絕緣押出機
    Extruder,
    /// 成纜機
    Laying,
    /// 外被押出機
    FinalExtruder,
}

impl MachineType {
    /// 站別工序名稱
    pub fn operation_label(&self) -> &'static str {
        match self {
            MachineType::Bunching => "束絞",
            MachineType::Extruder => "絕緣押出",
            MachineType::Laying => "成纜",
            MachineType::FinalExtruder => "外被押出",
        }
    }
}

impl std::fmt::Display for MachineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MachineType::Bunching => "Bunching",
            MachineType::Extruder => "Extruder",
            MachineType::Laying => "Laying",
            MachineType::FinalExtruder => "FinalExtruder",
        };
        write!(f, "{}", name)
    }
}

/// 機台
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// 機台編號
    pub id: String,

    /// 機台類型
    pub machine_type: MachineType,

    /// 產能（米/小時）
    pub capacity: Decimal,

    /// 稼動率（僅供參考，不參與排程計算）
    pub efficiency: Decimal,

    /// 保養日（該週日不可排程）
    pub maintenance_day: Option<Weekday>,
}

impl Machine {
    /// 創建新的機台
    pub fn new(id: impl Into<String>, machine_type: MachineType, capacity: Decimal) -> Self {
        Self {
            id: id.into(),
            machine_type,
            capacity,
            efficiency: Decimal::ONE,
            maintenance_day: None,
        }
    }

    /// 建構器模式：設置稼動率
    pub fn with_efficiency(mut self, efficiency: Decimal) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// 建構器模式：設置保養日
    pub fn with_maintenance_day(mut self, day: Weekday) -> Self {
        self.maintenance_day = Some(day);
        self
    }
}

/// 機台群（注入的靜態配置；列表順序即配置順序，為分配平手時的決勝依據）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachinePark {
    machines: Vec<Machine>,
}

impl MachinePark {
    /// 創建空的機台群
    pub fn new() -> Self {
        Self { machines: Vec::new() }
    }

    /// 建構器模式：添加機台
    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machines.push(machine);
        self
    }

    /// 添加機台
    pub fn add_machine(&mut self, machine: Machine) {
        self.machines.push(machine);
    }

    /// 依配置順序列出某類型的機台
    pub fn machines_of(&self, machine_type: MachineType) -> impl Iterator<Item = &Machine> {
        self.machines
            .iter()
            .filter(move |m| m.machine_type == machine_type)
    }

    /// 檢查某類型是否至少配置了一台機台
    pub fn has_type(&self, machine_type: MachineType) -> bool {
        self.machines_of(machine_type).next().is_some()
    }

    /// 全部機台
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }
}
