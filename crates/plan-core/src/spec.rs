//! 電纜規格模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 電纜規格（已完成芯數/芯色解析）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    /// 產品編號
    pub product_code: String,

    /// 訂單數量（件）
    pub quantity: Decimal,

    /// 單件長度（米）
    pub length_per_piece: Decimal,

    /// 導體股數
    pub strand_count: u32,

    /// 單股導體線徑（mm）
    pub conductor_diameter: Decimal,

    /// 芯數（解析後，不低於 1）
    pub core_count: u32,

    /// 芯色列表（有序，長度不超過芯數；不足部分以預設名補齊）
    pub core_colors: Vec<String>,

    /// 絕緣外徑（mm）
    pub core_outer_diameter: Decimal,

    /// 外被外徑（mm）
    pub sheath_outer_diameter: Decimal,
}

impl CableSpec {
    /// 創建新的電纜規格
    pub fn new(product_code: impl Into<String>, quantity: Decimal, length_per_piece: Decimal) -> Self {
        Self {
            product_code: product_code.into(),
            quantity,
            length_per_piece,
            strand_count: 0,
            conductor_diameter: Decimal::ZERO,
            core_count: 1,
            core_colors: Vec::new(),
            core_outer_diameter: Decimal::ZERO,
            sheath_outer_diameter: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置導體股數與線徑
    pub fn with_conductor(mut self, strand_count: u32, conductor_diameter: Decimal) -> Self {
        self.strand_count = strand_count;
        self.conductor_diameter = conductor_diameter;
        self
    }

    /// 建構器模式：設置芯數與芯色（芯數自動鉗制到不低於 1）
    pub fn with_cores(mut self, core_count: u32, core_colors: Vec<String>) -> Self {
        self.core_count = core_count.max(1);
        self.core_colors = core_colors;
        self
    }

    /// 建構器模式：設置絕緣外徑與外被外徑
    pub fn with_diameters(mut self, core_outer: Decimal, sheath_outer: Decimal) -> Self {
        self.core_outer_diameter = core_outer;
        self.sheath_outer_diameter = sheath_outer;
        self
    }

    /// 第 index 芯的標籤（超出芯色列表時合成預設名）
    pub fn core_label(&self, index: usize) -> String {
        core_label(&self.core_colors, index)
    }
}

/// 解析芯數與芯色
///
/// 回退鏈：表單輸入芯色 → 型錄芯色 → 以申報芯數合成預設名。
/// 此順序是業務邏輯的一部分，不可調整。芯數不低於 1。
pub fn resolve_cores(
    form_colors: &[String],
    catalog_colors: &[String],
    declared_core_count: Option<u32>,
) -> (u32, Vec<String>) {
    let colors: Vec<String> = if !form_colors.is_empty() {
        form_colors.to_vec()
    } else if !catalog_colors.is_empty() {
        catalog_colors.to_vec()
    } else {
        Vec::new()
    };

    let core_count = if colors.is_empty() {
        declared_core_count.unwrap_or(1).max(1)
    } else {
        colors.len() as u32
    };

    (core_count, colors)
}

/// 第 index 芯的標籤（芯色不足時合成 "Core N"）
pub fn core_label(core_colors: &[String], index: usize) -> String {
    core_colors
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("Core {}", index + 1))
}
