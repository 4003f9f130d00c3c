//! 材料需求計算

use plan_core::{round2, CableSpec, ColorRequirement, MaterialRequirement, PlanError};
use rust_decimal::Decimal;

/// 銅材密度係數
const COPPER_FACTOR: Decimal = Decimal::from_parts(703, 0, 0, false, 3); // 0.703

/// 絞合損耗係數
const STRANDING_LOSS: Decimal = Decimal::from_parts(102, 0, 0, false, 2); // 1.02

/// 截面積係數（π/4 取近似）
const AREA_FACTOR: Decimal = Decimal::from_parts(785, 0, 0, false, 3); // 0.785

/// PVC 密度係數（0.162 / 100）
const PVC_FACTOR: Decimal = Decimal::from_parts(162, 0, 0, false, 5); // 0.00162

/// 材料需求計算器
pub struct MaterialCalculator;

impl MaterialCalculator {
    /// 計算材料需求
    ///
    /// 純函數：相同規格必得相同結果。數量/長度/芯數不合法時返回
    /// `InvalidInput`，不產生部分結果。
    pub fn calculate(spec: &CableSpec) -> plan_core::Result<MaterialRequirement> {
        Self::validate(spec)?;

        tracing::debug!(
            "計算材料需求：產品 {}，數量 {}，{} 芯",
            spec.product_code,
            spec.quantity,
            spec.core_count
        );

        let strand_count = Decimal::from(spec.strand_count);
        let core_count = Decimal::from(spec.core_count);

        // 總線長
        let total_wire_length = spec.quantity * spec.length_per_piece;
        let total_single_core_length = total_wire_length * core_count;

        // 銅材：每芯 = 0.703 × 股數 × 線徑² × 1.02 × 總線長 / 100
        let conductor_section = strand_count * spec.conductor_diameter * spec.conductor_diameter;
        let copper_per_core =
            COPPER_FACTOR * conductor_section * STRANDING_LOSS * total_wire_length / Decimal::ONE_HUNDRED;

        // 絕緣 PVC：截面差不足時取零，不得為負
        let core_od_sq = spec.core_outer_diameter * spec.core_outer_diameter;
        let pvc_core_area = (core_od_sq - conductor_section).max(Decimal::ZERO);
        let pvc_per_core = AREA_FACTOR * pvc_core_area * PVC_FACTOR * total_wire_length;

        // 外被 PVC：整纜一次，不隨芯數倍增
        let sheath_od_sq = spec.sheath_outer_diameter * spec.sheath_outer_diameter;
        let pvc_sheath_area = (sheath_od_sq - core_od_sq).max(Decimal::ZERO);
        let pvc_sheath_required = AREA_FACTOR * pvc_sheath_area * PVC_FACTOR * total_wire_length;

        let copper_required = copper_per_core * core_count;
        let pvc_core_required = pvc_per_core * core_count;
        let pvc_required = pvc_core_required + pvc_sheath_required;

        // 各芯明細：取前 core_count 個解析後的芯色標籤
        let color_breakdown = (0..spec.core_count as usize)
            .map(|index| ColorRequirement {
                color: spec.core_label(index),
                length: total_wire_length,
                copper: round2(copper_per_core),
                pvc: round2(pvc_per_core),
            })
            .collect();

        Ok(MaterialRequirement {
            total_wire_length,
            total_single_core_length,
            copper_required,
            pvc_core_required,
            pvc_sheath_required,
            pvc_required,
            color_breakdown,
        })
    }

    /// 輸入驗證
    fn validate(spec: &CableSpec) -> plan_core::Result<()> {
        if spec.quantity <= Decimal::ZERO {
            return Err(PlanError::InvalidInput(format!(
                "訂單數量必須為正數: {}",
                spec.quantity
            )));
        }
        if spec.length_per_piece <= Decimal::ZERO {
            return Err(PlanError::InvalidInput(format!(
                "單件長度必須為正數: {}",
                spec.length_per_piece
            )));
        }
        if spec.core_count < 1 {
            return Err(PlanError::InvalidInput(format!(
                "芯數不得低於 1: {}",
                spec.core_count
            )));
        }
        if spec.conductor_diameter < Decimal::ZERO
            || spec.core_outer_diameter < Decimal::ZERO
            || spec.sheath_outer_diameter < Decimal::ZERO
        {
            return Err(PlanError::InvalidInput("線徑/外徑不得為負數".to_string()));
        }
        Ok(())
    }
}
