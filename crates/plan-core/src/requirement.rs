//! 材料需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單芯材料需求（依芯序排列，芯色標籤唯一）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRequirement {
    /// 芯色標籤
    pub color: String,

    /// 該芯線長（米）
    pub length: Decimal,

    /// 該芯銅材用量（kg，已取兩位）
    pub copper: Decimal,

    /// 該芯 PVC 用量（kg，已取兩位）
    pub pvc: Decimal,
}

/// 材料需求計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// 成品總線長（米）
    pub total_wire_length: Decimal,

    /// 單芯總線長（米）= 成品總線長 × 芯數
    pub total_single_core_length: Decimal,

    /// 銅材需求（kg）
    pub copper_required: Decimal,

    /// 絕緣 PVC 需求（kg）
    pub pvc_core_required: Decimal,

    /// 外被 PVC 需求（kg，整纜一次，不隨芯數倍增）
    pub pvc_sheath_required: Decimal,

    /// PVC 需求合計（kg）
    pub pvc_required: Decimal,

    /// 各芯明細
    pub color_breakdown: Vec<ColorRequirement>,
}

impl MaterialRequirement {
    /// 查找某芯色的明細
    pub fn color(&self, label: &str) -> Option<&ColorRequirement> {
        self.color_breakdown.iter().find(|c| c.color == label)
    }

    /// 序列化為 JSON 摘要（交付計劃存放服務的不透明資料塊）
    pub fn to_summary_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::PlanError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MaterialRequirement {
        MaterialRequirement {
            total_wire_length: Decimal::from(1500),
            total_single_core_length: Decimal::from(4500),
            copper_required: Decimal::new(15, 0),
            pvc_core_required: Decimal::new(9, 0),
            pvc_sheath_required: Decimal::new(3, 0),
            pvc_required: Decimal::new(12, 0),
            color_breakdown: vec![
                ColorRequirement {
                    color: "紅".to_string(),
                    length: Decimal::from(1500),
                    copper: Decimal::new(5, 0),
                    pvc: Decimal::new(3, 0),
                },
                ColorRequirement {
                    color: "藍".to_string(),
                    length: Decimal::from(1500),
                    copper: Decimal::new(5, 0),
                    pvc: Decimal::new(3, 0),
                },
            ],
        }
    }

    #[test]
    fn test_color_lookup() {
        let req = sample();
        assert!(req.color("紅").is_some());
        assert!(req.color("綠").is_none());
    }

    #[test]
    fn test_summary_json_round_trip() {
        let req = sample();
        let json = req.to_summary_json().unwrap();
        let parsed: MaterialRequirement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, req);
    }
}
