//! # Material Requirement Calculation
//!
//! 材料需求計算引擎

pub mod material;

// Re-export 主要類型
pub use material::MaterialCalculator;
