//! 產品規格快取

use std::collections::HashMap;

use plan_core::{CableSpec, PlanError, ProductCatalog};

use crate::dirty_tracking::DirtyTracker;

/// 產品規格快取
///
/// 呼叫方持有並傳遞；規格變更時標髒，標髒的條目不再供應，
/// 下次讀取會穿透到型錄重新載入。
#[derive(Debug, Clone, Default)]
pub struct SpecCache {
    entries: HashMap<String, CableSpec>,
    dirty: DirtyTracker,
}

impl SpecCache {
    /// 創建空快取
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            dirty: DirtyTracker::new(),
        }
    }

    /// 寫入快取（同時清除髒標記）
    pub fn insert(&mut self, spec: CableSpec) {
        self.dirty.clear_mark(&spec.product_code);
        self.entries.insert(spec.product_code.clone(), spec);
    }

    /// 讀取快取；標髒的條目視同不存在
    pub fn get(&self, product_code: &str) -> Option<&CableSpec> {
        if self.dirty.is_dirty(product_code) {
            return None;
        }
        self.entries.get(product_code)
    }

    /// 規格變更時標髒（下次讀取穿透到型錄）
    pub fn invalidate(&mut self, product_code: &str) {
        self.dirty.mark_dirty(product_code.to_string());
    }

    /// 清空快取
    pub fn clear(&mut self) {
        self.entries.clear();
        self.dirty.clear();
    }

    /// 快取條目數
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 檢查快取是否為空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 穿透讀取：快取命中直接返回，否則查型錄並回填
    ///
    /// 型錄也查無時返回 `ProductNotFound`，由呼叫方決定補救方式。
    pub fn resolve_through(
        &mut self,
        catalog: &dyn ProductCatalog,
        product_code: &str,
    ) -> plan_core::Result<CableSpec> {
        if let Some(spec) = self.get(product_code) {
            return Ok(spec.clone());
        }

        match catalog.resolve_spec(product_code) {
            Some(spec) => {
                self.insert(spec.clone());
                Ok(spec)
            }
            None => Err(PlanError::ProductNotFound(product_code.to_string())),
        }
    }
}
