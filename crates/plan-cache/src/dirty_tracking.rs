//! 髒標記追蹤

use std::collections::HashSet;

/// 髒標記追蹤器（以產品編號為鍵）
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_products: HashSet<String>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty_products: HashSet::new(),
        }
    }

    /// 標記產品為髒
    pub fn mark_dirty(&mut self, product_code: String) {
        self.dirty_products.insert(product_code);
    }

    /// 檢查產品是否為髒
    pub fn is_dirty(&self, product_code: &str) -> bool {
        self.dirty_products.contains(product_code)
    }

    /// 清除單一產品的髒標記（重新載入後呼叫）
    pub fn clear_mark(&mut self, product_code: &str) {
        self.dirty_products.remove(product_code);
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_products.clear();
    }

    /// 獲取所有髒產品
    pub fn dirty_products(&self) -> Vec<String> {
        self.dirty_products.iter().cloned().collect()
    }
}
