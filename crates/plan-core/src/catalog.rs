//! 產品型錄介面
//!
//! 上游協作方的唯讀查詢接縫；核心引擎本身不做任何快取。

use std::collections::HashMap;

use crate::spec::CableSpec;

/// 產品型錄（上游唯讀查詢）
pub trait ProductCatalog {
    /// 依產品編號解析電纜規格；查無時返回 None，由呼叫方決定如何補救
    fn resolve_spec(&self, product_code: &str) -> Option<CableSpec>;
}

/// 記憶體內型錄（測試與小型部署用）
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    specs: HashMap<String, CableSpec>,
}

impl InMemoryCatalog {
    /// 創建空型錄
    pub fn new() -> Self {
        Self { specs: HashMap::new() }
    }

    /// 建構器模式：登錄規格
    pub fn with_spec(mut self, spec: CableSpec) -> Self {
        self.specs.insert(spec.product_code.clone(), spec);
        self
    }

    /// 登錄規格
    pub fn insert(&mut self, spec: CableSpec) {
        self.specs.insert(spec.product_code.clone(), spec);
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn resolve_spec(&self, product_code: &str) -> Option<CableSpec> {
        self.specs.get(product_code).cloned()
    }
}
