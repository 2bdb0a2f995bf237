use serde::{Deserialize, Serialize};

/// Что синхронизировать с маркетплейсом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncKind {
    /// Каталог товаров (новые и изменённые объявления)
    Products,
    /// Остатки на складе фулфилмента
    Stock,
}

impl SyncKind {
    pub fn code(&self) -> &'static str {
        match self {
            SyncKind::Products => "products",
            SyncKind::Stock => "stock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SyncKind::Products => "Синхронизация товаров",
            SyncKind::Stock => "Синхронизация остатков",
        }
    }
}

impl std::fmt::Display for SyncKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
