pub mod aggregate;

pub use aggregate::{
    AdjustmentType, StockAdjustmentAck, StockAdjustmentForm, StockAdjustmentRequest, StockLevels,
};
