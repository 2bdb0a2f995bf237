pub mod u101_low_stock_check;
