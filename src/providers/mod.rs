pub mod binance;
pub mod exchangerate;
