pub mod date_utils;
pub mod decimal_utils;
