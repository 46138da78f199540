// Vehicle motion models

pub mod bicycle;

pub use bicycle::*;
