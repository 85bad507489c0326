pub mod export;
pub mod presenter;

pub use crate::domain::model::{LoadingStates, Presentation};
pub use crate::domain::ports::{ConfigProvider, ContentGenerator, Storage};
pub use crate::utils::error::Result;
