pub mod classify;
pub mod engine;
pub mod extract;
pub mod networks;
pub mod pipeline;
pub mod report;
pub mod verify;

pub use crate::domain::model::{
    Category, ClassifiedSet, FilterOutcome, FilterSummary, RankedDomains, ResolutionOutcome,
    TrafficRecord,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Resolver, Storage};
pub use crate::utils::error::Result;
