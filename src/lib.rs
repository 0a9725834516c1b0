pub use crate::errors::ChronopathError;

pub mod calendar;
pub mod cli;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod panel;
pub mod path;
pub mod resolve;
pub mod write;

pub mod prelude {
    pub use crate::calendar::{CalendarProps, DateChange};
    pub use crate::engine::{Engine, Scene, WriteOutcome};
    pub use crate::errors::ChronopathError;
    pub use crate::graph::{AnimationData, Driver, Keyframe, ObjectNode, Value};
    pub use crate::panel::{DayCell, MonthGrid, WeekRow};
    pub use crate::path::{PropertyPath, Segment};
    pub use crate::resolve::{
        Accessor, Resolution, ResolvedSlot, Resolver, RootChoice, RootRegistry,
    };
    pub use crate::write::{request_keyframe, write_slot};
}
