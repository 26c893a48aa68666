//! Order lifecycle engine

pub mod lifecycle;

pub use lifecycle::{
    DisplayState, LifecycleError, ModifyOutcome, OrderDraft, create_order, derive_display_state,
    elapsed_minutes, modify_order, rate_order, set_status_by_vendor,
};
