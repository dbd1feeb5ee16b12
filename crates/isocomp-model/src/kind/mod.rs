mod trigger;
pub use trigger::TriggerKind;
