//! # Entity Events Shared
//! Turns queues of pending per-entity events into size-bounded packet bodies
//! whose event numbering a receiver can follow slot by slot.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod config;
mod constants;
mod diagnostics;
mod events;
mod types;
mod wrapping_number;

pub use entity_events_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr,
    UnsignedInteger, UnsignedVariableInteger,
};

pub use config::EventBatchConfig;
pub use constants::{EVENT_BATCH_HEADER_BYTES, MAX_EVENT_BUFFER_BYTES};
pub use diagnostics::{DiagnosticsSink, LogDiagnostics, ReportOnce};
pub use events::{
    batch_writer::EventBatchWriter,
    entity_event::EntityEvent,
    entity_validator::{EntityLookup, EntityState, EntityValidator},
    error::{EncodeError, EntityValidationError},
    event_encoder::{EventEncoder, EventEncoders},
};
pub use types::{EntityId, EventKind, EventSequence};
pub use wrapping_number::{sequence_greater_than, sequence_less_than};
