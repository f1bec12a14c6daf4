pub mod batch_writer;
pub mod entity_event;
pub mod entity_validator;
pub mod error;
pub mod event_encoder;
