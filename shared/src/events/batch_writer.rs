use std::fmt::Debug;

use log::{debug, trace, warn};

use entity_events_serde::{BitCounter, BitWrite, BitWriter, Serde, UnsignedVariableInteger};

use crate::{
    config::EventBatchConfig,
    diagnostics::DiagnosticsSink,
    events::{entity_event::EntityEvent, event_encoder::EventEncoder},
    types::EntityId,
    wrapping_number::sequence_greater_than,
};

/// Writes queued entity events into a packet as one batch.
///
/// A batch is laid out as:
/// - sequence of the first event attempted (u16)
/// - slot count (u8)
/// - per slot: entity id (u16), payload length (variable, 7-bit groups),
///   payload bytes, padding to the next byte
///
/// A slot whose event failed to encode holds only the null entity id and
/// padding. It still counts, so the receiver can number every slot as
/// `first + index`.
pub struct EventBatchWriter {
    config: EventBatchConfig,
}

impl EventBatchWriter {
    pub fn new(config: EventBatchConfig) -> Self {
        Self { config }
    }

    /// Writes as many of `candidates` as fit into `output`, returning those
    /// that were sent.
    ///
    /// `candidates` must be ordered by ascending sequence. Events that failed
    /// to encode, or that were left out for lack of room, are not returned and
    /// should be offered again on the next call. Writing stops at the first
    /// event that doesn't fit, except that an event landing in the batch's
    /// first slot is always written however large it is. A failed event that
    /// took the first slot ends that exemption. Nothing at all is written if
    /// no slot was filled. A non-empty batch starts on the next byte boundary
    /// of `output`.
    pub fn write_batch<E: Copy + Debug, R>(
        &self,
        candidates: &[EntityEvent<E>],
        recipient: Option<&R>,
        encoder: &dyn EventEncoder<E, R>,
        diagnostics: &dyn DiagnosticsSink,
        output: &mut BitWriter,
    ) -> Vec<EntityEvent<E>> {
        let mut committed = Vec::new();

        let Some(first_event) = candidates.first() else {
            return committed;
        };

        let max_bits = u32::try_from(self.config.max_buffer_bytes.saturating_mul(8))
            .unwrap_or(u32::MAX);

        let mut batch_writer = BitWriter::new();
        let mut event_writer = BitWriter::new();
        let mut slot_count: u8 = 0;
        let mut last_sequence = None;

        for event in candidates {
            if slot_count >= self.config.max_slots {
                trace!(
                    "Event batch reached {} slots, deferring event {}",
                    slot_count,
                    event.sequence()
                );
                break;
            }

            debug_assert!(
                last_sequence.map_or(true, |last| sequence_greater_than(event.sequence(), last)),
                "entity events must be offered in ascending sequence order"
            );
            last_sequence = Some(event.sequence());

            event_writer.clear();
            if let Err(error) = encoder.encode(event, recipient, &mut event_writer) {
                diagnostics.report(
                    &format!(
                        "Failed to write an event for the entity {:?} (id {})",
                        event.entity(),
                        event.entity_id()
                    ),
                    Some(&error),
                );
                debug!(
                    "Event {} for entity {} failed to encode, writing empty slot",
                    event.sequence(),
                    event.entity_id()
                );

                Self::write_empty_slot(&mut batch_writer);
                slot_count += 1;
                continue;
            }
            event_writer.pad_to_byte();
            let payload = event_writer.bytes();

            // check that the slot fits next to what the packet already holds
            let start_bits = u32::try_from((output.byte_count() + batch_writer.byte_count()) * 8)
                .unwrap_or(u32::MAX);
            let mut counter = BitCounter::new(start_bits, max_bits);
            Self::write_slot(&mut counter, event.entity_id(), payload);
            if counter.overflowed() {
                if slot_count > 0 {
                    trace!(
                        "No room left for event {} ({} bits), deferring it",
                        event.sequence(),
                        counter.bits_needed()
                    );
                    break;
                }

                // first slot, so send it anyway or it would never go out
                warn!(
                    "Event {} for entity {} requires {} bits, but the packet only has {} bits available! Sending it over budget.",
                    event.sequence(),
                    event.entity_id(),
                    counter.bits_needed(),
                    max_bits.saturating_sub(start_bits)
                );
            }

            Self::write_slot(&mut batch_writer, event.entity_id(), payload);
            committed.push(*event);
            slot_count += 1;
        }

        if slot_count == 0 {
            return committed;
        }

        // slot padding assumes the batch starts on a byte boundary
        output.pad_to_byte();
        first_event.sequence().ser(output);
        slot_count.ser(output);
        output.write_bytes(batch_writer.bytes());

        debug!(
            "Wrote entity event batch from {}: {} slots, {} sent, {} bytes",
            first_event.sequence(),
            slot_count,
            committed.len(),
            batch_writer.byte_count()
        );

        committed
    }

    fn write_slot(writer: &mut dyn BitWrite, entity_id: EntityId, payload: &[u8]) {
        entity_id.ser(writer);
        UnsignedVariableInteger::<7>::new(payload.len() as u64).ser(writer);
        if writer.is_counter() {
            writer.count_bits((payload.len() as u32).saturating_mul(8));
        } else {
            writer.write_bytes(payload);
        }
        writer.pad_to_byte();
    }

    fn write_empty_slot(writer: &mut dyn BitWrite) {
        EntityId::NULL.ser(writer);
        writer.pad_to_byte();
    }
}

impl Default for EventBatchWriter {
    fn default() -> Self {
        Self::new(EventBatchConfig::default())
    }
}
