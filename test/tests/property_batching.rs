/// PROPERTY-BASED TESTS: batch writing invariants
///
/// Uses proptest to check, across random queues of events:
/// 1. The slot count matches the slots actually written, and the bytes
///    written are the header plus each slot's size
/// 2. Sent events are an in-order subset of the candidates
/// 3. Decoding a batch recovers every sent event's id, sequence & payload
/// 4. Deferred events keep their order when re-offered with new ones
/// 5. Every event past the first slot ends within the byte budget

use proptest::prelude::*;

use entity_events_serde::{BitReader, BitWriter};
use entity_events_shared::{
    sequence_less_than, EntityEvent, EventBatchConfig, EventBatchWriter,
    EVENT_BATCH_HEADER_BYTES,
};
use entity_events_test::{
    read_batch, write_events, DecodedSlot, PendingEvents, RecordingDiagnostics, TestEncoder,
    TestWorld, BLOB_EVENT,
};

// Option::None marks an event whose encoding fails
fn script_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0usize..300).prop_map(Some),
            1 => Just(None::<usize>),
        ],
        0..40,
    )
}

fn varint_bytes(length: usize) -> usize {
    let mut groups = 1;
    let mut value = length >> 7;
    while value > 0 {
        groups += 1;
        value >>= 7;
    }
    // 8 bits per group, continue bit included
    groups
}

struct Scenario {
    world: TestWorld,
    encoder: TestEncoder,
    diagnostics: RecordingDiagnostics,
    pending: PendingEvents,
}

impl Scenario {
    fn new(first_sequence: u16) -> Self {
        Self {
            world: TestWorld::new(),
            encoder: TestEncoder::new(),
            diagnostics: RecordingDiagnostics::new(),
            pending: PendingEvents::new(first_sequence),
        }
    }

    fn queue(&mut self, script: &[Option<usize>]) {
        for step in script {
            let entity = self.world.spawn();
            match step {
                Some(size) => self.encoder.set_payload_size(entity, *size),
                None => self.encoder.set_failing(entity),
            }
            self.pending
                .push(BLOB_EVENT, entity, &self.world, &self.diagnostics)
                .unwrap();
        }
    }
}

proptest! {
    #[test]
    fn prop_slot_accounting_matches_bytes(
        script in script_strategy(),
        first_sequence in any::<u16>(),
        budget in 16usize..2048,
    ) {
        let mut scenario = Scenario::new(first_sequence);
        scenario.queue(&script);
        let candidates = scenario.pending.candidates();

        let writer = EventBatchWriter::new(EventBatchConfig { max_buffer_bytes: budget, max_slots: u8::MAX });
        let mut output = BitWriter::new();
        let sent = write_events(&writer, &candidates, None, &scenario.encoder, &scenario.diagnostics, &mut output);

        if candidates.is_empty() {
            prop_assert!(output.is_empty());
            prop_assert!(sent.is_empty());
            return Ok(());
        }

        let total_bytes = output.byte_count();
        let bytes = output.to_bytes();
        let batch = read_batch(&mut BitReader::new(&bytes)).unwrap();

        let mut expected = EVENT_BATCH_HEADER_BYTES;
        for slot in &batch.slots {
            expected += match slot {
                DecodedSlot::Empty { .. } => 2,
                DecodedSlot::Event { payload, .. } => 2 + varint_bytes(payload.len()) + payload.len(),
            };
        }
        prop_assert_eq!(total_bytes, expected);
        prop_assert_eq!(batch.first_sequence, first_sequence);
        prop_assert!(batch.slots.len() <= candidates.len());

        // every failure written is also reported
        let empty_slots = batch.slots.iter().filter(|slot| slot.is_empty()).count();
        prop_assert_eq!(empty_slots, scenario.diagnostics.len());
        prop_assert_eq!(batch.slots.len() - empty_slots, sent.len());
    }

    #[test]
    fn prop_round_trip_recovers_sent_events(
        script in script_strategy(),
        first_sequence in any::<u16>(),
    ) {
        let mut scenario = Scenario::new(first_sequence);
        scenario.queue(&script);
        let candidates = scenario.pending.candidates();

        let mut output = BitWriter::new();
        let sent = write_events(&EventBatchWriter::default(), &candidates, None, &scenario.encoder, &scenario.diagnostics, &mut output);

        // sent events are the candidates, in order, minus failures & leftovers
        let mut remaining = candidates.iter();
        for event in &sent {
            prop_assert!(remaining.any(|candidate| candidate == event));
        }

        let bytes = output.to_bytes();
        if bytes.is_empty() {
            prop_assert!(sent.is_empty());
            return Ok(());
        }
        let batch = read_batch(&mut BitReader::new(&bytes)).unwrap();

        let decoded: Vec<_> = batch.events().cloned().collect();
        prop_assert_eq!(decoded.len(), sent.len());
        for (slot, event) in decoded.iter().zip(&sent) {
            let DecodedSlot::Event { sequence, entity_id, payload } = slot else {
                unreachable!("events() only yields event slots");
            };
            prop_assert_eq!(*sequence, event.sequence());
            prop_assert_eq!(*entity_id, event.entity_id());
            prop_assert_eq!(Some(payload), scenario.encoder.payload(&event.entity()));
        }
    }

    #[test]
    fn prop_deferred_events_keep_order(
        first in script_strategy(),
        second in script_strategy(),
        first_sequence in any::<u16>(),
    ) {
        let mut scenario = Scenario::new(first_sequence);
        scenario.queue(&first);
        let writer = EventBatchWriter::default();

        let mut output = BitWriter::new();
        let sent = write_events(&writer, &scenario.pending.candidates(), None, &scenario.encoder, &scenario.diagnostics, &mut output);
        scenario.pending.remove_sent(&sent);

        scenario.queue(&second);
        let candidates = scenario.pending.candidates();
        for pair in candidates.windows(2) {
            prop_assert!(sequence_less_than(pair[0].sequence(), pair[1].sequence()));
        }

        let mut output = BitWriter::new();
        let sent = write_events(&writer, &candidates, None, &scenario.encoder, &scenario.diagnostics, &mut output);
        let sequences: Vec<_> = sent.iter().map(EntityEvent::sequence).collect();
        for pair in sequences.windows(2) {
            prop_assert!(sequence_less_than(pair[0], pair[1]));
        }
    }

    #[test]
    fn prop_later_slots_stay_within_budget(
        script in script_strategy(),
        budget in 16usize..1024,
    ) {
        let mut scenario = Scenario::new(0);
        scenario.queue(&script);
        let candidates = scenario.pending.candidates();

        let writer = EventBatchWriter::new(EventBatchConfig { max_buffer_bytes: budget, max_slots: u8::MAX });
        let mut output = BitWriter::new();
        write_events(&writer, &candidates, None, &scenario.encoder, &scenario.diagnostics, &mut output);

        let bytes = output.to_bytes();
        if bytes.is_empty() {
            return Ok(());
        }
        let batch = read_batch(&mut BitReader::new(&bytes)).unwrap();

        // the header is outside the budget, empty slots are never checked
        let mut batch_bytes = 0;
        for (index, slot) in batch.slots.iter().enumerate() {
            batch_bytes += match slot {
                DecodedSlot::Empty { .. } => 2,
                DecodedSlot::Event { payload, .. } => 2 + varint_bytes(payload.len()) + payload.len(),
            };
            if index > 0 && !slot.is_empty() {
                prop_assert!(batch_bytes <= budget);
            }
        }

        // a multi-slot batch ending in an event stays within budget as a whole
        if batch.slots.len() > 1 && batch.slots.last().is_some_and(|slot| !slot.is_empty()) {
            prop_assert!(bytes.len() - EVENT_BATCH_HEADER_BYTES <= budget);
        }
    }

    #[test]
    fn prop_first_event_always_attempted(size in 0usize..5000, budget in 1usize..1024) {
        let mut scenario = Scenario::new(0);
        scenario.queue(&[Some(size), Some(1)]);
        let candidates = scenario.pending.candidates();

        let writer = EventBatchWriter::new(EventBatchConfig { max_buffer_bytes: budget, max_slots: u8::MAX });
        let mut output = BitWriter::new();
        let sent = write_events(&writer, &candidates, None, &scenario.encoder, &scenario.diagnostics, &mut output);

        prop_assert_eq!(sent.first(), candidates.first());
        let first_slot = 2 + varint_bytes(size) + size;
        let second_slot = 2 + 1 + 1;
        prop_assert_eq!(sent.len() == 2, first_slot + second_slot <= budget);
    }
}
