//! The frame processor: the state machine that owns the accumulation
//! buffer, searches for sync, identifies frames, extracts fields into the
//! value map, and packs outgoing frames.

use std::collections::BTreeMap;

use bytes::{Buf, BytesMut};
use frameforge_proto::codec::{extract_field, find_subslice, insert_field, IntCodec};
use frameforge_proto::{FieldPayload, FieldTag, FrameMap, FrameSchema, MAX_DATA_BYTES};

use crate::callbacks::{accept_all_checker, ChecksumCallbacks, ChecksumValue, FrameChecker, NewMessageFunc};
use crate::error::{FatalError, FrameError, NonFatalError};
use crate::transceiver::Transceiver;
use crate::value_map::{StampedPayload, Timestamp, ValueMap};

/// Capacity of the processor's accumulation buffer. Bytes received beyond
/// this bound are dropped rather than grown into, an intentional
/// bounded-memory policy rather than an oversight.
pub const PROCESSOR_BUFFER_SIZE: usize = 4096;

/// The schema-driven byte framing state machine.
///
/// Owns its transceiver exclusively: once handed to a processor, nothing
/// else may call `send`/`recv` on it directly.
pub struct FrameProcessor<T: Transceiver> {
    transceiver: T,
    buffer: BytesMut,
    frame_map: FrameMap,
    sync_value: Vec<u8>,
    checker: FrameChecker,
    checksum: ChecksumCallbacks,
    new_msg_func: Option<NewMessageFunc>,
    value_map: ValueMap,
    failed_of_last_ten: u16,
    failed_of_last_ten_counter: u16,
    total_of_last_ten_counter: u16,
}

impl<T: Transceiver> FrameProcessor<T> {
    /// Construct a processor.
    ///
    /// Initializes `transceiver`, validates `schemas` against `sync_value`,
    /// and seeds the value map with the sync entry.
    ///
    /// # Errors
    ///
    /// Non-fatally if any schema has no `SYNC` field at all (the cheapest
    /// possible misconfiguration, recoverable by reconfiguring and retrying
    /// construction). Fatally if the transceiver fails to initialize, or if
    /// the schemas otherwise fail structural validation (empty map, default
    /// frame id absent, misaligned `SYNC`/`FRAME` runs across schemas, a
    /// schema's `SYNC` run length disagreeing with `sync_value`, and so on
    /// — see [`frameforge_proto::SchemaError`]).
    pub fn new(
        mut transceiver: T,
        schemas: BTreeMap<u8, FrameSchema>,
        default_frame_id: u8,
        sync_value: Vec<u8>,
        checker: Option<FrameChecker>,
        checksum: ChecksumCallbacks,
    ) -> Result<Self, FrameError> {
        if !transceiver.init() {
            return Err(FatalError::TransceiverInitFailed.into());
        }

        for (&frame_id, schema) in &schemas {
            if schema.offset_of(FieldTag::SYNC).is_none() {
                return Err(NonFatalError::MissingSyncField(frame_id).into());
            }
        }

        if sync_value.is_empty() || sync_value.len() >= MAX_DATA_BYTES {
            return Err(FatalError::InvalidConfiguration(
                frameforge_proto::SchemaError::InvalidSyncValueLength(sync_value.len()),
            )
            .into());
        }

        let frame_map = FrameMap::new(schemas, default_frame_id, sync_value.len())
            .map_err(FatalError::InvalidConfiguration)?;

        let sync_payload = FieldPayload::new(&sync_value).map_err(FatalError::InvalidConfiguration)?;
        let value_map = ValueMap::seeded_with(FieldTag::SYNC, sync_payload, Timestamp::ZERO);

        Ok(Self {
            transceiver,
            buffer: BytesMut::with_capacity(PROCESSOR_BUFFER_SIZE),
            frame_map,
            sync_value,
            checker: checker.unwrap_or_else(accept_all_checker),
            checksum,
            new_msg_func: None,
            value_map,
            failed_of_last_ten: 0,
            failed_of_last_ten_counter: 0,
            total_of_last_ten_counter: 0,
        })
    }

    /// Install the callback fired after every successful decode.
    pub fn set_new_msg_callback(&mut self, f: NewMessageFunc) {
        self.new_msg_func = Some(f);
    }

    /// Drain the transceiver once, append to the accumulation buffer, and
    /// process every complete frame currently available.
    ///
    /// A single call performs at most one `recv`; callers must invoke this
    /// often enough that the transceiver's own internal buffering (if any)
    /// does not overflow between calls.
    pub fn update(&mut self, now: Timestamp) {
        let mut scratch = [0u8; PROCESSOR_BUFFER_SIZE];
        let received = self.transceiver.recv(&mut scratch);
        if received == 0 {
            return;
        }

        let room = PROCESSOR_BUFFER_SIZE.saturating_sub(self.buffer.len());
        let take = received.min(room);
        if take < received {
            tracing::warn!(
                dropped = received - take,
                "accumulation buffer full, dropping received bytes"
            );
        }
        self.buffer.extend_from_slice(&scratch[..take]);

        while let Some(sync_location) = find_subslice(&self.buffer, &self.sync_value) {
            if !self.process_one_candidate(sync_location, now) {
                return;
            }
        }
    }

    /// Process the frame candidate anchored at `sync_location`.
    ///
    /// Returns `false` if the buffer does not yet hold enough bytes to
    /// decide (the caller should stop looping and wait for more input),
    /// `true` if it consumed bytes and the caller should look for the next
    /// sync candidate.
    fn process_one_candidate(&mut self, sync_location: usize, now: Timestamp) -> bool {
        let default_schema = self.frame_map.default_schema().clone();
        let msg_start_offset_from_sync = default_schema
            .offset_of(FieldTag::SYNC)
            .expect("frame map construction guarantees every schema has a SYNC field");

        // The derived start of the message precedes the buffer origin: the
        // pre-sync prefix this schema expects has been truncated. Treat the
        // candidate as malformed rather than underflow the subtraction.
        let offset_ok = msg_start_offset_from_sync <= sync_location;
        let msg_start = if offset_ok { sync_location - msg_start_offset_from_sync } else { 0 };

        let mut working_schema = default_schema;
        let mut working_len = working_schema.len();

        if self.buffer.len() < msg_start + working_len {
            return false;
        }

        let mut has_frame_to_use = true;
        if self.frame_map.is_multi_frame() {
            let mut frame_id_buf = [0u8; MAX_DATA_BYTES];
            let n = extract_field(
                &self.buffer[msg_start..],
                &working_schema,
                FieldTag::FRAME,
                &mut frame_id_buf,
            );
            if n > 0 {
                let frame_id = u8::from_be_bytes_truncated(&frame_id_buf[..n]);
                match self.frame_map.schema(frame_id).cloned() {
                    None => has_frame_to_use = false,
                    Some(schema) => {
                        working_len = schema.len();
                        working_schema = schema;
                        if self.buffer.len() < msg_start + working_len {
                            return false;
                        }
                    },
                }
            }
        }

        let msg_end = msg_start + working_len;
        let msg_bytes = self.buffer[msg_start..msg_end].to_vec();
        let passes_checker = (self.checker)(&msg_bytes, &working_schema);
        let passes_checksum = self.evaluate_checksum(&msg_bytes, &working_schema);

        self.total_of_last_ten_counter += 1;
        let advance_to = if offset_ok && has_frame_to_use && passes_checker && passes_checksum {
            self.accept_frame(&msg_bytes, &working_schema, now);
            msg_end
        } else {
            self.failed_of_last_ten_counter += 1;
            sync_location + 1
        };

        if self.total_of_last_ten_counter >= 10 {
            self.failed_of_last_ten = self.failed_of_last_ten_counter;
            self.failed_of_last_ten_counter = 0;
            self.total_of_last_ten_counter = 0;
        }

        self.drain_through(advance_to);
        true
    }

    fn evaluate_checksum(&self, msg_bytes: &[u8], schema: &FrameSchema) -> bool {
        let Some(evaluator) = &self.checksum.evaluator else { return true };
        let mut buf = [0u8; MAX_DATA_BYTES];
        let n = extract_field(msg_bytes, schema, FieldTag::CHECKSUM, &mut buf);
        let decoded = ChecksumValue::from_be_bytes_truncated(&buf[..n]);
        evaluator(msg_bytes, decoded)
    }

    fn accept_frame(&mut self, msg_bytes: &[u8], schema: &FrameSchema, now: Timestamp) {
        let mut touched = Vec::new();
        self.value_map.with_locked(|values| {
            for &tag in schema.tags() {
                values.entry(tag).or_default();
            }

            for (&tag, stamped) in values.iter_mut() {
                let mut field_buf = [0u8; MAX_DATA_BYTES];
                let n = extract_field(msg_bytes, schema, tag, &mut field_buf);
                if n > 0 {
                    *stamped = StampedPayload {
                        payload: FieldPayload::from_extracted(&field_buf[..n]),
                        timestamp: now,
                    };
                    touched.push((tag, *stamped));
                }
            }
        });

        if let Some(callback) = &mut self.new_msg_func {
            callback(&touched);
        }
    }

    /// Remove `[0, through)` from the accumulation buffer.
    ///
    /// `BytesMut::advance` moves the internal read cursor forward without
    /// copying the remainder down, the linear-buffer compaction strategy
    /// spec.md §9 calls for in place of a ring buffer.
    fn drain_through(&mut self, through: usize) {
        let through = through.min(self.buffer.len());
        self.buffer.advance(through);
    }

    /// Compose the outbound layout for `frame_id` from the value map and
    /// hand it to the transceiver.
    ///
    /// # Errors
    ///
    /// Non-fatally if `frame_id` is not in the frame map, or if the schema
    /// references a non-builtin field with no entry in the value map.
    pub fn send(&mut self, frame_id: u8) -> Result<(), NonFatalError> {
        let Some(schema) = self.frame_map.schema(frame_id).cloned() else {
            return Err(NonFatalError::UnknownFrameId(frame_id));
        };

        let mut distinct_tags: Vec<FieldTag> = schema.tags().to_vec();
        distinct_tags.sort_by_key(tag_sort_key);
        distinct_tags.dedup();

        let mut out = vec![0u8; schema.len()];
        for tag in distinct_tags {
            let bytes = self.field_bytes_for_send(tag, frame_id)?;
            insert_field(&mut out, &schema, tag, bytes.as_slice());
        }

        if let Some(generator) = &self.checksum.generator {
            let checksum = generator(&out);
            let mut checksum_buf = [0u8; MAX_DATA_BYTES];
            let n = checksum.write_be_bytes(&mut checksum_buf);
            insert_field(&mut out, &schema, FieldTag::CHECKSUM, &checksum_buf[..n]);
        }

        self.transceiver.send(&out);
        Ok(())
    }

    fn field_bytes_for_send(&self, tag: FieldTag, frame_id: u8) -> Result<FieldPayload, NonFatalError> {
        if self.value_map.has_data_for_field(tag) {
            return Ok(self.value_map.get_field(tag).payload);
        }

        match tag {
            FieldTag::SYNC => FieldPayload::new(&self.sync_value)
                .map_err(|_| NonFatalError::MissingFieldForSend { frame_id, field: tag }),
            FieldTag::FRAME => {
                let mut buf = [0u8; MAX_DATA_BYTES];
                let n = frame_id.write_be_bytes(&mut buf);
                Ok(FieldPayload::from_extracted(&buf[..n]))
            },
            FieldTag::CHECKSUM => {
                // filled in after the rest of the frame is packed
                Ok(FieldPayload::default())
            },
            _ => Err(NonFatalError::MissingFieldForSend { frame_id, field: tag }),
        }
    }

    /// True if `field` has an entry in the value map.
    #[must_use]
    pub fn has_data_for_field(&self, field: FieldTag) -> bool {
        self.value_map.has_data_for_field(field)
    }

    /// The current value of `field`, or the zero-length default.
    #[must_use]
    pub fn get_field(&self, field: FieldTag) -> StampedPayload {
        self.value_map.get_field(field)
    }

    /// Insert or overwrite `field`.
    pub fn set_field(&self, field: FieldTag, payload: FieldPayload, now: Timestamp) {
        self.value_map.set_field(field, payload, now);
    }

    /// Failure count from the most recently completed group of ten
    /// processed messages.
    #[must_use]
    pub fn failed_of_last_ten_messages(&self) -> u16 {
        self.failed_of_last_ten
    }
}

impl<T: Transceiver> Drop for FrameProcessor<T> {
    fn drop(&mut self) {
        self.transceiver.deinit();
    }
}

/// Order builtins before user tags, matching the original's use of an
/// ordered `set<SerialFieldId>` where reserved tags sort last as large
/// sentinel integers; here we only need *a* stable order, not that one, so
/// we sort builtins first for readability in generated wire dumps.
fn tag_sort_key(tag: &FieldTag) -> (u8, i32) {
    match tag {
        FieldTag::User(id) => (0, *id),
        FieldTag::Builtin(b) => (1, b.raw()),
    }
}
