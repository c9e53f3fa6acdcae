//! # Event Scripts
//!
//! Replays a recorded stream of host events against a [`BoardSession`].
//!
//! A script is a JSON array of events tagged by `event`:
//!
//! ```json
//! [
//!   { "event": "click", "item": "task-1" },
//!   { "event": "click", "item": "task-3", "modifiers": { "meta": true } },
//!   { "event": "drag_start", "item": "task-3" },
//!   { "event": "drag_end", "destination": { "columnId": "done", "index": 0 } }
//! ]
//! ```
//!
//! Item events that the session does not consume fall through to the window,
//! the same way an unhandled DOM event bubbles: an ignored click becomes a
//! pointer down outside, an ignored key becomes an outside key press.

use multidrag_core::{
    BoardError, BoardSession, DragStart, DraggableLocation, DropReason, DropResult, ItemGesture,
    ItemId, Modifiers, OutsideGesture,
};
use serde::{Deserialize, Serialize};

/// Maximum number of events in one script.
pub const MAX_SCRIPT_EVENTS: usize = 10_000;

// =============================================================================
// EVENTS
// =============================================================================

/// One recorded host event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Mouse click on an item.
    Click {
        item: ItemId,
        #[serde(default)]
        button: u16,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Key press, on the focused item or on the window.
    Key {
        #[serde(default)]
        item: Option<ItemId>,
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Touch released, on an item or on the window.
    Touch {
        #[serde(default)]
        item: Option<ItemId>,
    },
    /// Pointer pressed away from every item.
    PointerDown,
    /// Drag lifted an item.
    DragStart { item: ItemId },
    /// Drag finished.
    DragEnd {
        #[serde(default)]
        destination: Option<DraggableLocation>,
        #[serde(default)]
        reason: DropReason,
    },
}

/// Parse a JSON script.
pub fn parse_script(data: &[u8]) -> Result<Vec<HostEvent>, BoardError> {
    let events: Vec<HostEvent> = serde_json::from_slice(data)
        .map_err(|e| BoardError::SerializationError(format!("script: {}", e)))?;

    if events.len() > MAX_SCRIPT_EVENTS {
        return Err(BoardError::SerializationError(format!(
            "Event count {} exceeds maximum allowed {}",
            events.len(),
            MAX_SCRIPT_EVENTS
        )));
    }
    Ok(events)
}

// =============================================================================
// REPLAY
// =============================================================================

/// Counters collected while replaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub drops: usize,
    pub cancelled: usize,
}

/// Feeds events into a session, tracking the drag in flight.
#[derive(Debug)]
pub struct Replayer {
    session: BoardSession,
    pending: Option<DragStart>,
    report: ReplayReport,
}

impl Replayer {
    #[must_use]
    pub fn new(session: BoardSession) -> Self {
        Self {
            session,
            pending: None,
            report: ReplayReport::default(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    #[must_use]
    pub fn report(&self) -> ReplayReport {
        self.report
    }

    /// Finish the replay. Fails if a drag was left open.
    pub fn finish(self) -> Result<(BoardSession, ReplayReport), BoardError> {
        if let Some(start) = self.pending {
            return Err(BoardError::InvariantViolation(format!(
                "drag of {} never ended",
                start.draggable_id
            )));
        }
        Ok((self.session, self.report))
    }

    /// Apply every event in order, stopping at the first failure.
    pub fn run(&mut self, events: &[HostEvent]) -> Result<(), BoardError> {
        for (n, event) in events.iter().enumerate() {
            self.apply(event)
                .inspect_err(|e| tracing::warn!(event = n, error = %e, "replay stopped"))?;
        }
        Ok(())
    }

    /// Apply one event.
    pub fn apply(&mut self, event: &HostEvent) -> Result<(), BoardError> {
        self.report.events += 1;

        match event {
            HostEvent::Click {
                item,
                button,
                modifiers,
            } => {
                let gesture = ItemGesture::Click {
                    button: *button,
                    modifiers: *modifiers,
                };
                if !self.session.on_item_gesture(item, &gesture) {
                    self.session.on_outside_gesture(&OutsideGesture::PointerDown);
                }
            }
            HostEvent::Key {
                item,
                key,
                modifiers,
            } => {
                let consumed = match item {
                    Some(item) => {
                        let dragging = self.session.drag().dragging_id.as_ref() == Some(item);
                        let gesture = ItemGesture::Key {
                            key: key.clone(),
                            modifiers: *modifiers,
                            dragging,
                        };
                        self.session.on_item_gesture(item, &gesture)
                    }
                    None => false,
                };
                if !consumed {
                    self.session
                        .on_outside_gesture(&OutsideGesture::Key { key: key.clone() });
                }
            }
            HostEvent::Touch { item } => {
                let consumed = match item {
                    Some(item) => self.session.on_item_gesture(item, &ItemGesture::TouchEnd),
                    None => false,
                };
                if !consumed {
                    self.session.on_outside_gesture(&OutsideGesture::TouchEnd);
                }
            }
            HostEvent::PointerDown => {
                self.session.on_outside_gesture(&OutsideGesture::PointerDown);
            }
            HostEvent::DragStart { item } => {
                if let Some(open) = &self.pending {
                    return Err(BoardError::InvariantViolation(format!(
                        "drag of {} started while {} is still dragging",
                        item, open.draggable_id
                    )));
                }
                let source = self
                    .session
                    .entities()
                    .locate(item)
                    .ok_or_else(|| BoardError::ItemNotFound(item.clone()))?;
                let start = DragStart {
                    draggable_id: item.clone(),
                    source,
                };
                self.session.on_drag_start(&start);
                self.pending = Some(start);
            }
            HostEvent::DragEnd {
                destination,
                reason,
            } => {
                let start = self.pending.take().ok_or_else(|| {
                    BoardError::InvariantViolation("drag_end without drag_start".to_string())
                })?;
                let result = DropResult {
                    draggable_id: start.draggable_id,
                    source: start.source,
                    destination: destination.clone(),
                    reason: *reason,
                };
                self.session.on_drag_end(&result)?;

                match (&result.destination, result.reason) {
                    (Some(_), DropReason::Drop) => self.report.drops += 1,
                    _ => self.report.cancelled += 1,
                }
            }
        }
        Ok(())
    }
}

/// Replay `events` on `session` and hand back the resulting session.
pub fn replay(
    session: BoardSession,
    events: &[HostEvent],
) -> Result<(BoardSession, ReplayReport), BoardError> {
    let mut replayer = Replayer::new(session);
    replayer.run(events)?;
    let (session, report) = replayer.finish()?;

    tracing::info!(
        events = report.events,
        drops = report.drops,
        cancelled = report.cancelled,
        "replay finished"
    );
    Ok((session, report))
}
