/// The client's belief about what the device should be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordingIntent {
    /// True when the device should be recording.
    pub desired: bool,
    /// True while `desired` has not been confirmed applied by the backend.
    pub pending_sync: bool,
}

/// Server-reported permission gate, independent of intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordingCapability {
    /// Whether the backend currently permits recording at all.
    pub allowed: bool,
}

impl RecordingCapability {
    /// Capability used whenever the server cannot confirm permission.
    pub const DENIED: Self = Self { allowed: false };
}
