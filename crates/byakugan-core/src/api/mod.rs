mod http;
mod wire;

pub use http::HttpRecordApi;

pub(crate) use wire::{
    CapabilityState, CapabilityStatusResponse, NewStateRequest, RecorderState,
    RecorderStatusResponse,
};

use crate::{CoreResult, session::RecordingCapability};

/// Backend calls a recording session depends on.
///
/// [`HttpRecordApi`] talks to the appliance; tests plug in scripted doubles.
pub trait RecordApi: Send + Sync + 'static {
    /// Whether the backend currently permits recording at all.
    fn fetch_capability(&self) -> impl Future<Output = CoreResult<RecordingCapability>> + Send;

    /// Whether the device is recording right now.
    fn fetch_recording(&self) -> impl Future<Output = CoreResult<bool>> + Send;

    /// Ask the device to start (`true`) or stop (`false`) recording.
    fn set_recording(&self, desired: bool) -> impl Future<Output = CoreResult<()>> + Send;
}
