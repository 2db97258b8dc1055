use async_trait::async_trait;
use livecast_core::SignalingMessage;

/// Where peer sessions put outbound offers, answers and candidates.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send_signal(&self, msg: SignalingMessage);
}
