use exchange_common::FetcherError;
use exchange_common::config::QueueConfig;
use exchange_common::queue::RedisQueue;
use log::info;

/// Queue endpoints used in streaming mode.
///
/// Requests are consumed and results published over separate connections, so a
/// blocking wait on the request queue never holds up a publish.
pub struct QueueEndpoints {
    /// Consumer bound to the request queue.
    pub requests: RedisQueue,
    /// Publisher; the destination is passed per message.
    pub results: RedisQueue,
    /// Name of the result queue.
    pub result_queue: String,
}

impl QueueEndpoints {
    /// Connects both endpoints. Any failure here is a setup error.
    pub fn open(config: &QueueConfig) -> Result<Self, FetcherError> {
        let url = config.url()?;
        info!("Connecting to queue server {}:{}...", config.host, config.port);

        let requests = RedisQueue::connect(&url, &config.request_queue)?;
        info!("Receiving indices on queue '{}'", requests.queue());

        let results = RedisQueue::connect(&url, &config.result_queue)?;
        info!("Publishing results on queue '{}'", config.result_queue);

        Ok(Self {
            requests,
            results,
            result_queue: config.result_queue.clone(),
        })
    }
}
