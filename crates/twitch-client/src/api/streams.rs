use super::*;

impl StreamsClient {
    /// Stream status URL for a channel under the configured base.
    pub fn stream_url(&self, channel: &ChannelId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("streams");
            if self.flavor == ApiFlavor::Kraken {
                segments.push(channel.as_str());
            }
        }
        if self.flavor == ApiFlavor::Helix {
            url.query_pairs_mut()
                .clear()
                .append_pair("user_login", channel.as_str());
        }
        url
    }
}

impl Fetcher for StreamsClient {
    async fn fetch(&self, channel: &ChannelId) -> Result<String, FetchError> {
        self.get_text(self.stream_url(channel)).await
    }
}
