use std::io::Write;

use tracing::info;

use crate::{config::NotifyConfig, error::ApplicationResult, transport::HttpTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Delivery {
    Pushed,
    Local,
}

/// Pushes messages to `{server}/{topic}`, or writes them to `local` when no
/// push endpoint is configured.
pub(crate) struct Notifier<'a, T, W> {
    endpoint: Option<String>,
    transport: &'a T,
    local: &'a mut W,
}

impl<'a, T: HttpTransport, W: Write> Notifier<'a, T, W> {
    pub fn new(config: &NotifyConfig, transport: &'a T, local: &'a mut W) -> Self {
        Self {
            endpoint: config.endpoint(),
            transport,
            local,
        }
    }

    pub async fn notify(&mut self, message: &str) -> ApplicationResult<Delivery> {
        let Some(url) = self.endpoint.clone() else {
            self.write_local(message)?;
            return Ok(Delivery::Local);
        };
        self.transport.post_text(&url, message.to_owned()).await?;
        info!(%url, "Pushed notification");
        Ok(Delivery::Pushed)
    }

    pub fn write_local(&mut self, message: &str) -> ApplicationResult<()> {
        writeln!(self.local, "{message}")?;
        self.local.flush()?;
        Ok(())
    }
}
