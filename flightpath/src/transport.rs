use reqwest::{Client, Response};
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};

/// The two outbound calls a run makes. Kept behind a trait so the pipeline
/// can be driven without a network.
pub(crate) trait HttpTransport {
    async fn get_text(&self, url: &str) -> ApplicationResult<String>;
    async fn post_text(&self, url: &str, body: String) -> ApplicationResult<()>;
}

pub(crate) struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> ApplicationResult<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

fn check_status(url: &str, response: Response) -> ApplicationResult<Response> {
    let status = response.status();
    debug!(url, %status, "Received response");
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApplicationError::HttpStatus {
            url: url.to_owned(),
            status: status.as_u16(),
        })
    }
}

impl HttpTransport for ReqwestTransport {
    #[tracing::instrument(skip(self))]
    async fn get_text(&self, url: &str) -> ApplicationResult<String> {
        let response = self.client.get(url).send().await?;
        Ok(check_status(url, response)?.text().await?)
    }

    #[tracing::instrument(skip(self, body))]
    async fn post_text(&self, url: &str, body: String) -> ApplicationResult<()> {
        let response = self.client.post(url).body(body).send().await?;
        check_status(url, response)?;
        Ok(())
    }
}
