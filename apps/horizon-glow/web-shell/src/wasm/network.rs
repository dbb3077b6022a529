use super::*;

#[derive(Debug, Clone)]
pub(super) struct HttpStorefrontApi {
    account_endpoint: String,
    logout_endpoint: String,
}

impl HttpStorefrontApi {
    pub(super) fn new(config: &StorefrontConfig) -> Self {
        Self {
            account_endpoint: config.account_endpoint.clone(),
            logout_endpoint: config.logout_endpoint.clone(),
        }
    }
}

#[async_trait(?Send)]
impl StorefrontApi for HttpStorefrontApi {
    async fn fetch_account(&self) -> Result<Profile, ApiError> {
        let response = Request::get(&self.account_endpoint)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(map_network_error)?;
        let (status, raw) = read_response(response).await?;
        debug!(status, endpoint = %self.account_endpoint, "account response");
        decode_response(status, &raw)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = Request::post(&self.logout_endpoint)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(map_network_error)?;
        let (status, raw) = read_response(response).await?;
        debug!(status, endpoint = %self.logout_endpoint, "logout response");
        check_status(status, &raw)
    }
}

pub(super) fn map_network_error(error: gloo_net::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

pub(super) async fn read_response(
    response: gloo_net::http::Response,
) -> Result<(u16, String), ApiError> {
    let status = response.status();
    let raw = response
        .text()
        .await
        .map_err(|error| ApiError::Transport(format!("failed to read response body: {error}")))?;
    Ok((status, raw))
}
