use gloo_net::http::{Request, Response};
use setpace_domain as domain;

use crate::bundled;

pub const AUDIO_CONFIG_URL: &str = match option_env!("SETPACE_AUDIO_CONFIG_URL") {
    Some(url) => url,
    None => "https://gymstreak-asset-storage.s3.us-east-2.amazonaws.com/assets/adinterface/audio.json",
};

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone, Default)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    sender: S,
    audio_config_url: &'static str,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
            audio_config_url: AUDIO_CONFIG_URL,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> REST<S> {
    pub const fn with_sender(sender: S, audio_config_url: &'static str) -> Self {
        Self {
            sender,
            audio_config_url,
        }
    }

    pub async fn read_audio_config(&self) -> Result<domain::AudioConfig, domain::ReadError> {
        let request = Request::get(self.audio_config_url)
            .build()
            .map_err(|err| domain::StorageError::Other(Box::new(err)))?;
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| domain::StorageError::NoConnection)?;
        match response.status() {
            200..=299 => response
                .json::<bundled::AudioConfig>()
                .await
                .map(domain::AudioConfig::from)
                .map_err(|err| domain::StorageError::InvalidData(err.to_string()).into()),
            404 => Err(domain::ReadError::NotFound),
            status => Err(domain::StorageError::Other(
                format!("unexpected response status {status}").into(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::cell::RefCell;

        use pretty_assertions::assert_eq;
        use serde_json::json;
        use wasm_bindgen_test::wasm_bindgen_test;

        use super::super::*;

        const URL: &str = "https://cdn.example.com/audio.json";

        #[wasm_bindgen_test]
        async fn test_read_audio_config() {
            let rest = rest_with_response(Some(
                Response::builder().status(200).json(&json!({
                    "audioUrls": ["https://cdn.example.com/bell.mp3"],
                    "audioUrls2": ["https://cdn.example.com/gong.mp3"]
                })),
            ));

            assert_eq!(
                rest.read_audio_config().await.unwrap(),
                domain::AudioConfig {
                    primary: vec!["https://cdn.example.com/bell.mp3".to_string()],
                    secondary: vec!["https://cdn.example.com/gong.mp3".to_string()],
                }
            );
            assert_eq!(
                rest.sender.request.borrow().as_ref().unwrap().url(),
                URL.to_string()
            );
        }

        #[wasm_bindgen_test]
        async fn test_read_audio_config_no_connection() {
            assert!(matches!(
                rest_with_response(None).read_audio_config().await,
                Err(domain::ReadError::Storage(
                    domain::StorageError::NoConnection
                ))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_audio_config_not_found() {
            assert!(matches!(
                rest_with_response(Some(Response::builder().status(404).json(&json!({}))))
                    .read_audio_config()
                    .await,
                Err(domain::ReadError::NotFound)
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_audio_config_server_error() {
            assert!(matches!(
                rest_with_response(Some(Response::builder().status(503).json(&json!({}))))
                    .read_audio_config()
                    .await,
                Err(domain::ReadError::Storage(domain::StorageError::Other(_)))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_audio_config_invalid_data() {
            assert!(matches!(
                rest_with_response(Some(
                    Response::builder()
                        .status(200)
                        .json(&json!({ "sounds": [] }))
                ))
                .read_audio_config()
                .await,
                Err(domain::ReadError::Storage(
                    domain::StorageError::InvalidData(_)
                ))
            ));
        }

        fn rest_with_response(
            response: Option<Result<Response, gloo_net::Error>>,
        ) -> REST<MockSendRequest> {
            REST::with_sender(
                MockSendRequest {
                    request: RefCell::new(None),
                    response: RefCell::new(response),
                },
                URL,
            )
        }

        struct MockSendRequest {
            request: RefCell<Option<Request>>,
            response: RefCell<Option<Result<Response, gloo_net::Error>>>,
        }

        impl SendRequest for MockSendRequest {
            async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
                *self.request.borrow_mut() = Some(request);
                (*self.response.borrow_mut())
                    .take()
                    .unwrap_or(Err(gloo_net::Error::GlooError("no response".to_string())))
            }
        }
    }
}
