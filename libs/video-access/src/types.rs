/// Wire types shared by the access gate and the authorization endpoint
use serde::{Deserialize, Serialize};

/// Viewer identity, passed explicitly into resolution.
///
/// `initialized` reports that the identity layer has finished its startup
/// resolution; until then the gate issues no requests.
#[derive(Debug, Clone, Default)]
pub struct ViewerContext {
    pub initialized: bool,
    pub viewer: Option<Viewer>,
    pub id_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    pub uid: String,
}

/// Request body for the playback authorization endpoint.
///
/// Exactly one variant is sent per request: authenticated when both a viewer
/// and a token are known at resolution time, public otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorizationRequest {
    #[serde(rename_all = "camelCase")]
    Authenticated {
        video_id: String,
        user_id: String,
        id_token: String,
    },
    #[serde(rename_all = "camelCase")]
    Public {
        video_id: String,
        public_access: bool,
    },
}

impl AuthorizationRequest {
    /// Build the variant the context dictates.
    pub fn for_viewer(ctx: &ViewerContext, video_id: &str) -> Self {
        match (&ctx.viewer, &ctx.id_token) {
            (Some(viewer), Some(token)) => Self::Authenticated {
                video_id: video_id.to_string(),
                user_id: viewer.uid.clone(),
                id_token: token.clone(),
            },
            _ => Self::Public {
                video_id: video_id.to_string(),
                public_access: true,
            },
        }
    }

}

/// Response body: the playable source URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResult {
    pub src_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("authorization request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("authorization denied with status {status}")]
    Denied { status: u16 },

    #[error("authorization response could not be decoded: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signed_in_context() -> ViewerContext {
        ViewerContext {
            initialized: true,
            viewer: Some(Viewer {
                uid: "u1".to_string(),
            }),
            id_token: Some("t1".to_string()),
        }
    }

    #[test]
    fn test_authenticated_request_wire_shape() {
        let request = AuthorizationRequest::for_viewer(&signed_in_context(), "v1");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "videoId": "v1", "userId": "u1", "idToken": "t1" })
        );
    }

    #[test]
    fn test_public_request_wire_shape() {
        let ctx = ViewerContext {
            initialized: true,
            ..Default::default()
        };
        let request = AuthorizationRequest::for_viewer(&ctx, "v1");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "videoId": "v1", "publicAccess": true })
        );
    }

    #[test]
    fn test_partial_identity_falls_back_to_public() {
        // A viewer without a token must never produce a half-filled
        // authenticated request.
        let ctx = ViewerContext {
            initialized: true,
            viewer: Some(Viewer {
                uid: "u1".to_string(),
            }),
            id_token: None,
        };
        let request = AuthorizationRequest::for_viewer(&ctx, "v1");

        assert_eq!(
            request,
            AuthorizationRequest::Public {
                video_id: "v1".to_string(),
                public_access: true,
            }
        );
    }

    #[test]
    fn test_request_deserializes_both_variants() {
        let authenticated: AuthorizationRequest =
            serde_json::from_value(json!({ "videoId": "v1", "userId": "u1", "idToken": "t1" }))
                .unwrap();
        assert!(matches!(
            authenticated,
            AuthorizationRequest::Authenticated { .. }
        ));

        let public: AuthorizationRequest =
            serde_json::from_value(json!({ "videoId": "v1", "publicAccess": true })).unwrap();
        assert!(matches!(public, AuthorizationRequest::Public { .. }));
    }

    #[test]
    fn test_result_uses_src_url_key() {
        let result: AuthorizationResult =
            serde_json::from_value(json!({ "srcUrl": "https://media.example.com/a.m3u8" }))
                .unwrap();
        assert_eq!(result.src_url, "https://media.example.com/a.m3u8");
    }
}
