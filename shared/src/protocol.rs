use crate::{FeedbackRequest, FeedbackResponse, LoginRequest, LoginResponse, ReviewsApiResponse};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a session token
impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Submit a rating and comment; the backend answers with the predicted sentiment
impl ApiRequest for FeedbackRequest {
    type Response = FeedbackResponse;
    const PATH: &'static str = "/feedback";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// List all feedback together with the server-side summary (admin only)
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListFeedbackRequest;

impl ApiRequest for ListFeedbackRequest {
    type Response = ReviewsApiResponse;
    const PATH: &'static str = "/admin/feedback";
    const METHOD: HttpMethod = HttpMethod::Get;
}
