pub mod authorizer;
pub mod catalog;
pub mod token;
pub mod url_signer;

pub use authorizer::PlaybackAuthorizer;
pub use catalog::{FunctionsCatalog, VideoCatalog, VideoRecord, Visibility};
pub use token::TokenVerifier;
pub use url_signer::UrlSigner;
