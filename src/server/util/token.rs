use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Generates an opaque 256-bit token safe to use in cookies and URLs
pub fn generate_token() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; 32]>())
}
