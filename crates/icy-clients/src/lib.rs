pub mod error;
pub mod gemini;
pub mod sendgrid;
pub mod youtube;

pub use error::{ClientError, Result};
pub use gemini::GeminiClient;
pub use sendgrid::{Email, SendGridClient};
pub use youtube::{ChannelDetails, YouTubeClient};
