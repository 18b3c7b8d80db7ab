pub mod chunk;
pub mod libre;

pub use chunk::{chunk_text, DEFAULT_CHUNK_SIZE};
pub use libre::LibreTranslator;

use crate::error::Result;
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
    fn name(&self) -> &'static str;

    /// Translate, falling back to the untranslated text on any failure.
    async fn translate_or_passthrough(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> String {
        match self.translate(text, source_lang, target_lang).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("Translation error ({}): {}", self.name(), e);
                text.to_string()
            }
        }
    }
}
