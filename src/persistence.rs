//! Writing rendered documents to disk.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::tree::Document;

impl Document {
    /// Writes [`to_string`](ToString::to_string) verbatim to `path`,
    /// replacing any existing file.
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_string();
        tokio::fs::write(path, content.as_bytes()).await?;
        info!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_round_trips_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teste.xml");

        let mut doc = Document::new();
        let root = doc.create_root("teste", None).unwrap();
        doc.create_node("curso", Some("Engenharia Eletrónica"), Some(root))
            .unwrap();

        doc.save_to_file(&path).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_string());
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.xml");

        let doc = Document::new();
        let result = doc.save_to_file(&path).await;
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
