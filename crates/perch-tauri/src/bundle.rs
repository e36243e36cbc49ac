//! Content bundle loading and initialization script composition
//!
//! The content runtime is built with `wasm-bindgen --target no-modules`,
//! producing a JS glue file that defines a `wasm_bindgen` global and the
//! wasm module itself. Both are embedded in one script that Tauri runs at
//! document start of every navigation.

use std::path::{Path, PathBuf};

use base64::Engine;
use perch_core::{ContentConfig, Error, Result};

pub const GLUE_FILE: &str = "perch_content.js";
pub const WASM_FILE: &str = "perch_content_bg.wasm";

#[derive(Debug, Clone)]
pub struct ContentBundle {
    glue: String,
    wasm: Vec<u8>,
}

impl ContentBundle {
    pub fn new(glue: impl Into<String>, wasm: Vec<u8>) -> Self {
        Self {
            glue: glue.into(),
            wasm,
        }
    }

    /// Read the glue and module from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let glue = read(dir.join(GLUE_FILE), std::fs::read_to_string)?;
        let wasm = read(dir.join(WASM_FILE), std::fs::read)?;
        if wasm.is_empty() {
            return Err(Error::ContentBundle(format!(
                "{} is empty",
                dir.join(WASM_FILE).display()
            )));
        }
        tracing::info!(dir = %dir.display(), wasm_bytes = wasm.len(), "Loaded content bundle");
        Ok(Self::new(glue, wasm))
    }

    /// Compose the script that instantiates the module and installs the runtime
    pub fn init_script(&self, config: &ContentConfig) -> Result<String> {
        let config = serde_json::to_string(config)?;
        let module = base64::engine::general_purpose::STANDARD.encode(&self.wasm);

        // Subframes (ads, embeds) are left alone
        Ok(format!(
            r#"(function () {{
  if (window.top !== window.self) {{ return; }}
{glue}
  try {{
    const bytes = Uint8Array.from(atob("{module}"), (c) => c.charCodeAt(0));
    wasm_bindgen.initSync({{ module: bytes }});
    wasm_bindgen.install({config});
  }} catch (err) {{
    console.warn("[Perch] content runtime failed to start", err);
  }}
}})();
"#,
            glue = self.glue,
        ))
    }
}

fn read<T>(path: PathBuf, read: impl FnOnce(&Path) -> std::io::Result<T>) -> Result<T> {
    read(&path).map_err(|err| Error::ContentBundle(format!("{}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLUE: &str = "let wasm_bindgen = {};";

    #[test]
    fn test_script_embeds_glue_module_and_config() {
        let bundle = ContentBundle::new(GLUE, vec![0x00, 0x61, 0x73, 0x6d]);
        let script = bundle.init_script(&ContentConfig::default()).unwrap();

        assert!(script.contains(GLUE));
        assert!(script.contains(r#"atob("AGFzbQ==")"#));
        assert!(script.contains("wasm_bindgen.initSync"));
        assert!(script.contains(r#""pollIntervalMs":2000"#));
        assert!(script.contains(r#""markerClass":"perch-expanded""#));
        // glue is defined before it is used
        assert!(script.find(GLUE).unwrap() < script.find("initSync").unwrap());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GLUE_FILE), GLUE).unwrap();
        std::fs::write(dir.path().join(WASM_FILE), [0x00, 0x61, 0x73, 0x6d]).unwrap();

        let bundle = ContentBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.wasm.len(), 4);
        assert_eq!(bundle.glue, GLUE);
    }

    #[test]
    fn test_missing_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentBundle::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ContentBundle(_)));
        assert_eq!(err.error_code(), "CONTENT_BUNDLE");
    }

    #[test]
    fn test_empty_module_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GLUE_FILE), GLUE).unwrap();
        std::fs::write(dir.path().join(WASM_FILE), b"").unwrap();
        assert!(ContentBundle::load(dir.path()).is_err());
    }
}
