//! FontForge adapter.
//!
//! FontForge is driven as a subprocess with inline Python. Opening a font runs
//! an inspection script that prints the attribute snapshot as one JSON line;
//! generating runs a second script that reopens the source and writes it out.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use log::debug;

use crate::{EngineError, FontEngine, FontHandle, FontInfo, OutputFormat, Result};

const ENGINE_NAME: &str = "fontforge";

/// Prefix of the stdout line carrying the JSON snapshot. FontForge writes its
/// own warnings to the same stream.
const INFO_MARKER: &str = "FIB-INFO ";

const INSPECT_SCRIPT: &str = r#"
import json, sys
import fontforge
f = fontforge.open(sys.argv[-1])
print("FIB-INFO " + json.dumps({
    "family_name": f.familyname,
    "full_name": f.fullname,
    "font_name": f.fontname,
    "weight": f.weight,
    "version": f.version,
    "italic_angle": f.italicangle,
    "copyright": f.copyright,
    "comment": f.comment,
    "change_log": f.fontlog,
    "names": [{"language": l, "key": k, "value": v} for (l, k, v) in f.sfnt_names],
}))
f.close()
"#;

const WRITE_SCRIPT: &str = r#"
import sys
import fontforge
src, dst, mode = sys.argv[-3:]
f = fontforge.open(src)
if mode == "save":
    f.save(dst)
else:
    f.generate(dst)
f.close()
"#;

/// Engine backed by the `fontforge` executable.
#[derive(Debug, Clone)]
pub struct FontForgeEngine {
    program: String,
}

impl FontForgeEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn run_script(&self, script: &str, args: &[&Path], mode: Option<&str>) -> Result<Output> {
        let mut command = Command::new(&self.program);
        command.args(["-lang=py", "-c", script]).args(args);
        if let Some(mode) = mode {
            command.arg(mode);
        }
        debug!("Running {} with {} argument(s)", self.program, args.len());
        command.output().map_err(|e| self.spawn_error(e))
    }

    fn spawn_error(&self, e: std::io::Error) -> EngineError {
        if e.kind() == ErrorKind::NotFound {
            EngineError::Unavailable {
                engine: ENGINE_NAME,
                reason: format!("'{}' was not found on PATH", self.program),
            }
        } else {
            EngineError::Io(e)
        }
    }
}

impl Default for FontForgeEngine {
    fn default() -> Self {
        Self::new(ENGINE_NAME)
    }
}

impl FontEngine for FontForgeEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn probe(&self) -> Result<()> {
        let output = Command::new(&self.program).arg("-version").output().map_err(|e| {
            EngineError::Unavailable { engine: ENGINE_NAME, reason: format!("{}: {e}", self.program) }
        })?;
        if !output.status.success() {
            return Err(EngineError::Unavailable {
                engine: ENGINE_NAME,
                reason: format!("'{} -version' exited with {}", self.program, output.status),
            });
        }
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FontHandle>> {
        let output = self.run_script(INSPECT_SCRIPT, &[path], None)?;
        if !output.status.success() {
            return Err(EngineError::Inspect {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let info = parse_inspect_output(path, &String::from_utf8_lossy(&output.stdout))?;
        Ok(Box::new(FontForgeFont { engine: self.clone(), path: path.to_path_buf(), info }))
    }
}

fn parse_inspect_output(path: &Path, stdout: &str) -> Result<FontInfo> {
    let line = stdout.lines().rev().find_map(|line| line.strip_prefix(INFO_MARKER)).ok_or_else(
        || EngineError::Inspect {
            path: path.to_path_buf(),
            message: "no attribute snapshot in fontforge output".to_string(),
        },
    )?;
    Ok(serde_json::from_str(line)?)
}

struct FontForgeFont {
    engine: FontForgeEngine,
    path: PathBuf,
    info: FontInfo,
}

impl FontForgeFont {
    fn write(&self, output: &Path, mode: &str) -> Result<()> {
        let result = self.engine.run_script(WRITE_SCRIPT, &[self.path.as_path(), output], Some(mode))?;
        if !result.status.success() {
            return Err(EngineError::Generate {
                path: output.to_path_buf(),
                message: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl FontHandle for FontForgeFont {
    fn path(&self) -> &Path {
        &self.path
    }

    fn info(&self) -> &FontInfo {
        &self.info
    }

    fn generate(&self, output: &Path, format: OutputFormat) -> Result<()> {
        debug!("Generating {format} from {}", self.path.display());
        self.write(output, "generate")
    }

    fn save(&self, output: &Path) -> Result<()> {
        self.write(output, "save")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inspect_output_skips_warnings() {
        let stdout = concat!(
            "Copyright (c) 2000-2024. See AUTHORS for Contributors.\n",
            "The glyph named a is mapped to U+0061.\n",
            r#"FIB-INFO {"family_name": "Sample", "italic_angle": -11.5, "names": [{"language": "English (US)", "key": "Designer", "value": "Ana"}]}"#,
            "\n",
        );
        let info = parse_inspect_output(Path::new("Sample.sfd"), stdout).unwrap();
        assert_eq!(info.family_name.as_deref(), Some("Sample"));
        assert!(info.is_italic());
        assert_eq!(info.lookup_name("designer"), Some("Ana"));
    }

    #[test]
    fn test_parse_inspect_output_without_marker() {
        let err = parse_inspect_output(Path::new("Broken.sfd"), "nothing here\n").unwrap_err();
        assert!(matches!(err, EngineError::Inspect { .. }));
    }

    #[test]
    fn test_probe_missing_program() {
        let engine = FontForgeEngine::new("/nonexistent/bin/fontforge");
        let err = engine.probe().unwrap_err();
        assert!(matches!(err, EngineError::Unavailable { .. }));
    }

    #[test]
    fn test_open_with_missing_program() {
        let engine = FontForgeEngine::new("/nonexistent/bin/fontforge");
        let err = engine.open(Path::new("Sample.sfd")).err().unwrap();
        assert!(matches!(err, EngineError::Unavailable { .. }));
    }
}
