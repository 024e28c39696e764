use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use lazy_static::lazy_static;
use regex::Regex;

use super::{PhonemeGroup, Phonemizer};
use crate::languages::LanguageCode;

lazy_static! {
    /// Language switch markers espeak-ng inserts, e.g. `(en)` or `(fr-fr)`.
    static ref LANG_SWITCH_REGEX: Regex = Regex::new(r"\([a-z]{2,3}(?:-[a-z0-9]+)*\)").unwrap();
}

/// Phonemizer backed by the `espeak-ng` command line tool.
pub struct EspeakPhonemizer {
    binary: PathBuf,
}

impl EspeakPhonemizer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, text: &str, voice: &str) -> Result<String, String> {
        let mut child = Command::new(&self.binary)
            .args(["--ipa", "-q", "--stdin", "-v", voice])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                format!(
                    "Failed to run {} (is it installed?): {}",
                    self.binary.display(),
                    e
                )
            })?;

        let mut stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err("Failed to open espeak-ng stdin".to_string());
            }
        };

        // Written on its own thread while stdout drains; dropping the handle sends EOF
        let input = text.as_bytes().to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child
            .wait_with_output()
            .map_err(|e| format!("Failed to wait for espeak-ng: {}", e))?;

        let written = writer
            .join()
            .map_err(|_| "espeak-ng stdin writer panicked".to_string())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("espeak-ng failed: {}", stderr.trim()));
        }

        written.map_err(|e| format!("Failed to write to espeak-ng: {}", e))?;

        String::from_utf8(output.stdout)
            .map_err(|e| format!("espeak-ng produced invalid UTF-8: {}", e))
    }
}

impl Phonemizer for EspeakPhonemizer {
    fn phonemize(&self, text: &str, language: LanguageCode) -> Result<Vec<PhonemeGroup>, String> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let stdout = self.run(text, language.as_str())?;
        Ok(parse_output(&stdout))
    }
}

/// Split espeak-ng output into groups, one per non-empty line.
pub fn parse_output(stdout: &str) -> Vec<PhonemeGroup> {
    stdout
        .lines()
        .map(|line| LANG_SWITCH_REGEX.replace_all(line, ""))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(|c| c.to_string()).collect())
        .collect()
}
