use crate::model::CreateFilesPayload;
use std::path::PathBuf;

/// Input line for the add-files form: whitespace separated source paths.
#[derive(Debug)]
pub struct AddFilesPrompt {
    pub input_buffer: String,
    pub last_result: Option<String>,
    pub is_active: bool,
}

impl AddFilesPrompt {
    pub fn new() -> Self {
        AddFilesPrompt {
            input_buffer: String::new(),
            last_result: None,
            is_active: false,
        }
    }

    pub fn open(&mut self) {
        self.is_active = true;
        self.input_buffer.clear();
        self.last_result = None;
    }

    pub fn close(&mut self) {
        self.is_active = false;
    }

    pub fn payload(&self) -> CreateFilesPayload {
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let files = self
            .input_buffer
            .split_whitespace()
            .map(|part| expand_home(part, home.as_deref()))
            .collect();
        CreateFilesPayload { files }
    }
}

fn expand_home(part: &str, home: Option<&std::path::Path>) -> PathBuf {
    match (part.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(part),
    }
}

impl Default for AddFilesPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn splits_input_into_paths() {
        let mut prompt = AddFilesPrompt::new();
        prompt.open();
        prompt.input_buffer.push_str("  /tmp/a.txt   rel/b.png ");
        assert_eq!(
            prompt.payload().files,
            vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("rel/b.png")]
        );
    }

    #[test]
    fn blank_input_gives_empty_payload() {
        let mut prompt = AddFilesPrompt::new();
        prompt.input_buffer.push_str("   ");
        assert!(prompt.payload().files.is_empty());
    }

    #[test]
    fn expands_home_prefix() {
        let home = Path::new("/home/me");
        assert_eq!(expand_home("~/x.txt", Some(home)), PathBuf::from("/home/me/x.txt"));
        assert_eq!(expand_home("~/x.txt", None), PathBuf::from("~/x.txt"));
        assert_eq!(expand_home("/abs", Some(home)), PathBuf::from("/abs"));
    }

    #[test]
    fn open_resets_previous_input() {
        let mut prompt = AddFilesPrompt::new();
        prompt.input_buffer.push_str("old");
        prompt.last_result = Some("error".into());
        prompt.open();
        assert!(prompt.is_active);
        assert!(prompt.input_buffer.is_empty());
        assert!(prompt.last_result.is_none());
    }
}
