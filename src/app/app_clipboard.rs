use crate::app::App;
use crate::service::FileCollectionService;
use crossclip::{Clipboard, ClipboardError, SystemClipboard};
use tokio::task;

pub async fn copy_selected_file_name_to_clipboard<S: FileCollectionService>(app: &mut App<S>) {
    app.status = None;
    let Some(name) = app.selected_file().map(|f| f.name.clone()) else {
        app.status = Some("No file selected to copy".to_string());
        return;
    };

    let result: Result<Result<String, ClipboardError>, task::JoinError> = task::spawn_blocking(move || {
        let clipboard = SystemClipboard::new()?;
        clipboard.set_string_contents(name.clone())?;
        Ok(name)
    })
    .await;

    match result {
        Ok(Ok(copied)) => app.status = Some(format!("Copied file name '{}' to clipboard!", copied)),
        Ok(Err(e)) => {
            log::warn!("Clipboard access failed: {}", e);
            app.status = Some(format!("Failed to access clipboard: {}", e));
        }
        Err(e) => app.status = Some(format!("Clipboard task failed: {}", e)),
    }
}
