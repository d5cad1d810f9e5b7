use std::path::PathBuf;

use bibman::{file::FormatFile, format::Format};

use log::{info, trace};

/// Opens the bibliography file to work on.
///
/// An explicit path is opened directly. Without one the current directory is
/// searched for a single file with the format's extension and a new
/// `bibliography` file is created when none exists.
pub fn open_or_create_format_file<F: Format>(
    file_name: Option<PathBuf>,
) -> eyre::Result<FormatFile<F>> {
    if let Some(path) = file_name {
        trace!("opening {} file as a {} file", path.display(), F::name());
        Ok(FormatFile::open(path)?)
    } else {
        trace!("Searching current directory for any {} files", F::name());
        if let Ok(file) = FormatFile::find(".") {
            Ok(file)
        } else {
            let path = PathBuf::from("bibliography").with_extension(F::ext());
            info!(
                "No .{} file found in current directory - creating the new file `{}`",
                F::ext(),
                path.display()
            );
            Ok(FormatFile::create(path)?)
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use bibman::format::BibTex;

    use assert_fs::{fixture::FileTouch, NamedTempFile};

    #[test]
    fn explicit_path_is_opened_directly() {
        let file = NamedTempFile::new("temp.bib").expect("Cannot create temp file for test");
        file.touch().expect("Failure on touch of new temp file");

        let res = open_or_create_format_file::<BibTex>(Some(NamedTempFile::path(&file).into()));
        file.close().unwrap();

        assert!(res.is_ok());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let res = open_or_create_format_file::<BibTex>(Some("file does not exist".into()));

        assert!(res.is_err());
    }
}
