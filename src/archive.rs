use std::{
    fs::File,
    io::{self, BufWriter},
    path::Path,
};

use zip::{
    CompressionMethod, ZipWriter,
    write::SimpleFileOptions,
};

use crate::error::{Error, Result};

/// Writes every file and directory below `src_dir` into a new zip at `dest`.
///
/// Entry names are relative to `src_dir` and use `/` separators. Returns the
/// number of files written.
pub fn zip_dir(src_dir: &Path, dest: &Path) -> Result<usize> {
    if !src_dir.is_dir() {
        return Err(Error::MissingDirectory { path: src_dir.to_path_buf() });
    }

    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut count = 0;
    add_dir(&mut zip, src_dir, "", options, &mut count)?;

    let mut writer = zip.finish()?;
    io::Write::flush(&mut writer)?;

    tracing::debug!("wrote {} files to {}", count, dest.display());
    Ok(count)
}

fn add_dir<W>(
    zip: &mut ZipWriter<W>,
    dir: &Path,
    prefix: &str,
    options: SimpleFileOptions,
    count: &mut usize,
) -> Result<()>
where
    W: io::Write + io::Seek, {
    let mut entries = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = format!("{}{}", prefix, entry.file_name().to_string_lossy());
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            zip.add_directory(format!("{}/", name), options.unix_permissions(0o755))?;
            add_dir(zip, &path, &format!("{}/", name), options, count)?;
        } else {
            zip.start_file(name, options)?;
            let mut file = File::open(&path)?;
            io::copy(&mut file, zip)?;
            *count += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn zips_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dist");
        std::fs::create_dir_all(src.join("assets/img")).unwrap();
        std::fs::write(src.join("index.html"), "<html></html>").unwrap();
        std::fs::write(src.join("assets/app.js"), "console.log(1)").unwrap();
        std::fs::write(src.join("assets/img/logo.svg"), "<svg/>").unwrap();

        let dest = dir.path().join("app.zip");
        let count = zip_dir(&src, &dest).unwrap();
        assert_eq!(count, 3);

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "assets/",
                "assets/app.js",
                "assets/img/",
                "assets/img/logo.svg",
                "index.html",
            ]
        );

        let mut content = String::new();
        archive
            .by_name("assets/app.js")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "console.log(1)");
    }

    #[test]
    fn missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = zip_dir(&dir.path().join("dist"), &dir.path().join("app.zip")).unwrap_err();
        assert!(matches!(err, Error::MissingDirectory { .. }));
        assert!(!dir.path().join("app.zip").exists());
    }
}
